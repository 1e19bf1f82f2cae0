//! Reachability ratio: the fraction of the connected subgraph a node can
//! reach along directed edges, at any distance. Paths may pass through
//! edge endpoints missing from the node list; those never count as reached.
//!
//! Unlike harmonic centrality, distance does not matter here: a node three
//! hops away counts as much as a direct successor. Scores lie in `[0, 1]`;
//! with N ≤ 1 every score is 0.

use std::collections::HashMap;

use tracing::instrument;

use crate::graph::build::MetricsGraph;
use crate::graph::traverse::hop_distances;

/// Reachability ratio for every connected node.
#[must_use]
#[instrument(skip(g), fields(n = g.node_count()))]
pub fn reachability_ratio(g: &MetricsGraph) -> HashMap<String, f64> {
    g.label_scores(&reachability_vector(g))
}

pub(crate) fn reachability_vector(g: &MetricsGraph) -> Vec<f64> {
    let n = g.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = (n - 1) as f64;

    g.node_indices()
        .map(|s| {
            let reached = hop_distances(g, s)
                .into_iter()
                .enumerate()
                .filter(|&(i, d)| i != s.index() && d.is_some())
                .count();
            #[allow(clippy::cast_precision_loss)]
            let reached = reached as f64;
            reached / denom
        })
        .collect()
}
