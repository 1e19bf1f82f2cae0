//! Harmonic centrality over directed hop distances.
//!
//! For each connected node `s`:
//!
//! ```text
//! H(s) = Σ 1 / dist(s, t)   over nodes t reachable from s, t ≠ s
//!        ─────────────────
//!              N - 1
//! ```
//!
//! Only connected nodes count as targets, though paths may pass through
//! edge endpoints missing from the node list. Unreachable nodes contribute
//! nothing. A node with a direct edge to every other node scores 1.0. With
//! N ≤ 1 the denominator is zero and every score is 0.

use std::collections::HashMap;

use tracing::instrument;

use crate::graph::build::MetricsGraph;
use crate::graph::traverse::hop_distances;

/// Harmonic centrality for every connected node.
#[must_use]
#[instrument(skip(g), fields(n = g.node_count()))]
pub fn harmonic_centrality(g: &MetricsGraph) -> HashMap<String, f64> {
    g.label_scores(&harmonic_vector(g))
}

pub(crate) fn harmonic_vector(g: &MetricsGraph) -> Vec<f64> {
    let n = g.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = (n - 1) as f64;

    g.node_indices()
        .map(|s| {
            // Start from +0.0; an empty f64 `sum()` is -0.0.
            let sum = hop_distances(g, s)
                .into_iter()
                .flatten()
                .filter(|&d| d > 0)
                .fold(0.0, |acc, d| {
                    #[allow(clippy::cast_precision_loss)]
                    let d = d as f64;
                    acc + 1.0 / d
                });
            sum / denom
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimnet_core::{Edge, Node};

    fn build(ids: &[&str], pairs: &[(&str, &str)]) -> MetricsGraph {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id)).collect();
        let edges: Vec<Edge> = pairs.iter().map(|(a, b)| Edge::new(*a, *b)).collect();
        MetricsGraph::build(&nodes, &edges)
    }

    #[test]
    fn chain_weights_by_inverse_distance() {
        let g = build(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let h = harmonic_centrality(&g);
        assert!((h["A"] - 0.75).abs() < 1e-12);
        assert!((h["B"] - 0.5).abs() < 1e-12);
        assert!(h["C"].abs() < 1e-12);
    }

    #[test]
    fn sink_scores_positive_zero() {
        let g = build(&["A", "B"], &[("A", "B")]);
        let h = harmonic_centrality(&g);
        assert_eq!(h["B"].to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn unlisted_hop_is_walked() {
        let g = build(&["A", "C"], &[("A", "X"), ("X", "C")]);
        let h = harmonic_centrality(&g);
        assert!((h["A"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn direct_edges_to_all_scores_one() {
        let g = build(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("A", "D")],
        );
        let h = harmonic_centrality(&g);
        assert!((h["A"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_self_loop_is_guarded() {
        let g = build(&["A"], &[("A", "A")]);
        let h = harmonic_centrality(&g);
        assert_eq!(h.get("A"), Some(&0.0));
    }

    #[test]
    fn parallel_edges_do_not_double_count() {
        let g = build(&["A", "B"], &[("A", "B"), ("A", "B")]);
        let h = harmonic_centrality(&g);
        assert!((h["A"] - 1.0).abs() < 1e-12);
    }
}
