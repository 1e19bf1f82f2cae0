//! Network metrics: all four centrality scores for every listed node.
//!
//! # Output
//!
//! ```json
//! {
//!   "nodeMetrics": {
//!     "A": { "PageRank": 0.19, "HarmonicCentrality": 0.75,
//!            "ReachabilityRatio": 1.0, "BetweennessCentrality": 0.0 }
//!   },
//!   "globalMetrics": { "networkSize": 3, "edgeCount": 2 }
//! }
//! ```
//!
//! Every id in the input node list gets an entry. Nodes outside the
//! connected subgraph get all four scores set to 0. Endpoints that are not
//! in the node list never appear.
//!
//! When no listed node touches an edge the result is empty:
//! `nodeMetrics = {}`, `networkSize = 0`, `edgeCount = 0`.
//!
//! Map files written by earlier editor builds used the keys `LRC`,
//! `LRC_NX` and `Betweenness Centrality`; they are accepted on read.

use std::collections::BTreeMap;

use claimnet_core::{Edge, Node};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::build::MetricsGraph;
use crate::metrics::betweenness::betweenness_vector;
use crate::metrics::harmonic::harmonic_vector;
use crate::metrics::pagerank::{PageRankConfig, pagerank_vector};
use crate::metrics::reachability::reachability_vector;

/// The four centrality scores of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    #[serde(rename = "PageRank")]
    pub page_rank: f64,
    #[serde(rename = "HarmonicCentrality", alias = "LRC")]
    pub harmonic_centrality: f64,
    #[serde(rename = "ReachabilityRatio", alias = "LRC_NX")]
    pub reachability_ratio: f64,
    #[serde(rename = "BetweennessCentrality", alias = "Betweenness Centrality")]
    pub betweenness_centrality: f64,
}

/// Whole-network summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    /// Connected node count (N).
    pub network_size: usize,
    /// Input edge count, unfiltered.
    pub edge_count: usize,
}

/// Result of [`compute`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub node_metrics: BTreeMap<String, NodeMetrics>,
    pub global_metrics: GlobalMetrics,
}

/// Compute every metric with the default PageRank parameters.
#[must_use]
pub fn compute(nodes: &[Node], edges: &[Edge]) -> NetworkMetrics {
    compute_with(nodes, edges, &PageRankConfig::default())
}

/// Compute every metric with explicit PageRank parameters.
#[must_use]
#[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
pub fn compute_with(nodes: &[Node], edges: &[Edge], config: &PageRankConfig) -> NetworkMetrics {
    let g = MetricsGraph::build(nodes, edges);
    compute_on_graph(&g, nodes, config)
}

/// Compute every metric over an already built graph.
///
/// `nodes` must be the node list `g` was built from.
#[must_use]
pub fn compute_on_graph(g: &MetricsGraph, nodes: &[Node], config: &PageRankConfig) -> NetworkMetrics {
    if g.is_empty() {
        debug!("no connected nodes, skipping metrics");
        return NetworkMetrics::default();
    }

    let pagerank = pagerank_vector(g, config);
    let harmonic = harmonic_vector(g);
    let reachability = reachability_vector(g);
    let betweenness = betweenness_vector(g);

    debug!(
        iterations = pagerank.iterations,
        converged = pagerank.converged,
        "metrics computed"
    );

    let node_metrics = nodes
        .iter()
        .map(|node| {
            let metrics = g.node_index(&node.id).map_or_else(NodeMetrics::default, |idx| {
                let i = idx.index();
                NodeMetrics {
                    page_rank: pagerank.values[i],
                    harmonic_centrality: harmonic[i],
                    reachability_ratio: reachability[i],
                    betweenness_centrality: betweenness[i],
                }
            });
            (node.id.clone(), metrics)
        })
        .collect();

    NetworkMetrics {
        node_metrics,
        global_metrics: GlobalMetrics {
            network_size: g.node_count(),
            edge_count: g.input_edge_count(),
        },
    }
}

impl NetworkMetrics {
    /// Metrics for `id`, if `id` was in the node list of a non-empty network.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NodeMetrics> {
        self.node_metrics.get(id)
    }

    /// `true` when no node has metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_metrics.is_empty()
    }
}
