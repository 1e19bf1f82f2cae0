//! Summary statistics for the connected subgraph.
//!
//! # Statistics Provided
//!
//! - **listed_node_count**: Distinct ids in the input node list.
//! - **node_count**: Connected nodes (N), the population every metric uses.
//! - **isolated_node_count**: Listed nodes with no edge at all.
//! - **input_edge_count**: Edges in the input, unfiltered.
//! - **edge_count**: Edges with both endpoints connected and listed.
//! - **density**: `edge_count / (N * (N - 1))`. Zero when N < 2. Parallel
//!   edges and self-loops are counted, so the value can exceed 1.0.
//! - **weakly_connected_component_count**: Disjoint clusters of claims.
//! - **scc_count** / **cycle_count**: Strongly connected components, and how
//!   many of them contain more than one node (argument cycles).
//! - **self_loop_count**, **dangling_node_count**: Self-referencing edges and
//!   connected nodes with no outgoing edge.
//! - **max_in_degree** / **max_out_degree**: Over the connected subgraph.

use petgraph::{
    Direction,
    algo::{connected_components, tarjan_scc},
    visit::EdgeRef,
};
use serde::Serialize;

use crate::graph::build::MetricsGraph;

/// Summary statistics for a claim network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub listed_node_count: usize,
    pub node_count: usize,
    pub isolated_node_count: usize,
    pub input_edge_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub weakly_connected_component_count: usize,
    pub scc_count: usize,
    pub cycle_count: usize,
    pub self_loop_count: usize,
    pub dangling_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a [`MetricsGraph`].
    #[must_use]
    pub fn from_graph(g: &MetricsGraph) -> Self {
        let graph = &g.graph;
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        #[allow(clippy::cast_precision_loss)]
        let density = if node_count < 2 {
            0.0
        } else {
            edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
        };

        let weakly_connected_component_count = if node_count == 0 {
            0
        } else {
            connected_components(graph)
        };

        let sccs = tarjan_scc(graph);
        let cycle_count = sccs.iter().filter(|scc| scc.len() > 1).count();

        let self_loop_count = graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        let dangling_node_count = g.node_indices().filter(|&i| g.out_degree(i) == 0).count();

        let max_in_degree = graph
            .node_indices()
            .map(|n| graph.edges_directed(n, Direction::Incoming).count())
            .max()
            .unwrap_or(0);
        let max_out_degree = graph
            .node_indices()
            .map(|n| graph.edges_directed(n, Direction::Outgoing).count())
            .max()
            .unwrap_or(0);

        Self {
            listed_node_count: g.listed_node_count(),
            node_count,
            isolated_node_count: g.listed_node_count() - node_count,
            input_edge_count: g.input_edge_count(),
            edge_count,
            density,
            weakly_connected_component_count,
            scc_count: sccs.len(),
            cycle_count,
            self_loop_count,
            dangling_node_count,
            max_in_degree,
            max_out_degree,
        }
    }
}
