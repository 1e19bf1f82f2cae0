//! Graph construction from node and edge lists.
//!
//! # Overview
//!
//! Two structures are built once per metrics call:
//!
//! - [`AdjacencyIndex`]: id → successor ids, in edge-list order, over the
//!   raw input. Duplicates are preserved. A node with no outgoing edge has
//!   no entry at all; lookups treat a missing entry as empty.
//! - [`MetricsGraph`]: the connected subgraph, i.e. listed nodes that are
//!   the source or target of at least one edge, stored as a petgraph
//!   `DiGraph` with index-aligned successor lists and out-degrees.
//!
//! ## Unlisted endpoints
//!
//! An edge may name an endpoint that is not in the node list. Such an edge
//! counts toward its source's out-degree (so PageRank mass flowing along it
//! leaves the subgraph and is recovered by renormalization) and stays in the
//! [`AdjacencyIndex`], so distance-based metrics can walk through it.
//! Unlisted endpoints get no `NodeIndex` and never appear in any result.
//!
//! ## Duplicate node ids
//!
//! The first occurrence of an id wins; later duplicates are ignored.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use claimnet_core::{Edge, Node};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// AdjacencyIndex
// ---------------------------------------------------------------------------

/// Successor lists keyed by node id, in edge-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    successors: HashMap<String, Vec<String>>,
}

impl AdjacencyIndex {
    /// Append every edge's target to its source's successor list.
    #[must_use]
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut successors: HashMap<String, Vec<String>> = HashMap::new();
        for edge in edges {
            successors
                .entry(edge.source.clone())
                .or_default()
                .push(edge.target.clone());
        }
        Self { successors }
    }

    /// Successors of `id`, empty when `id` has no outgoing edge.
    #[must_use]
    pub fn successors(&self, id: &str) -> &[String] {
        self.successors.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of outgoing edges of `id`, parallel edges and self-loops included.
    #[must_use]
    pub fn out_degree(&self, id: &str) -> usize {
        self.successors(id).len()
    }
}

// ---------------------------------------------------------------------------
// MetricsGraph
// ---------------------------------------------------------------------------

/// The connected subgraph every metric operates on.
#[derive(Debug)]
pub struct MetricsGraph {
    /// Directed graph: nodes = connected ids, edges = input edges between them.
    pub graph: DiGraph<String, ()>,
    /// Mapping from node id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    adjacency: AdjacencyIndex,
    successors: Vec<Vec<NodeIndex>>,
    out_degree: Vec<usize>,
    listed_node_count: usize,
    input_edge_count: usize,
}

impl MetricsGraph {
    /// Build the connected subgraph of `nodes` under `edges`.
    ///
    /// Node indices follow node-list order; successor lists follow
    /// edge-list order.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let adjacency = AdjacencyIndex::from_edges(edges);

        let endpoints: HashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        let mut graph = DiGraph::<String, ()>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();
        let mut listed: HashSet<&str> = HashSet::with_capacity(nodes.len());

        for node in nodes {
            if !listed.insert(node.id.as_str()) {
                continue;
            }
            if endpoints.contains(node.id.as_str()) {
                let idx = graph.add_node(node.id.clone());
                node_map.insert(node.id.clone(), idx);
            }
        }

        for edge in edges {
            if let (Some(&a), Some(&b)) = (node_map.get(&edge.source), node_map.get(&edge.target)) {
                graph.add_edge(a, b, ());
            }
        }

        let mut successors = Vec::with_capacity(graph.node_count());
        let mut out_degree = Vec::with_capacity(graph.node_count());
        for id in graph.node_weights() {
            successors.push(
                adjacency
                    .successors(id)
                    .iter()
                    .filter_map(|t| node_map.get(t).copied())
                    .collect::<Vec<_>>(),
            );
            out_degree.push(adjacency.out_degree(id));
        }

        debug!(
            connected = graph.node_count(),
            internal_edges = graph.edge_count(),
            "built connected subgraph"
        );

        Self {
            graph,
            node_map,
            adjacency,
            successors,
            out_degree,
            listed_node_count: listed.len(),
            input_edge_count: edges.len(),
        }
    }

    /// Number of connected nodes (N).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// `true` when no listed node touches an edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of edges with both endpoints in the connected subgraph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of edges in the input, unfiltered.
    #[must_use]
    pub const fn input_edge_count(&self) -> usize {
        self.input_edge_count
    }

    /// Number of distinct ids in the input node list.
    #[must_use]
    pub const fn listed_node_count(&self) -> usize {
        self.listed_node_count
    }

    /// The raw adjacency this graph was derived from, unlisted endpoints
    /// included.
    #[must_use]
    pub const fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// Successors of `idx` inside the connected subgraph, in edge-list order.
    #[must_use]
    pub fn successors(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.successors[idx.index()]
    }

    /// Out-degree of `idx` over all input edges, including edges to
    /// unlisted endpoints.
    #[must_use]
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.out_degree[idx.index()]
    }

    /// Look up the `NodeIndex` for a node id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// The id stored at `idx`.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Connected node indices in node-list order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Pair each index-aligned score with its node id.
    #[must_use]
    pub(crate) fn label_scores(&self, scores: &[f64]) -> HashMap<String, f64> {
        self.graph
            .node_indices()
            .filter_map(|idx| {
                let id = self.graph.node_weight(idx)?;
                Some((id.clone(), scores[idx.index()]))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
