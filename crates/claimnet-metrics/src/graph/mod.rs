//! Graph module for the metrics engine.
//!
//! # Overview
//!
//! Builds the adjacency and the connected subgraph every centrality metric
//! works on. Nothing here is cached: a [`MetricsGraph`] is rebuilt from the
//! caller's node and edge lists on each call.
//!
//! ## Pipeline
//!
//! ```text
//! &[Node], &[Edge]
//!        ↓  build::AdjacencyIndex::from_edges()
//! AdjacencyIndex (id → successors, edge order, duplicates kept)
//!        ↓  build::MetricsGraph::build()
//! MetricsGraph (connected subgraph, petgraph DiGraph + ordered successors)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, components, cycles, …)
//! ```

pub mod build;
pub mod stats;
pub mod traverse;

pub use build::{AdjacencyIndex, MetricsGraph};
pub use stats::GraphStats;
