//! Centrality metrics for claim networks.
//!
//! # Overview
//!
//! Every metric operates on the connected subgraph built by
//! [`crate::graph::build::MetricsGraph`] and answers a different question
//! about a claim:
//!
//! - **PageRank** (`pagerank`): How much support flows into this claim?
//! - **Harmonic centrality** (`harmonic`): How close is everything this
//!   claim leads to?
//! - **Reachability ratio** (`reachability`): How much of the network does
//!   this claim lead to at all?
//! - **Betweenness centrality** (`betweenness`): Which claims bridge the
//!   others?
//!
//! [`network::compute`] runs all four and assembles the per-node result;
//! [`range`] supports picking one metric and ranking or shading by it.
//!
//! # Usage
//!
//! ```rust
//! use claimnet_core::{Edge, Node};
//! use claimnet_metrics::metrics::network::compute;
//!
//! let nodes = vec![Node::new("A"), Node::new("B"), Node::new("C")];
//! let edges = vec![Edge::new("A", "B"), Edge::new("B", "C")];
//!
//! let m = compute(&nodes, &edges);
//! assert_eq!(m.global_metrics.network_size, 3);
//! assert!((m.node_metrics["B"].betweenness_centrality - 0.5).abs() < 1e-12);
//! ```

pub mod betweenness;
pub mod harmonic;
pub mod network;
pub mod pagerank;
pub mod range;
pub mod reachability;
