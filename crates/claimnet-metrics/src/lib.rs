#![forbid(unsafe_code)]
//! claimnet-metrics library.
//!
//! Graph-centrality engine for claim networks: PageRank, harmonic
//! centrality, reachability ratio and Brandes betweenness, restricted to
//! the nodes that touch at least one edge.
//!
//! # Conventions
//!
//! - **Errors**: The engine is total over well-typed input and returns no
//!   `Result`; degenerate graphs yield zeros, never NaN.
//! - **Logging**: Use `tracing` macros (`debug!`, `warn!`, `trace!`).

pub mod graph;
pub mod metrics;

pub use graph::{AdjacencyIndex, GraphStats, MetricsGraph};
pub use metrics::network::{GlobalMetrics, NetworkMetrics, NodeMetrics, compute, compute_with};
pub use metrics::pagerank::PageRankConfig;
pub use metrics::range::{MetricKind, MetricRange, UnknownMetric};
