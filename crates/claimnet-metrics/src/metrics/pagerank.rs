//! PageRank by power iteration with dangling-mass redistribution.
//!
//! # Algorithm
//!
//! Over the connected subgraph of N nodes, starting from `1/N` everywhere:
//!
//! ```text
//! PR'(v) = (1 - d) / N + d * ( Σ PR(u) / out_degree(u)  for each edge u → v
//!                            + dangling_sum / N )
//! ```
//!
//! where `dangling_sum` is the rank held by nodes with no outgoing edge.
//! Iteration stops when the L1 distance between successive vectors drops
//! below the tolerance, or after `max_iter` rounds.
//!
//! The final vector is divided by its sum. Out-degree counts edges to
//! endpoints outside the node list, and the rank sent along those edges is
//! lost; renormalization restores a total of exactly 1.
//!
//! A self-loop is an ordinary outgoing edge: the node is not dangling and
//! sends rank to itself.

use std::collections::HashMap;

use claimnet_core::config::MetricsConfig;
use tracing::{debug, instrument, warn};

use crate::graph::build::MetricsGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl From<&MetricsConfig> for PageRankConfig {
    fn from(cfg: &MetricsConfig) -> Self {
        Self {
            damping: cfg.damping,
            tolerance: cfg.tolerance,
            max_iter: cfg.max_iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// PageRank scores: node ID → score. Sums to 1 over a non-empty graph.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank over the connected subgraph.
#[must_use]
#[instrument(skip(g, config), fields(n = g.node_count()))]
pub fn pagerank(g: &MetricsGraph, config: &PageRankConfig) -> PageRankResult {
    let ranks = pagerank_vector(g, config);
    PageRankResult {
        scores: g.label_scores(&ranks.values),
        iterations: ranks.iterations,
        converged: ranks.converged,
    }
}

pub(crate) struct RankVector {
    pub values: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Index-aligned PageRank; see [`pagerank`].
pub(crate) fn pagerank_vector(g: &MetricsGraph, config: &PageRankConfig) -> RankVector {
    let n = g.node_count();

    if n == 0 {
        return RankVector {
            values: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;

    let dangling: Vec<usize> = g
        .node_indices()
        .filter(|&i| g.out_degree(i) == 0)
        .map(|i| i.index())
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling_sum: f64 = dangling.iter().map(|&i| ranks[i]).sum();
        let fill = config.damping.mul_add(dangling_sum / n_f64, base);
        new_ranks.fill(fill);

        for node in g.node_indices() {
            let out_degree = g.out_degree(node);
            if out_degree == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let share = config.damping * ranks[node.index()] / out_degree as f64;
            for &succ in g.successors(node) {
                new_ranks[succ.index()] += share;
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(iterations, "PageRank did not converge within max_iter");
    }

    let total: f64 = ranks.iter().sum();
    if (total - 1.0).abs() > 1e-9 {
        debug!(total, "renormalizing PageRank mass");
    }
    if total > 0.0 {
        for r in &mut ranks {
            *r /= total;
        }
    }

    debug!(iterations, converged, "PageRank finished");

    RankVector {
        values: ranks,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use claimnet_core::{Edge, Node};

    fn build(ids: &[&str], pairs: &[(&str, &str)]) -> MetricsGraph {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id)).collect();
        let edges: Vec<Edge> = pairs.iter().map(|(a, b)| Edge::new(*a, *b)).collect();
        MetricsGraph::build(&nodes, &edges)
    }

    fn total(result: &PageRankResult) -> f64 {
        result.scores.values().sum()
    }

    #[test]
    fn empty_graph_returns_empty() {
        let g = build(&["A"], &[]);
        let pr = pagerank(&g, &PageRankConfig::default());
        assert!(pr.scores.is_empty());
        assert!(pr.converged);
        assert_eq!(pr.iterations, 0);
    }

    #[test]
    fn mutual_pair_splits_evenly() {
        let g = build(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let pr = pagerank(&g, &PageRankConfig::default());
        assert!((pr.scores["A"] - 0.5).abs() < 1e-9);
        assert!((pr.scores["B"] - 0.5).abs() < 1e-9);
        assert!(pr.converged);
    }

    #[test]
    fn chain_sink_ranks_highest() {
        let g = build(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let pr = pagerank(&g, &PageRankConfig::default());
        assert!(pr.scores["C"] > pr.scores["B"]);
        assert!(pr.scores["B"] > pr.scores["A"]);
        assert!((total(&pr) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dangling_mass_is_redistributed() {
        // Without redistribution the leaves would drain the star and the
        // raw total would fall well below 1 before renormalization.
        let g = build(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("A", "C"), ("A", "D"), ("A", "E")],
        );
        let ranks = pagerank_vector(&g, &PageRankConfig::default());
        assert!(ranks.converged);
        let sum: f64 = ranks.values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);

        let a = ranks.values[0];
        for leaf in &ranks.values[1..] {
            assert!(*leaf > a, "each leaf receives A's rank on top of teleport mass");
        }
    }

    #[test]
    fn self_loop_only_gets_full_rank() {
        let g = build(&["A"], &[("A", "A")]);
        let pr = pagerank(&g, &PageRankConfig::default());
        assert!((pr.scores["A"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn leak_to_unlisted_target_is_renormalized() {
        let g = build(&["A", "B"], &[("A", "B"), ("A", "ghost")]);
        let pr = pagerank(&g, &PageRankConfig::default());
        assert!((total(&pr) - 1.0).abs() < 1e-9);
        assert!(!pr.scores.contains_key("ghost"));
    }

    #[test]
    fn max_iter_caps_iterations() {
        let g = build(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let cfg = PageRankConfig {
            tolerance: 0.0,
            max_iter: 7,
            ..PageRankConfig::default()
        };
        let pr = pagerank(&g, &cfg);
        assert_eq!(pr.iterations, 7);
        assert!(!pr.converged);
        assert!((total(&pr) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn config_conversion_keeps_values() {
        let cfg = MetricsConfig {
            damping: 0.5,
            tolerance: 1e-3,
            max_iterations: 12,
        };
        let pr_cfg = PageRankConfig::from(&cfg);
        assert!((pr_cfg.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(pr_cfg.max_iter, 12);
    }
}
