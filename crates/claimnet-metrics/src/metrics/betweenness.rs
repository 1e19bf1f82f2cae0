//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. In a claim network, high-betweenness claims
//! are the bridges an argument has to pass through.
//!
//! # Algorithm
//!
//! Brandes (2001), unweighted and directed:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    (`sigma`), distances and predecessor lists.
//! 2. Accumulate dependency scores in reverse BFS order (farthest first).
//! 3. Sum the dependency scores across all sources, skipping `s` itself.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Scores are divided by `(N-1)(N-2)`, the number of ordered pairs that
//! could route through a node. For N < 3 that product is zero and the raw
//! (necessarily zero) scores are returned.
//!
//! # Traversal order
//!
//! Successors are visited in edge-list order. That decides the order nodes
//! enter the BFS stack, not the totals: every shortest path is counted
//! through `sigma`, so sums are independent of edge order up to
//! floating-point rounding. Parallel edges count as distinct paths.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::graph::build::MetricsGraph;

/// Normalized betweenness centrality for every connected node.
#[must_use]
#[instrument(skip(g), fields(n = g.node_count()))]
pub fn betweenness_centrality(g: &MetricsGraph) -> HashMap<String, f64> {
    g.label_scores(&betweenness_vector(g))
}

pub(crate) fn betweenness_vector(g: &MetricsGraph) -> Vec<f64> {
    let mut cb = raw_betweenness(g);
    let n = g.node_count();

    let scale = n.saturating_sub(1) * n.saturating_sub(2);
    if scale > 0 {
        #[allow(clippy::cast_precision_loss)]
        let scale = scale as f64;
        for score in &mut cb {
            *score /= scale;
        }
    }

    cb
}

/// Unnormalized Brandes accumulation, index-aligned with `g`.
fn raw_betweenness(g: &MetricsGraph) -> Vec<f64> {
    let n = g.node_count();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in g.node_indices() {
        let si = s.index();

        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);

        // predecessors[w]: nodes immediately preceding w on shortest paths from s.
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);

            for &w in g.successors(v) {
                let wi = w.index();

                // First visit to w?
                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
