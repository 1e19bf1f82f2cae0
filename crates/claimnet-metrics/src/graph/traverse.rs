//! Direction-respecting breadth-first search.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;

use crate::graph::build::MetricsGraph;

/// Hop distance from `source` to every connected node, `None` when
/// unreachable.
///
/// The walk follows the raw [`AdjacencyIndex`](crate::graph::build::AdjacencyIndex),
/// so paths may pass through edge endpoints missing from the node list.
/// Only connected nodes get a slot in the result. Edges are followed only
/// in their stated direction; the source itself is at distance 0 (a
/// self-loop does not change that).
#[must_use]
pub fn hop_distances(g: &MetricsGraph, source: NodeIndex) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; g.node_count()];
    let Some(source_id) = g.node_id(source) else {
        return dist;
    };
    let adjacency = g.adjacency();

    let mut seen: HashSet<&str> = HashSet::from([source_id]);
    let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(source_id, 0)]);

    while let Some((id, d)) = queue.pop_front() {
        if let Some(idx) = g.node_index(id) {
            dist[idx.index()] = Some(d);
        }
        for next in adjacency.successors(id) {
            if seen.insert(next.as_str()) {
                queue.push_back((next.as_str(), d + 1));
            }
        }
    }

    dist
}
