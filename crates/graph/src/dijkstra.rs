//! Single-source shortest paths with a full per-iteration trace.
//!
//! The selection step is a linear scan over node ids rather than a heap: the
//! graphs are tiny, and the scan makes the tie-break rule (lowest id wins
//! among equal tentative distances) explicit and stable.

use crate::model::GraphModel;
use mathviz_core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot taken right after a node is selected, before its edges are relaxed.
///
/// `distances[i]` is `None` while node `i` is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub current: usize,
    pub visited: BTreeSet<usize>,
    pub distances: Vec<Option<u64>>,
}

/// Final distances and predecessors plus the ordered trace that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPaths {
    pub source: usize,
    pub distances: Vec<Option<u64>>,
    pub predecessors: Vec<Option<usize>>,
    pub trace: Vec<PathStep>,
}

impl ShortestPaths {
    /// Shortest distance from the source to `node`, `None` if unreachable or unknown.
    pub fn distance(&self, node: usize) -> Option<u64> {
        self.distances.get(node).copied().flatten()
    }

    /// Node sequence from the source to `target`, following predecessors.
    ///
    /// Returns `None` when `target` is unreachable or out of range.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut node = target;
        while let Some(prev) = self.predecessors[node] {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra from `source` over the undirected edge list of `graph`.
///
/// Each iteration selects the unvisited node with the smallest finite
/// tentative distance, preferring the lowest id on ties, records a
/// [`PathStep`], then relaxes every edge incident to it whose other endpoint
/// is still unvisited. The run stops once no unvisited node is reachable;
/// unreachable nodes keep a `None` distance and predecessor.
///
/// Returns `EngineError::NodeNotFound` if `source` is not a node of `graph`.
pub fn shortest_paths(graph: &GraphModel, source: usize) -> Result<ShortestPaths, EngineError> {
    let count = graph.node_count();
    if source >= count {
        return Err(EngineError::NodeNotFound { id: source, count });
    }

    let mut distances: Vec<Option<u64>> = vec![None; count];
    let mut predecessors: Vec<Option<usize>> = vec![None; count];
    let mut visited = BTreeSet::new();
    let mut trace = Vec::with_capacity(count);
    distances[source] = Some(0);

    while let Some((current, dist)) = select_next(&distances, &visited) {
        visited.insert(current);
        trace.push(PathStep {
            current,
            visited: visited.clone(),
            distances: distances.clone(),
        });

        for edge in &graph.edges {
            let Some(neighbor) = edge.other(current) else {
                continue;
            };
            if visited.contains(&neighbor) {
                continue;
            }
            let alt = dist + u64::from(edge.weight);
            if distances[neighbor].map_or(true, |d| alt < d) {
                distances[neighbor] = Some(alt);
                predecessors[neighbor] = Some(current);
            }
        }
    }

    log::debug!(
        "dijkstra from {source}: {} of {count} nodes reachable",
        trace.len()
    );
    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
        trace,
    })
}

/// Lowest-id unvisited node with the minimum finite distance.
fn select_next(distances: &[Option<u64>], visited: &BTreeSet<usize>) -> Option<(usize, u64)> {
    let mut best: Option<(usize, u64)> = None;
    for (id, dist) in distances.iter().enumerate() {
        let Some(d) = *dist else { continue };
        if visited.contains(&id) {
            continue;
        }
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((id, d));
        }
    }
    best
}
