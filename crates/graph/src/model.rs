//! Simple weighted undirected graph model.

use mathviz_core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest allowed edge weight.
pub const MIN_WEIGHT: u32 = 1;
/// Largest allowed edge weight.
pub const MAX_WEIGHT: u32 = 20;

/// A graph vertex with canvas coordinates for layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// An undirected weighted edge. `source`/`target` order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: u32,
}

impl Edge {
    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: usize) -> Option<usize> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    /// Unordered pair key: `(min, max)` of the endpoints.
    pub fn key(&self) -> (usize, usize) {
        pair_key(self.source, self.target)
    }
}

pub(crate) fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// A simple weighted undirected graph.
///
/// Node ids are `0..n-1` in order, edges have no self-loops, each unordered
/// pair appears at most once, and weights lie in `[MIN_WEIGHT, MAX_WEIGHT]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphModel {
    /// Builds a graph from `(source, target, weight)` triples, laying the
    /// nodes out evenly on a circle.
    ///
    /// Returns an error if any invariant is violated.
    pub fn from_edges(
        node_count: usize,
        edges: &[(usize, usize, u32)],
    ) -> Result<Self, EngineError> {
        if node_count == 0 {
            return Err(EngineError::InvalidNodeCount);
        }
        let nodes = (0..node_count)
            .map(|id| {
                let angle = std::f64::consts::TAU * id as f64 / node_count as f64;
                Node {
                    id,
                    x: 250.0 + 150.0 * angle.cos(),
                    y: 200.0 + 150.0 * angle.sin(),
                    label: label_for(id),
                }
            })
            .collect();
        let edges = edges
            .iter()
            .map(|&(source, target, weight)| Edge {
                source,
                target,
                weight,
            })
            .collect();
        let graph = Self { nodes, edges };
        graph.validate()?;
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks every structural invariant.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.nodes.is_empty() {
            return Err(EngineError::InvalidNodeCount);
        }
        let count = self.nodes.len();
        if let Some(node) = self.nodes.iter().enumerate().find(|(i, n)| n.id != *i) {
            return Err(EngineError::InvalidParam {
                name: "nodes".into(),
                reason: format!("node at position {} has id {}", node.0, node.1.id),
            });
        }
        let mut seen = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            for id in [edge.source, edge.target] {
                if id >= count {
                    return Err(EngineError::NodeNotFound { id, count });
                }
            }
            if edge.source == edge.target {
                return Err(EngineError::InvalidParam {
                    name: "edges".into(),
                    reason: format!("self-loop on node {}", edge.source),
                });
            }
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&edge.weight) {
                return Err(EngineError::InvalidParam {
                    name: "edges".into(),
                    reason: format!(
                        "weight {} outside [{MIN_WEIGHT}, {MAX_WEIGHT}]",
                        edge.weight
                    ),
                });
            }
            if !seen.insert(edge.key()) {
                return Err(EngineError::InvalidParam {
                    name: "edges".into(),
                    reason: format!("duplicate edge {:?}", edge.key()),
                });
            }
        }
        Ok(())
    }
}

/// Number of distinct unordered pairs among `node_count` nodes.
pub fn max_edges(node_count: usize) -> usize {
    node_count.saturating_mul(node_count.saturating_sub(1)) / 2
}

/// Spreadsheet-style label: `A`..`Z`, then `AA`, `AB`, …
pub fn label_for(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_alphabet_then_wrap() {
        assert_eq!(label_for(0), "A");
        assert_eq!(label_for(5), "F");
        assert_eq!(label_for(25), "Z");
        assert_eq!(label_for(26), "AA");
        assert_eq!(label_for(27), "AB");
        assert_eq!(label_for(26 + 26 * 26), "AAA");
    }

    #[test]
    fn max_edges_counts_unordered_pairs() {
        assert_eq!(max_edges(0), 0);
        assert_eq!(max_edges(1), 0);
        assert_eq!(max_edges(4), 6);
        assert_eq!(max_edges(6), 15);
    }

    #[test]
    fn edge_other_walks_either_direction() {
        let e = Edge {
            source: 2,
            target: 5,
            weight: 3,
        };
        assert_eq!(e.other(2), Some(5));
        assert_eq!(e.other(5), Some(2));
        assert_eq!(e.other(1), None);
        assert_eq!(e.key(), (2, 5));
    }

    #[test]
    fn from_edges_builds_valid_graph() {
        let g = GraphModel::from_edges(3, &[(0, 1, 4), (2, 1, 7)]).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.nodes[2].label, "C");
        assert_eq!(g.edges[1].weight, 7);
    }

    #[test]
    fn from_edges_rejects_self_loop() {
        let result = GraphModel::from_edges(3, &[(1, 1, 4)]);
        assert!(matches!(result, Err(EngineError::InvalidParam { .. })));
    }

    #[test]
    fn from_edges_rejects_reversed_duplicate() {
        let result = GraphModel::from_edges(3, &[(0, 1, 4), (1, 0, 2)]);
        assert!(matches!(result, Err(EngineError::InvalidParam { .. })));
    }

    #[test]
    fn from_edges_rejects_out_of_range_node() {
        let result = GraphModel::from_edges(2, &[(0, 2, 4)]);
        assert!(matches!(
            result,
            Err(EngineError::NodeNotFound { id: 2, count: 2 })
        ));
    }

    #[test]
    fn from_edges_rejects_weight_out_of_range() {
        assert!(GraphModel::from_edges(2, &[(0, 1, 0)]).is_err());
        assert!(GraphModel::from_edges(2, &[(0, 1, 21)]).is_err());
    }

    #[test]
    fn from_edges_rejects_empty_graph() {
        assert!(matches!(
            GraphModel::from_edges(0, &[]),
            Err(EngineError::InvalidNodeCount)
        ));
    }
}
