#![deny(unsafe_code)]
//! Shortest-path engine.
//!
//! Generates a small random weighted graph from a seed, runs Dijkstra from a
//! chosen source, and replays the recorded trace one selection per tick so a
//! renderer can highlight the current node, the visited set, and the
//! tentative distances as they settle.

pub mod dijkstra;
pub mod generate;
pub mod model;

pub use dijkstra::{shortest_paths, PathStep, ShortestPaths};
pub use generate::generate;
pub use model::{Edge, GraphModel, Node};

use mathviz_core::error::EngineError;
use mathviz_core::params::param_usize;
use mathviz_core::prng::Xorshift64;
use mathviz_core::Engine;
use serde_json::{json, Value};

/// Default number of graph nodes.
const DEFAULT_NODE_COUNT: usize = 6;
/// Default number of graph edges.
const DEFAULT_EDGE_COUNT: usize = 9;
/// Default Dijkstra source node.
const DEFAULT_SOURCE: usize = 0;
/// Largest graph the engine generates; labels run `A`..`Z`, `AA`..`AZ`.
pub const MAX_NODE_COUNT: usize = 52;

/// Parameters for the shortest-path engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParams {
    pub node_count: usize,
    pub edge_count: usize,
    pub source: usize,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            edge_count: DEFAULT_EDGE_COUNT,
            source: DEFAULT_SOURCE,
        }
    }
}

impl PathParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            node_count: param_usize(params, "node_count", DEFAULT_NODE_COUNT),
            edge_count: param_usize(params, "edge_count", DEFAULT_EDGE_COUNT),
            source: param_usize(params, "source", DEFAULT_SOURCE),
        }
    }
}

/// Dijkstra replay engine.
///
/// The whole run is computed on construction; `step()` only moves the cursor
/// through the trace. The frame always carries the graph and the current
/// snapshot, and adds the final distances and predecessors once the cursor
/// reaches the last snapshot.
pub struct ShortestPath {
    graph: GraphModel,
    result: ShortestPaths,
    params: PathParams,
    cursor: usize,
}

impl ShortestPath {
    /// Generates a graph from `seed` and runs Dijkstra over it.
    ///
    /// Fails with `InvalidNodeCount`/`TooManyEdges` for an infeasible graph
    /// request, `InvalidParam` for more than [`MAX_NODE_COUNT`] nodes and
    /// `NodeNotFound` for an out-of-range source.
    pub fn new(seed: u64, params: PathParams) -> Result<Self, EngineError> {
        if params.node_count > MAX_NODE_COUNT {
            return Err(EngineError::InvalidParam {
                name: "node_count".into(),
                reason: format!(
                    "{} exceeds the maximum of {MAX_NODE_COUNT}",
                    params.node_count
                ),
            });
        }
        let mut rng = Xorshift64::new(seed);
        let graph = generate(params.node_count, params.edge_count, &mut rng)?;
        Self::with_graph(graph, params.source)
    }

    /// Runs Dijkstra over a caller-supplied graph.
    pub fn with_graph(graph: GraphModel, source: usize) -> Result<Self, EngineError> {
        graph.validate()?;
        let result = shortest_paths(&graph, source)?;
        let params = PathParams {
            node_count: graph.node_count(),
            edge_count: graph.edges.len(),
            source,
        };
        Ok(Self {
            graph,
            result,
            params,
            cursor: 0,
        })
    }

    /// Creates the engine from a JSON params object.
    pub fn from_json(seed: u64, params: &Value) -> Result<Self, EngineError> {
        Self::new(seed, PathParams::from_json(params))
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn result(&self) -> &ShortestPaths {
        &self.result
    }

    /// Snapshot currently shown.
    pub fn current_step(&self) -> &PathStep {
        &self.result.trace[self.cursor]
    }
}

impl Engine for ShortestPath {
    fn step(&mut self) -> Result<(), EngineError> {
        if !self.is_finished() {
            self.cursor += 1;
        }
        Ok(())
    }

    fn frame(&self) -> Value {
        let mut frame = json!({
            "graph": self.graph,
            "step_index": self.cursor,
            "step_count": self.result.trace.len(),
            "step": self.current_step(),
        });
        if self.is_finished() {
            frame["distances"] = json!(self.result.distances);
            frame["predecessors"] = json!(self.result.predecessors);
        }
        frame
    }

    fn is_finished(&self) -> bool {
        self.cursor + 1 >= self.result.trace.len()
    }

    fn params(&self) -> Value {
        json!({
            "node_count": self.params.node_count,
            "edge_count": self.params.edge_count,
            "source": self.params.source,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "node_count": {
                "type": "integer",
                "default": DEFAULT_NODE_COUNT,
                "min": 1,
                "max": MAX_NODE_COUNT,
                "description": "Number of graph nodes, labeled A..Z then AA, AB, ..."
            },
            "edge_count": {
                "type": "integer",
                "default": DEFAULT_EDGE_COUNT,
                "min": 0,
                "description": "Number of distinct edges; at most node_count * (node_count - 1) / 2"
            },
            "source": {
                "type": "integer",
                "default": DEFAULT_SOURCE,
                "min": 0,
                "description": "Node id Dijkstra starts from"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond_engine() -> ShortestPath {
        let g = GraphModel::from_edges(4, &[(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 5), (2, 3, 8)])
            .unwrap();
        ShortestPath::with_graph(g, 0).unwrap()
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        let engine = ShortestPath::from_json(42, &json!({})).unwrap();
        assert_eq!(engine.graph().nodes.len(), DEFAULT_NODE_COUNT);
        assert_eq!(engine.graph().edges.len(), DEFAULT_EDGE_COUNT);
        assert_eq!(engine.params()["source"], 0);
    }

    #[test]
    fn from_json_rejects_too_many_edges() {
        let result = ShortestPath::from_json(42, &json!({"node_count": 3, "edge_count": 4}));
        assert!(matches!(result, Err(EngineError::TooManyEdges { .. })));
    }

    #[test]
    fn node_count_above_schema_max_is_rejected() {
        for nodes in [MAX_NODE_COUNT as u64 + 1, u64::MAX] {
            match ShortestPath::from_json(1, &json!({ "node_count": nodes, "edge_count": 0 })) {
                Err(EngineError::InvalidParam { name, .. }) => assert_eq!(name, "node_count"),
                Err(other) => panic!("unexpected error: {other}"),
                Ok(_) => panic!("node_count {nodes} accepted"),
            }
        }
    }

    #[test]
    fn largest_graph_uses_two_letter_labels() {
        let params = json!({ "node_count": MAX_NODE_COUNT, "edge_count": 60 });
        let engine = ShortestPath::from_json(3, &params).unwrap();
        let schema = engine.param_schema();
        assert_eq!(schema["node_count"]["max"], MAX_NODE_COUNT);
        let labels: Vec<&str> = engine.graph().nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels.len(), MAX_NODE_COUNT);
        assert_eq!((labels[25], labels[26], labels[51]), ("Z", "AA", "AZ"));
    }

    #[test]
    fn from_json_rejects_unknown_source() {
        let result = ShortestPath::from_json(42, &json!({"source": 6}));
        assert!(matches!(result, Err(EngineError::NodeNotFound { .. })));
    }

    #[test]
    fn step_walks_the_trace_then_stops() {
        let mut engine = diamond_engine();
        let mut shown = vec![engine.current_step().current];
        while !engine.is_finished() {
            engine.step().unwrap();
            shown.push(engine.current_step().current);
        }
        assert_eq!(shown, vec![0, 2, 1, 3]);
        engine.step().unwrap();
        assert_eq!(engine.frame()["step_index"], 3);
    }

    #[test]
    fn frame_adds_final_result_only_when_finished() {
        let mut engine = diamond_engine();
        assert!(engine.frame().get("distances").is_none());
        for _ in 0..3 {
            engine.step().unwrap();
        }
        let frame = engine.frame();
        assert_eq!(frame["distances"], json!([0, 3, 1, 8]));
        assert_eq!(frame["predecessors"], json!([null, 2, 0, 1]));
    }

    #[test]
    fn unreachable_distances_render_as_null() {
        let g = GraphModel::from_edges(3, &[(0, 1, 2)]).unwrap();
        let mut engine = ShortestPath::with_graph(g, 0).unwrap();
        engine.step().unwrap();
        assert_eq!(engine.frame()["distances"], json!([0, 2, null]));
    }

    #[test]
    fn same_seed_same_frames() {
        let a = ShortestPath::from_json(5, &json!({})).unwrap();
        let b = ShortestPath::from_json(5, &json!({})).unwrap();
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn param_schema_covers_every_param() {
        let engine = ShortestPath::from_json(1, &json!({})).unwrap();
        let schema = engine.param_schema();
        for key in engine.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing parameter: {key}");
        }
    }

    #[test]
    fn engine_is_object_safe() {
        let boxed: Box<dyn Engine> = Box::new(diamond_engine());
        assert!(!boxed.is_finished());
    }
}
