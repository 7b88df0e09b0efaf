//! Error types for the mathviz engines.

use thiserror::Error;

/// Errors produced by engine construction and evaluation.
///
/// Degenerate-but-defined inputs (non-prime RSA factors, unreachable graph
/// nodes, empty sort input) are never errors; only requests that cannot be
/// answered at all end up here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A sampling domain had `min >= max` or a non-finite bound.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Grid resolution was zero, or the grid would exceed the sampler's point limit.
    #[error("invalid resolution: must be at least 1 and keep the grid within the point limit")]
    InvalidResolution,

    /// A graph was requested with no nodes.
    #[error("invalid node count: a graph needs at least one node")]
    InvalidNodeCount,

    /// More edges were requested than distinct unordered node pairs exist.
    #[error("too many edges: requested {requested}, but {nodes} nodes allow at most {max}")]
    TooManyEdges {
        requested: usize,
        nodes: usize,
        max: usize,
    },

    /// A node id did not exist in the graph.
    #[error("node {id} not found in graph of {count} nodes")]
    NodeNotFound { id: usize, count: usize },

    /// A parameter value was outside what the engine can compute with.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// An engine name was not recognized by the registry.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// Reading or writing a snapshot or preset failed.
    #[error("io error: {0}")]
    Io(String),
}
