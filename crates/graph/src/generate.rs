//! Random simple weighted graph generation.

use crate::model::{
    label_for, max_edges, pair_key, Edge, GraphModel, Node, MAX_WEIGHT, MIN_WEIGHT,
};
use mathviz_core::error::EngineError;
use mathviz_core::prng::RandomSource;
use std::collections::HashSet;

/// Horizontal extent of the layout canvas, `[min, max)`.
pub const CANVAS_X: (f64, f64) = (50.0, 450.0);
/// Vertical extent of the layout canvas, `[min, max)`.
pub const CANVAS_Y: (f64, f64) = (50.0, 350.0);

/// Generates a random simple weighted undirected graph.
///
/// Nodes get uniform-random coordinates inside [`CANVAS_X`] × [`CANVAS_Y`] and
/// labels `A, B, C, …` by index. Edges are drawn by rejection sampling: a
/// random ordered pair and a weight in `[1, 20]` are drawn together, and the
/// draw is discarded if it is a self-loop or repeats an unordered pair.
///
/// Returns `EngineError::InvalidNodeCount` for zero nodes and
/// `EngineError::TooManyEdges` when `edge_count` exceeds the number of
/// distinct pairs, which would otherwise never terminate.
pub fn generate<R>(
    node_count: usize,
    edge_count: usize,
    rng: &mut R,
) -> Result<GraphModel, EngineError>
where
    R: RandomSource + ?Sized,
{
    if node_count == 0 {
        return Err(EngineError::InvalidNodeCount);
    }
    let max = max_edges(node_count);
    if edge_count > max {
        log::warn!(
            "rejecting graph request: {edge_count} edges over {node_count} nodes (max {max})"
        );
        return Err(EngineError::TooManyEdges {
            requested: edge_count,
            nodes: node_count,
            max,
        });
    }

    let nodes = (0..node_count)
        .map(|id| {
            let x = rng.next_range(CANVAS_X.0, CANVAS_X.1);
            let y = rng.next_range(CANVAS_Y.0, CANVAS_Y.1);
            Node {
                id,
                x,
                y,
                label: label_for(id),
            }
        })
        .collect();

    let weight_span = (MAX_WEIGHT - MIN_WEIGHT + 1) as usize;
    let mut used = HashSet::with_capacity(edge_count);
    let mut edges = Vec::with_capacity(edge_count);
    let mut draws = 0usize;
    while edges.len() < edge_count {
        let source = rng.next_usize(node_count);
        let target = rng.next_usize(node_count);
        let weight = MIN_WEIGHT + rng.next_usize(weight_span) as u32;
        draws += 1;
        if source == target || !used.insert(pair_key(source, target)) {
            continue;
        }
        edges.push(Edge {
            source,
            target,
            weight,
        });
    }
    log::debug!("generated graph: {node_count} nodes, {edge_count} edges in {draws} draws");

    Ok(GraphModel { nodes, edges })
}
