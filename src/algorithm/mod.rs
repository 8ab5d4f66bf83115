pub mod cancel;
pub mod dijkstra;
pub mod engine;
pub mod heap_dijkstra;
pub mod traits;

pub use cancel::CancellationToken;
pub use engine::EngineKind;
pub use traits::{DistanceMap, Path, ShortestPathAlgorithm, ShortestPathTree};

use crate::graph::KeyedGraph;
use crate::Result;

/// Distances from `start` to every node, using the frontier-scan engine.
///
/// Fails with `NodeNotFound` if `start` is not a node of `graph`.
pub fn shortest_paths(graph: &KeyedGraph<f64>, start: &str) -> Result<DistanceMap<f64>> {
    dijkstra::Dijkstra.distances(graph, start, None)
}

/// Shortest path from `start` to `end` with its total cost.
///
/// Fails with `NodeNotFound` if either key is missing and with
/// `PathNotFound` if `end` cannot be reached.
pub fn shortest_path(graph: &KeyedGraph<f64>, start: &str, end: &str) -> Result<Path<f64>> {
    dijkstra::Dijkstra.shortest_path(graph, start, end)
}
