use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Trait representing a read-only weighted directed graph.
///
/// Vertices are addressed by a dense index in `0..vertex_count()`; each index
/// has a stable string key. Implementations are never mutated once handed to
/// an algorithm.
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex.
    /// An unknown vertex has no outgoing edges.
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Resolves a node key to its vertex index
    fn index_of(&self, key: &str) -> Option<usize>;

    /// Returns the key of a vertex index
    fn key_of(&self, vertex: usize) -> Option<&str>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if a node with this key exists
    fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get_edge_weight(from, to).is_some()
    }
}
