use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use log::warn;
use num_traits::{Float, Zero};

use crate::algorithm::cancel::CancellationToken;
use crate::graph::Graph;
use crate::{Error, Result};

/// Shortest known distance from one start node to every node of the graph,
/// keyed by node key. Unreachable nodes map to positive infinity.
pub type DistanceMap<W = f64> = HashMap<String, W>;

/// Result of a single-source run, in vertex-index space
#[derive(Debug, Clone)]
pub struct ShortestPathTree<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex (infinity when unreachable)
    pub distances: Vec<W>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

/// A reconstructed start-to-end path
#[derive(Debug, Clone, PartialEq)]
pub struct Path<W = f64> {
    /// Node keys from start to end, both included
    pub nodes: Vec<String>,
    /// Total weight of the path
    pub cost: W,
}

impl<W> ShortestPathTree<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Converts the distances to a key-indexed map covering every node
    pub fn distance_map<G: Graph<W>>(&self, graph: &G) -> DistanceMap<W> {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(v, &d)| graph.key_of(v).map(|k| (k.to_string(), d)))
            .collect()
    }

    /// True if `target` got a finite distance
    pub fn is_reachable(&self, target: usize) -> bool {
        self.distances
            .get(target)
            .map_or(false, |d| d.is_finite())
    }

    /// Walks predecessor links back from `target` to the source.
    ///
    /// Returns `None` when the target is unreachable, when the chain ends
    /// before reaching the source, or when it revisits a vertex.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        let mut seen = HashSet::new();

        while current != self.source {
            if !seen.insert(current) {
                warn!("cycle in predecessor chain at vertex {}", current);
                return None;
            }
            path.push(current);
            current = self.predecessors.get(current).copied().flatten()?;
        }

        path.push(self.source);
        path.reverse();
        Some(path)
    }
}

/// Trait for single-source shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Compute shortest paths from a source vertex to all other vertices,
    /// polling `cancel` (if any) once per visited vertex.
    fn compute_from(
        &self,
        graph: &G,
        source: usize,
        cancel: Option<&CancellationToken>,
    ) -> Result<ShortestPathTree<W>>;

    /// Compute shortest paths from the node stored under `start`
    fn compute_shortest_paths(&self, graph: &G, start: &str) -> Result<ShortestPathTree<W>> {
        let source = graph
            .index_of(start)
            .ok_or_else(|| Error::NodeNotFound(start.to_string()))?;
        self.compute_from(graph, source, None)
    }

    /// Distance map from `start`; the unit of work of the parallel mode
    fn distances(
        &self,
        graph: &G,
        start: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<DistanceMap<W>> {
        let source = graph
            .index_of(start)
            .ok_or_else(|| Error::NodeNotFound(start.to_string()))?;
        let tree = self.compute_from(graph, source, cancel)?;
        Ok(tree.distance_map(graph))
    }

    /// Shortest path between two nodes, with its cost
    fn shortest_path(&self, graph: &G, start: &str, end: &str) -> Result<Path<W>> {
        let target = graph
            .index_of(end)
            .ok_or_else(|| Error::NodeNotFound(end.to_string()))?;
        let tree = self.compute_shortest_paths(graph, start)?;

        let not_found = || Error::PathNotFound {
            start: start.to_string(),
            end: end.to_string(),
        };
        let vertices = tree.path_to(target).ok_or_else(not_found)?;

        let nodes = vertices
            .iter()
            .map(|&v| graph.key_of(v).map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(not_found)?;

        Ok(Path {
            nodes,
            cost: tree.distances[target],
        })
    }
}
