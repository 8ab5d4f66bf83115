use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::algorithm::cancel::CancellationToken;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathTree};
use crate::graph::Graph;
use crate::{Error, Result};

/// Heap-free Dijkstra.
///
/// Keeps an explicit frontier of reached but unvisited vertices and scans it
/// for the minimum on every step, which is O(V) per step and O(V²) overall.
/// Ties are broken by frontier position, which is deterministic for a given
/// graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

/// Mutable state of one run
struct Search<W> {
    distances: Vec<W>,
    predecessors: Vec<Option<usize>>,
    visited: Vec<bool>,
    in_frontier: Vec<bool>,
    frontier: Vec<usize>,
}

impl<W> Search<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn new(n: usize, source: usize) -> Self {
        let mut distances = vec![W::infinity(); n];
        distances[source] = W::zero();
        Search {
            distances,
            predecessors: vec![None; n],
            visited: vec![false; n],
            in_frontier: vec![false; n],
            frontier: Vec::new(),
        }
    }

    /// Marks `u` visited and relaxes its outgoing edges
    fn visit<G: Graph<W>>(&mut self, graph: &G, u: usize) {
        self.visited[u] = true;
        let dist_u = self.distances[u];

        for (v, weight) in graph.outgoing_edges(u) {
            if self.visited[v] {
                continue;
            }
            if !self.in_frontier[v] {
                self.in_frontier[v] = true;
                self.frontier.push(v);
            }
            let new_dist = dist_u + weight;
            if new_dist < self.distances[v] {
                self.distances[v] = new_dist;
                self.predecessors[v] = Some(u);
            }
        }
    }

    /// Removes and returns the frontier vertex with the smallest finite
    /// distance, or `None` once nothing reachable is left.
    fn pop_minimum(&mut self) -> Option<usize> {
        let mut best: Option<(usize, W)> = None;
        for (pos, &v) in self.frontier.iter().enumerate() {
            let d = self.distances[v];
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((pos, d)),
            }
        }

        let (pos, dist) = best?;
        if !dist.is_finite() {
            return None;
        }
        let u = self.frontier.swap_remove(pos);
        self.in_frontier[u] = false;
        Some(u)
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra (linear scan)"
    }

    fn compute_from(
        &self,
        graph: &G,
        source: usize,
        cancel: Option<&CancellationToken>,
    ) -> Result<ShortestPathTree<W>> {
        let source_key = || {
            graph
                .key_of(source)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", source))
        };
        if !graph.has_vertex(source) {
            return Err(Error::NodeNotFound(source_key()));
        }
        let cancelled = || cancel.map_or(false, CancellationToken::is_cancelled);

        let mut search = Search::new(graph.vertex_count(), source);
        if cancelled() {
            return Err(Error::Cancelled(source_key()));
        }
        search.visit(graph, source);

        while let Some(u) = search.pop_minimum() {
            if cancelled() {
                return Err(Error::Cancelled(source_key()));
            }
            search.visit(graph, u);
        }

        Ok(ShortestPathTree {
            distances: search.distances,
            predecessors: search.predecessors,
            source,
        })
    }
}
