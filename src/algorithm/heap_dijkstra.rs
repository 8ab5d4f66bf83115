use std::fmt::Debug;
use num_traits::{Float, Zero};
use ordered_float::OrderedFloat;

use crate::algorithm::cancel::CancellationToken;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathTree};
use crate::data_structures::MinHeap;
use crate::graph::Graph;
use crate::{Error, Result};

/// Binary-heap Dijkstra, O((V + E) log V).
///
/// Same contract as [`crate::algorithm::dijkstra::Dijkstra`]; meant for
/// graphs where the quadratic frontier scan becomes the bottleneck.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapDijkstra;

impl HeapDijkstra {
    pub fn new() -> Self {
        HeapDijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for HeapDijkstra
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra (binary heap)"
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

        let n = graph.vertex_count();
        let mut distances = vec![W::infinity(); n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];

        distances[source] = W::zero();

        let mut queue = MinHeap::with_capacity(n);
        queue.push(source, OrderedFloat(W::zero()));

        while let Some((u, OrderedFloat(dist_u))) = queue.pop() {
            // Stale entry: u was settled through a shorter path already
            if visited[u] {
                continue;
            }
            if cancel.map_or(false, CancellationToken::is_cancelled) {
                return Err(Error::Cancelled(source_key()));
            }
            visited[u] = true;

            for (v, weight) in graph.outgoing_edges(u) {
                if visited[v] {
                    continue;
                }
                let new_dist = dist_u + weight;
                if new_dist < distances[v] {
                    distances[v] = new_dist;
                    predecessors[v] = Some(u);
                    queue.push(v, OrderedFloat(new_dist));
                }
            }
        }

        Ok(ShortestPathTree {
            distances,
            predecessors,
            source,
        })
    }
}
