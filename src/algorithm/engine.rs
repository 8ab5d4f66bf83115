use std::fmt::{self, Debug};
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::cancel::CancellationToken;
use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::heap_dijkstra::HeapDijkstra;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathTree};
use crate::graph::Graph;
use crate::Result;

/// Runtime choice of minimum-selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Frontier scan, O(V²)
    #[default]
    Linear,
    /// Binary heap, O((V + E) log V)
    Heap,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Linear => write!(f, "linear"),
            EngineKind::Heap => write!(f, "heap"),
        }
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for EngineKind
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        match self {
            EngineKind::Linear => <Dijkstra as ShortestPathAlgorithm<W, G>>::name(&Dijkstra),
            EngineKind::Heap => <HeapDijkstra as ShortestPathAlgorithm<W, G>>::name(&HeapDijkstra),
        }
    }

    fn compute_from(
        &self,
        graph: &G,
        source: usize,
        cancel: Option<&CancellationToken>,
    ) -> Result<ShortestPathTree<W>> {
        match self {
            EngineKind::Linear => Dijkstra.compute_from(graph, source, cancel),
            EngineKind::Heap => HeapDijkstra.compute_from(graph, source, cancel),
        }
    }
}
