use crate::graph::keyed::KeyedGraph;
use crate::graph::traits::Graph;
use log::info;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Weakly connected components (edge direction ignored), as lists of vertex
/// indices. Components are returned in order of their smallest vertex.
pub fn weak_components<W, G>(graph: &G) -> Vec<Vec<usize>>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let n = graph.vertex_count();

    // Undirected view of the adjacency
    let mut undirected: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in 0..n {
        for (v, _) in graph.outgoing_edges(u) {
            undirected[u].push(v);
            undirected[v].push(u);
        }
    }

    let mut component_of = vec![usize::MAX; n];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for root in 0..n {
        if component_of[root] != usize::MAX {
            continue;
        }
        let id = components.len();
        let mut members = Vec::new();
        component_of[root] = id;
        stack.push(root);

        while let Some(u) = stack.pop() {
            members.push(u);
            for &v in &undirected[u] {
                if component_of[v] == usize::MAX {
                    component_of[v] = id;
                    stack.push(v);
                }
            }
        }
        members.sort_unstable();
        components.push(members);
    }

    components
}

/// Restricts the graph to its largest weakly connected component.
/// Ties go to the component containing the smallest key.
pub fn largest_component<W>(graph: &KeyedGraph<W>) -> KeyedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    let components = weak_components(graph);
    let total = components.len();

    let largest = components
        .into_iter()
        .fold(None::<Vec<usize>>, |best, c| match best {
            Some(b) if b.len() >= c.len() => Some(b),
            _ => Some(c),
        });

    match largest {
        Some(members) => {
            info!(
                "keeping largest of {} component(s): {} of {} nodes",
                total,
                members.len(),
                graph.vertex_count()
            );
            graph.restrict(members.iter().filter_map(|&v| graph.key_of(v)))
        }
        None => KeyedGraph::empty(),
    }
}
