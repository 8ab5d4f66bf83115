use crate::graph::node::Node;
use crate::graph::traits::Graph;
use crate::{Error, Result};
use log::warn;
use num_traits::{Float, Zero};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

/// A frozen, string-keyed directed graph.
///
/// Built once from node records; keys are interned to dense indices in sorted
/// key order and adjacency is resolved to indices up front. There are no
/// mutating methods, so a `&KeyedGraph` can be shared across worker threads
/// for the whole run.
#[derive(Debug, Clone)]
pub struct KeyedGraph<W = f64>
where
    W: Float + Zero + Debug + Copy,
{
    /// Vertex index -> node key
    keys: Vec<String>,

    /// Node key -> vertex index
    index: HashMap<String, usize>,

    /// Passthrough node records, parallel to `keys`
    nodes: Vec<Node<W>>,

    /// Outgoing edges for each vertex: [(target_vertex, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Neighbor references whose target key is not a node
    dangling: Vec<(String, String)>,
}

impl<W> KeyedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Freezes a set of node records into a graph.
    ///
    /// Negative or NaN weights are rejected. Neighbor keys that do not name a
    /// node are dropped from the adjacency and reported once with `warn!`;
    /// engines never see them, so such targets are simply absent from every
    /// distance map.
    pub fn from_nodes(nodes: BTreeMap<String, Node<W>>) -> Result<Self> {
        for (key, node) in &nodes {
            for (target, &weight) in &node.neighbors {
                if weight.is_nan() || weight < W::zero() {
                    return Err(Error::NegativeWeight {
                        from: key.clone(),
                        to: target.clone(),
                        weight: weight.to_f64().unwrap_or(f64::NAN),
                    });
                }
            }
        }

        let graph = Self::assemble(nodes);
        if let Some((from, to)) = graph.dangling.first() {
            warn!(
                "{} neighbor reference(s) point to missing nodes (first: {} -> {}); ignoring them",
                graph.dangling.len(),
                from,
                to
            );
        }
        Ok(graph)
    }

    /// Interns keys and resolves adjacency. Weights must already be valid.
    fn assemble(nodes: BTreeMap<String, Node<W>>) -> Self {
        let keys: Vec<String> = nodes.keys().cloned().collect();
        let index: HashMap<String, usize> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();

        let mut adjacency = Vec::with_capacity(keys.len());
        let mut dangling = Vec::new();

        for (key, node) in &nodes {
            let mut edges = Vec::with_capacity(node.neighbors.len());
            for (target, &weight) in &node.neighbors {
                match index.get(target) {
                    Some(&t) => edges.push((t, weight)),
                    None => dangling.push((key.clone(), target.clone())),
                }
            }
            adjacency.push(edges);
        }

        KeyedGraph {
            keys,
            index,
            nodes: nodes.into_values().collect(),
            adjacency,
            dangling,
        }
    }

    /// Returns the node record stored under `key`
    pub fn node(&self, key: &str) -> Option<&Node<W>> {
        self.index.get(key).map(|&i| &self.nodes[i])
    }

    /// Iterates node keys in index (sorted) order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    /// Neighbor references that were dropped because their target is missing
    pub fn dangling_references(&self) -> &[(String, String)] {
        &self.dangling
    }

    /// Builds the induced subgraph on the given keys.
    /// Edges leaving the subset are dropped silently.
    pub fn restrict<'a, I>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut kept: BTreeMap<String, Node<W>> = BTreeMap::new();
        for key in keep {
            if let Some(node) = self.node(key) {
                kept.insert(key.to_string(), node.clone());
            }
        }
        let members: Vec<String> = kept.keys().cloned().collect();
        for node in kept.values_mut() {
            node.neighbors
                .retain(|target, _| members.binary_search(target).is_ok());
        }
        Self::assemble(kept)
    }

    /// A graph with no nodes
    pub fn empty() -> Self {
        KeyedGraph {
            keys: Vec::new(),
            index: HashMap::new(),
            nodes: Vec::new(),
            adjacency: Vec::new(),
            dangling: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<W> Graph<W> for KeyedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.keys.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        if let Some(edges) = self.adjacency.get(vertex) {
            Box::new(edges.iter().cloned())
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn key_of(&self, vertex: usize) -> Option<&str> {
        self.keys.get(vertex).map(String::as_str)
    }
}

/// Incremental construction of a [`KeyedGraph`], mostly for tests and
/// generators. Nothing is validated until [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder<W = f64> {
    nodes: BTreeMap<String, Node<W>>,
}

impl<W> GraphBuilder<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn new() -> Self {
        GraphBuilder {
            nodes: BTreeMap::new(),
        }
    }

    /// Adds a node without edges; existing nodes are left as they are
    pub fn node(mut self, key: &str) -> Self {
        self.nodes
            .entry(key.to_string())
            .or_insert_with(|| Node::new("node"));
        self
    }

    /// Inserts a full node record, replacing any previous one
    pub fn record(mut self, key: &str, node: Node<W>) -> Self {
        self.nodes.insert(key.to_string(), node);
        self
    }

    /// Adds a directed edge; the source node is created if needed.
    /// The target is not created, so it may stay dangling.
    pub fn edge(mut self, from: &str, to: &str, weight: W) -> Self {
        self.nodes
            .entry(from.to_string())
            .or_insert_with(|| Node::new("node"))
            .neighbors
            .insert(to.to_string(), weight);
        self
    }

    /// Adds both directions of an edge with the same weight
    pub fn undirected_edge(self, a: &str, b: &str, weight: W) -> Self {
        self.edge(a, b, weight).edge(b, a, weight).node(a).node(b)
    }

    pub fn build(self) -> Result<KeyedGraph<W>> {
        KeyedGraph::from_nodes(self.nodes)
    }
}
