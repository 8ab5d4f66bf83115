use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node record as stored in a graph file.
///
/// `kind`, `lat` and `lon` are carried through untouched; only `neighbors`
/// matters to the shortest-path engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<W = f64> {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    /// Outgoing edges: neighbor key -> non-negative weight
    #[serde(alias = "voisins", default = "BTreeMap::new")]
    pub neighbors: BTreeMap<String, W>,
}

impl<W> Node<W> {
    /// A node with no coordinates and no outgoing edges
    pub fn new(kind: impl Into<String>) -> Self {
        Node {
            kind: kind.into(),
            lat: 0.0,
            lon: 0.0,
            neighbors: BTreeMap::new(),
        }
    }

    pub fn at(kind: impl Into<String>, lat: f64, lon: f64) -> Self {
        Node {
            lat,
            lon,
            ..Node::new(kind)
        }
    }

    /// Adds (or overwrites) an outgoing edge
    pub fn with_neighbor(mut self, key: impl Into<String>, weight: W) -> Self {
        self.neighbors.insert(key.into(), weight);
        self
    }
}
