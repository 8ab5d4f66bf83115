use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use crate::graph::{Graph, KeyedGraph, Node};
use crate::{Error, Result};

/// Reads a graph file: a JSON object mapping node keys to node records.
///
/// Any read, parse or weight error is fatal; no partial graph is returned.
pub fn load_graph(path: &Path) -> Result<KeyedGraph<f64>> {
    let file = File::open(path).map_err(|source| Error::GraphRead {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = read_graph(BufReader::new(file), path)?;
    info!(
        "loaded {} nodes and {} edges from {}",
        graph.vertex_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// Parses a graph from any reader; `origin` only labels errors
pub fn read_graph<R: Read>(reader: R, origin: &Path) -> Result<KeyedGraph<f64>> {
    let nodes: BTreeMap<String, Node<f64>> =
        serde_json::from_reader(reader).map_err(|source| Error::GraphParse {
            path: origin.to_path_buf(),
            source,
        })?;
    KeyedGraph::from_nodes(nodes)
}
