use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::graph::geo::haversine_meters;
use crate::graph::{Graph, KeyedGraph, Node};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct Dump {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Node { id: i64, lat: f64, lon: f64 },
    Way { id: i64, nodes: Vec<i64> },
    #[serde(other)]
    Other,
}

/// Builds a road graph from an Overpass element dump.
///
/// Every `node` element becomes a graph node keyed by its id. For every
/// `way`, consecutive node pairs are linked in both directions with their
/// haversine distance in meters. Way members without a node element are
/// skipped.
pub fn load_overpass(path: &Path) -> Result<KeyedGraph<f64>> {
    let file = File::open(path).map_err(|source| Error::GraphRead {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = read_overpass(BufReader::new(file), path)?;
    info!(
        "built {} nodes and {} edges from Overpass dump {}",
        graph.vertex_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

pub fn read_overpass<R: Read>(reader: R, origin: &Path) -> Result<KeyedGraph<f64>> {
    let dump: Dump = serde_json::from_reader(reader).map_err(|source| Error::GraphParse {
        path: origin.to_path_buf(),
        source,
    })?;

    let mut nodes: BTreeMap<String, Node<f64>> = BTreeMap::new();
    for element in &dump.elements {
        if let Element::Node { id, lat, lon } = *element {
            nodes
                .entry(id.to_string())
                .or_insert_with(|| Node::at("node", lat, lon));
        }
    }

    let mut skipped = 0usize;
    for element in &dump.elements {
        let Element::Way { id, nodes: members } = element else {
            continue;
        };
        for pair in members.windows(2) {
            let (a, b) = (pair[0].to_string(), pair[1].to_string());
            let coords = match (nodes.get(&a), nodes.get(&b)) {
                (Some(na), Some(nb)) => (na.lat, na.lon, nb.lat, nb.lon),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let dist = haversine_meters(coords.0, coords.1, coords.2, coords.3);
            if let Some(node) = nodes.get_mut(&a) {
                node.neighbors.insert(b.clone(), dist);
            }
            if let Some(node) = nodes.get_mut(&b) {
                node.neighbors.insert(a, dist);
            }
        }
        debug!("way {}: {} member(s)", id, members.len());
    }
    if skipped > 0 {
        debug!("skipped {} way segment(s) with unknown nodes", skipped);
    }

    KeyedGraph::from_nodes(nodes)
}
