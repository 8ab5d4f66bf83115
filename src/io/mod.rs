//! File collaborators of the pipeline: graph loading and report writing.

pub mod graph_file;
pub mod overpass;
pub mod report;

pub use graph_file::{load_graph, read_graph};
pub use overpass::{load_overpass, read_overpass};
pub use report::{ReportEntry, RunReport, RunSummary};

use crate::config::InputFormat;
use crate::graph::KeyedGraph;
use crate::Result;
use std::path::Path;

/// Loads a graph in the given file layout
pub fn load(path: &Path, format: InputFormat) -> Result<KeyedGraph<f64>> {
    match format {
        InputFormat::Graph => load_graph(path),
        InputFormat::Overpass => load_overpass(path),
    }
}
