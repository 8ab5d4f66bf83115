//! Parallel SSSP - multi-source shortest-path distances over a static graph
//!
//! Every requested start node gets a full Dijkstra run against one shared,
//! read-only graph. Runs are spread over a fixed pool of worker threads fed
//! through a bounded job queue, and their distance maps are folded into a
//! single aggregate keyed by start node.
//!
//! The graph is string keyed (as produced by map extracts) and frozen before
//! any worker starts, so workers only ever read it.

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod graph;
pub mod io;
pub mod parallel;

pub use algorithm::{
    dijkstra::Dijkstra, engine::EngineKind, heap_dijkstra::HeapDijkstra, shortest_path,
    shortest_paths, CancellationToken, DistanceMap, Path, ShortestPathAlgorithm,
    ShortestPathTree,
};
pub use config::RunConfig;
/// Re-export main types for convenient use
pub use graph::keyed::KeyedGraph;
pub use parallel::{AggregateResult, Dispatcher, ShortestPathResult, StartSelection};

use std::path::PathBuf;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot read graph file {path}: {source}")]
    GraphRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed graph file {path}: {source}")]
    GraphParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid edge weight {weight} on {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: f64 },

    #[error("node not found in graph: {0}")]
    NodeNotFound(String),

    #[error("no path from {start} to {end}")]
    PathNotFound { start: String, end: String },

    #[error("computation from {0} was cancelled")]
    Cancelled(String),

    #[error("no result received for start node {0}: worker terminated")]
    WorkerLost(String),

    #[error("computation from {start} panicked: {message}")]
    JobPanicked { start: String, message: String },

    #[error("cannot write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode output: {0}")]
    OutputEncode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True for errors that belong to a single job and must not abort the run.
    pub fn is_per_job(&self) -> bool {
        matches!(
            self,
            Error::NodeNotFound(_)
                | Error::PathNotFound { .. }
                | Error::Cancelled(_)
                | Error::WorkerLost(_)
                | Error::JobPanicked { .. }
        )
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
