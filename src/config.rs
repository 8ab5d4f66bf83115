use std::path::PathBuf;

use serde::Serialize;

use crate::algorithm::EngineKind;
use crate::parallel::{PoolConfig, StartSelection, Strategy};
use crate::{Error, Result};

/// Start-node cap used when neither a cap nor explicit starts are given
pub const DEFAULT_MAX_STARTS: usize = 125;

/// Layout of the input graph file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Node key -> { type, lat, lon, voisins | neighbors }
    #[default]
    Graph,
    /// Overpass API element dump (nodes and ways)
    Overpass,
}

/// Everything a batch run needs, passed explicitly to the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub output: PathBuf,
    /// Keep only the largest connected component before dispatching
    pub largest_component: bool,
    /// Worker threads; 0 means one per logical CPU
    pub workers: usize,
    /// Cap on start nodes when `starts` is not given; `None` means all nodes
    pub max_starts: Option<usize>,
    pub starts: Option<Vec<String>>,
    pub job_capacity: usize,
    pub result_capacity: usize,
    pub engine: EngineKind,
    pub strategy: Strategy,
}

impl Default for RunConfig {
    fn default() -> Self {
        let pool = PoolConfig::default();
        RunConfig {
            input: PathBuf::from("sortie.json"),
            input_format: InputFormat::default(),
            output: PathBuf::from("all_distances.json"),
            largest_component: false,
            workers: pool.workers,
            max_starts: Some(DEFAULT_MAX_STARTS),
            starts: None,
            job_capacity: pool.job_capacity,
            result_capacity: pool.result_capacity,
            engine: EngineKind::default(),
            strategy: Strategy::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(starts) = &self.starts {
            if starts.is_empty() {
                return Err(Error::InvalidConfig("explicit start list is empty".into()));
            }
        } else if self.max_starts == Some(0) {
            return Err(Error::InvalidConfig("start node cap must be at least 1".into()));
        }
        if self.input == self.output {
            return Err(Error::InvalidConfig(format!(
                "output would overwrite input {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.workers,
            job_capacity: self.job_capacity,
            result_capacity: self.result_capacity,
        }
    }

    pub fn start_selection(&self) -> StartSelection {
        match &self.starts {
            Some(keys) => StartSelection::Explicit(keys.clone()),
            None => StartSelection::All {
                cap: self.max_starts,
            },
        }
    }
}
