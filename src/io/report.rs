use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::algorithm::EngineKind;
use crate::parallel::{AggregateResult, Strategy};
use crate::{Error, Result};

/// Settings and timing of a finished run
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSummary {
    pub engine: EngineKind,
    pub strategy: Strategy,
    pub workers: usize,
    pub node_count: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// One start node's entry in the report.
///
/// JSON has no infinity, so unreachable nodes are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportEntry {
    Distances(BTreeMap<String, Option<f64>>),
    Failed { error: String },
}

/// The persisted artifact of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    #[serde(flatten)]
    pub summary: RunSummary,
    pub elapsed_ms: f64,
    pub start_count: usize,
    pub failed: usize,
    pub results: BTreeMap<String, ReportEntry>,
}

impl RunReport {
    pub fn new(summary: RunSummary, aggregate: &AggregateResult<f64>) -> Self {
        let results: BTreeMap<String, ReportEntry> = aggregate
            .iter()
            .map(|(start, outcome)| {
                let entry = match outcome {
                    Ok(distances) => ReportEntry::Distances(
                        distances
                            .iter()
                            .map(|(k, &d)| (k.clone(), d.is_finite().then_some(d)))
                            .collect(),
                    ),
                    Err(e) => ReportEntry::Failed {
                        error: e.to_string(),
                    },
                };
                (start.to_string(), entry)
            })
            .collect();

        let elapsed = summary.finished_at - summary.started_at;
        RunReport {
            run_id: Uuid::new_v4(),
            elapsed_ms: elapsed.num_microseconds().unwrap_or(i64::MAX) as f64 / 1000.0,
            start_count: results.len(),
            failed: aggregate.failed_count(),
            summary,
            results,
        }
    }

    /// Writes the report as indented JSON
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Creates or truncates `path` and writes the report to it
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let write_error = |source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(write_error)?;

        info!(
            "wrote {} distance map(s) ({} failed) to {}",
            self.start_count,
            self.failed,
            path.display()
        );
        Ok(())
    }
}
