use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use log::{error, info};

use parallel_sssp::algorithm::{EngineKind, Path, ShortestPathAlgorithm};
use parallel_sssp::config::{InputFormat, RunConfig, DEFAULT_MAX_STARTS};
use parallel_sssp::graph::components::largest_component;
use parallel_sssp::graph::{Graph, KeyedGraph};
use parallel_sssp::io::{self, RunReport, RunSummary};
use parallel_sssp::parallel::Strategy;
use parallel_sssp::{Dispatcher, Result};

#[derive(Parser, Debug)]
#[command(name = "sssp_batch")]
#[command(about = "Compute shortest-path distances from many start nodes of a JSON graph in parallel.", long_about = None)]
struct Cli {
    /// Input graph file
    #[arg(short, long, default_value = "sortie.json")]
    input: PathBuf,

    /// Layout of the input file
    #[arg(long, value_enum, default_value_t = InputFormat::Graph)]
    format: InputFormat,

    /// Output JSON file for the aggregated distances
    #[arg(short, long, default_value = "all_distances.json")]
    output: PathBuf,

    /// Worker threads (0 = one per logical CPU)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Maximum number of start nodes, taken in key order
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_STARTS)]
    max_starts: usize,

    /// Use every node as a start node (ignores --max-starts)
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Explicit start node key; repeat for several
    #[arg(short, long = "start")]
    starts: Vec<String>,

    /// Job queue capacity
    #[arg(long, default_value_t = 500)]
    job_capacity: usize,

    /// Result queue capacity
    #[arg(long, default_value_t = 500)]
    result_capacity: usize,

    #[arg(short, long, value_enum, default_value_t = EngineKind::Linear)]
    engine: EngineKind,

    #[arg(long, value_enum, default_value_t = Strategy::Pool)]
    strategy: Strategy,

    /// Drop every node outside the largest connected component
    #[arg(long, default_value_t = false)]
    largest_component: bool,

    /// Point-to-point mode: print the path from this node to --to
    #[arg(long, requires = "to")]
    from: Option<String>,

    #[arg(long, requires = "from")]
    to: Option<String>,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            input: self.input.clone(),
            input_format: self.format,
            output: self.output.clone(),
            largest_component: self.largest_component,
            workers: self.workers,
            max_starts: (!self.all).then_some(self.max_starts),
            starts: (!self.starts.is_empty()).then(|| self.starts.clone()),
            job_capacity: self.job_capacity,
            result_capacity: self.result_capacity,
            engine: self.engine,
            strategy: self.strategy,
        }
    }
}

fn load(config: &RunConfig) -> Result<KeyedGraph<f64>> {
    let graph = io::load(&config.input, config.input_format)?;
    if config.largest_component {
        Ok(largest_component(&graph))
    } else {
        Ok(graph)
    }
}

fn run_point_to_point(config: &RunConfig, from: &str, to: &str) -> Result<()> {
    let graph = load(config)?;
    let path: Path<f64> = config.engine.shortest_path(&graph, from, to)?;
    println!("Path: {}", path.nodes.join(" -> "));
    println!("Hops: {}", path.nodes.len().saturating_sub(1));
    println!("Total distance: {:.3}", path.cost);
    Ok(())
}

fn run_batch(config: &RunConfig) -> Result<()> {
    let graph = load(config)?;
    let dispatcher = Dispatcher::from_config(config);
    let selection = config.start_selection();

    let started_at = Utc::now();
    let aggregate = dispatcher.run_selection(&graph, &selection);
    let finished_at = Utc::now();

    let report = RunReport::new(
        RunSummary {
            engine: config.engine,
            strategy: config.strategy,
            workers: dispatcher.workers(),
            node_count: graph.vertex_count(),
            started_at,
            finished_at,
        },
        &aggregate,
    );
    info!(
        "processed {} start node(s) in {:.1} ms",
        report.start_count, report.elapsed_ms
    );
    for (start, e) in aggregate.failures() {
        error!("start node {}: {}", start, e);
    }

    report.write_to(&config.output)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.run_config();

    let outcome = config.validate().and_then(|_| match (&cli.from, &cli.to) {
        (Some(from), Some(to)) => run_point_to_point(&config, from, to),
        _ => run_batch(&config),
    });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        // No path or unknown node in point-to-point mode
        Err(e) if e.is_per_job() => {
            error!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
