use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::thread;
use std::time::Instant;

use crossbeam_channel::bounded;
use log::{info, warn};
use num_traits::{Float, Zero};
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::{CancellationToken, EngineKind, ShortestPathAlgorithm};
use crate::config::RunConfig;
use crate::graph::{Graph, KeyedGraph};
use crate::parallel::pool::{run_job, PoolConfig, WorkerPool};
use crate::parallel::result::{AggregateResult, ShortestPathResult};
use crate::Error;

/// Which start nodes a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartSelection {
    /// Graph nodes in key order, at most `cap` of them (all when `None`)
    All { cap: Option<usize> },
    /// Exactly these keys; duplicates collapse to one job
    Explicit(Vec<String>),
}

impl StartSelection {
    /// The start keys to dispatch, unique and in dispatch order.
    /// Explicit keys are kept even if they are not nodes: their jobs fail
    /// with `NodeNotFound` rather than being skipped.
    pub fn resolve<W>(&self, graph: &KeyedGraph<W>) -> Vec<String>
    where
        W: Float + Zero + Debug + Copy,
    {
        match self {
            StartSelection::All { cap } => graph
                .keys()
                .take(cap.unwrap_or(usize::MAX))
                .map(str::to_string)
                .collect(),
            StartSelection::Explicit(keys) => unique(keys),
        }
    }
}

/// How jobs are spread over threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Dedicated worker threads fed through bounded channels
    #[default]
    Pool,
    /// Rayon work stealing over the start list
    Rayon,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Pool => write!(f, "pool"),
            Strategy::Rayon => write!(f, "rayon"),
        }
    }
}

/// Fans start nodes out to workers and folds their results into an
/// [`AggregateResult`].
///
/// Exactly one result is consumed per dispatched start. A job whose result
/// never arrives (its worker died) is recorded as [`Error::WorkerLost`].
/// A job that panics is recorded as [`Error::JobPanicked`] and its worker
/// carries on with the next start.
#[derive(Debug, Clone)]
pub struct Dispatcher<A = EngineKind> {
    algorithm: A,
    pool: PoolConfig,
    strategy: Strategy,
    cancel: CancellationToken,
}

impl Dispatcher<EngineKind> {
    /// Dispatcher for the engine, pool sizing and strategy of a run config
    pub fn from_config(config: &RunConfig) -> Self {
        Dispatcher::new(config.engine, config.pool_config()).with_strategy(config.strategy)
    }
}

impl<A> Dispatcher<A> {
    pub fn new(algorithm: A, pool: PoolConfig) -> Self {
        Dispatcher {
            algorithm,
            pool,
            strategy: Strategy::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Shares an externally owned cancellation token with every job
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn workers(&self) -> usize {
        self.pool.effective_workers()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Resolves `selection` against the graph and runs every start
    pub fn run_selection<W>(
        &self,
        graph: &KeyedGraph<W>,
        selection: &StartSelection,
    ) -> AggregateResult<W>
    where
        W: Float + Zero + Debug + Copy + Send + Sync,
        A: ShortestPathAlgorithm<W, KeyedGraph<W>> + Sync,
    {
        let starts = selection.resolve(graph);
        self.run(graph, &starts)
    }

    /// Computes a distance map for every distinct key in `starts`
    pub fn run<W, G>(&self, graph: &G, starts: &[String]) -> AggregateResult<W>
    where
        W: Float + Zero + Debug + Copy + Send + Sync,
        G: Graph<W> + Sync,
        A: ShortestPathAlgorithm<W, G> + Sync,
    {
        let starts = unique(starts);
        let timer = Instant::now();
        info!(
            "dispatching {} start node(s) over {} nodes with {} x {} ({})",
            starts.len(),
            graph.vertex_count(),
            self.workers(),
            self.algorithm.name(),
            self.strategy
        );

        let aggregate = match self.strategy {
            Strategy::Pool => self.run_pool(graph, &starts),
            Strategy::Rayon => self.run_rayon(graph, &starts),
        };

        info!(
            "collected {} result(s), {} failed, in {:.3}s",
            aggregate.len(),
            aggregate.failed_count(),
            timer.elapsed().as_secs_f64()
        );
        aggregate
    }

    /// Single-threaded reference run, same output shape as [`Dispatcher::run`]
    pub fn run_sequential<W, G>(&self, graph: &G, starts: &[String]) -> AggregateResult<W>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
        A: ShortestPathAlgorithm<W, G>,
    {
        unique(starts)
            .into_iter()
            .map(|start| self.job(graph, start))
            .collect()
    }

    fn job<W, G>(&self, graph: &G, start: String) -> ShortestPathResult<W>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
        A: ShortestPathAlgorithm<W, G>,
    {
        run_job(graph, &self.algorithm, start, &self.cancel)
    }

    fn run_pool<W, G>(&self, graph: &G, starts: &[String]) -> AggregateResult<W>
    where
        W: Float + Zero + Debug + Copy + Send + Sync,
        G: Graph<W> + Sync,
        A: ShortestPathAlgorithm<W, G> + Sync,
    {
        let expected = starts.len();
        let mut aggregate = AggregateResult::with_capacity(expected);

        let (job_tx, job_rx) = bounded::<String>(self.pool.job_capacity);
        let (result_tx, result_rx) = bounded::<ShortestPathResult<W>>(self.pool.result_capacity);

        thread::scope(|scope| {
            let pool = WorkerPool::spawn(
                scope,
                self.pool.effective_workers(),
                graph,
                &self.algorithm,
                &job_rx,
                &result_tx,
                &self.cancel,
            );
            if pool.size() == 0 {
                warn!("no worker could be started");
            }
            // From here on only the workers hold these ends
            drop(job_rx);
            drop(result_tx);

            // Feeding runs on its own thread so a full job queue never
            // blocks draining results.
            let jobs: Vec<String> = starts.to_vec();
            let feeder = scope.spawn(move || {
                let mut sent = 0;
                for start in jobs {
                    if job_tx.send(start).is_err() {
                        break;
                    }
                    sent += 1;
                }
                sent
            });

            for _ in 0..expected {
                match result_rx.recv() {
                    Ok(result) => {
                        aggregate.insert(result);
                    }
                    // Every worker has exited
                    Err(_) => break,
                }
            }

            let enqueued = feeder.join().unwrap_or(0);
            let completed = pool.join();
            if enqueued != expected || completed != expected {
                warn!(
                    "enqueued {} and completed {} of {} job(s)",
                    enqueued, completed, expected
                );
            }
        });

        let lost = aggregate.fill_missing(starts, |start| Error::WorkerLost(start.to_string()));
        if lost > 0 {
            warn!("{} start node(s) got no result", lost);
        }
        aggregate
    }

    fn run_rayon<W, G>(&self, graph: &G, starts: &[String]) -> AggregateResult<W>
    where
        W: Float + Zero + Debug + Copy + Send + Sync,
        G: Graph<W> + Sync,
        A: ShortestPathAlgorithm<W, G> + Sync,
    {
        let run_all = || -> Vec<ShortestPathResult<W>> {
            starts
                .par_iter()
                .map(|start| self.job(graph, start.clone()))
                .collect()
        };

        let results = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.pool.effective_workers())
            .build()
        {
            Ok(pool) => pool.install(run_all),
            Err(e) => {
                warn!("cannot build rayon pool ({}); using the global one", e);
                run_all()
            }
        };

        results.into_iter().collect()
    }
}

/// Removes repeated keys, keeping first occurrences in order
fn unique(keys: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(keys.len());
    let out: Vec<String> = keys
        .iter()
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect();
    if out.len() != keys.len() {
        warn!("ignoring {} duplicate start key(s)", keys.len() - out.len());
    }
    out
}
