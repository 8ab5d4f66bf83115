use std::any::Any;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, Scope, ScopedJoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, warn};
use num_traits::{Float, Zero};

use crate::algorithm::{CancellationToken, ShortestPathAlgorithm};
use crate::graph::Graph;
use crate::parallel::result::ShortestPathResult;
use crate::Error;

/// Sizing of the worker pool and its two queues.
///
/// Capacities bound how far the feeder may run ahead of the workers
/// (`job_capacity`) and how many finished results may wait for the
/// controller (`result_capacity`). A capacity of 0 makes the queue a
/// rendezvous. Workers block on a full result queue until the controller
/// drains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads; 0 means one per logical CPU
    pub workers: usize,
    pub job_capacity: usize,
    pub result_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            workers: 0,
            job_capacity: 500,
            result_capacity: 500,
        }
    }
}

impl PoolConfig {
    /// Worker count with the 0 = host parallelism rule applied
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}

/// Fixed set of scoped worker threads.
///
/// Every worker pulls start keys from the shared job queue until it is
/// closed and empty, runs the algorithm against the shared graph and sends
/// one [`ShortestPathResult`] per job.
pub struct WorkerPool<'scope> {
    handles: Vec<(usize, ScopedJoinHandle<'scope, usize>)>,
}

impl<'scope> WorkerPool<'scope> {
    /// Starts `size` workers inside `scope`.
    ///
    /// The pool takes clones of the channel endpoints; callers should drop
    /// their own job receiver and result sender afterwards so that closing
    /// is observable on both sides.
    pub fn spawn<'env, W, G, A>(
        scope: &'scope Scope<'scope, 'env>,
        size: usize,
        graph: &'env G,
        algorithm: &'env A,
        jobs: &Receiver<String>,
        results: &Sender<ShortestPathResult<W>>,
        cancel: &'env CancellationToken,
    ) -> Self
    where
        W: Float + Zero + Debug + Copy + Send + 'env,
        G: Graph<W> + Sync,
        A: ShortestPathAlgorithm<W, G> + Sync,
    {
        let mut handles = Vec::with_capacity(size);

        for id in 1..=size {
            let jobs = jobs.clone();
            let results = results.clone();
            let spawned = thread::Builder::new()
                .name(format!("sssp-worker-{}", id))
                .spawn_scoped(scope, move || {
                    run_worker(id, graph, algorithm, jobs, results, cancel)
                });

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => error!("failed to spawn worker {}: {}", id, e),
            }
        }

        WorkerPool { handles }
    }

    /// Number of workers actually running
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker and returns the number of jobs they completed.
    /// A panicked worker is logged and contributes nothing.
    pub fn join(self) -> usize {
        let mut completed = 0;
        for (id, handle) in self.handles {
            match handle.join() {
                Ok(n) => completed += n,
                Err(_) => error!("worker {} panicked", id),
            }
        }
        completed
    }
}

/// Body of one worker thread; returns the number of jobs it finished
fn run_worker<W, G, A>(
    id: usize,
    graph: &G,
    algorithm: &A,
    jobs: Receiver<String>,
    results: Sender<ShortestPathResult<W>>,
    cancel: &CancellationToken,
) -> usize
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    let mut completed = 0;

    // Ends once the queue is closed and drained
    for start in jobs.iter() {
        debug!("worker {} running {} from {}", id, algorithm.name(), start);
        let result = run_job(graph, algorithm, start, cancel);
        if let Err(e) = &result.outcome {
            debug!("worker {}: job {} failed: {}", id, result.start, e);
        }

        if results.send(result).is_err() {
            // Controller is gone; nobody will read further results
            break;
        }
        completed += 1;
    }

    debug!("worker {} exiting after {} job(s)", id, completed);
    completed
}

/// Runs one start node. A panic inside the algorithm is caught and becomes
/// this job's error, so the calling thread keeps serving later jobs.
pub(crate) fn run_job<W, G, A>(
    graph: &G,
    algorithm: &A,
    start: String,
    cancel: &CancellationToken,
) -> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    let caught = panic::catch_unwind(AssertUnwindSafe(|| {
        algorithm.distances(graph, &start, Some(cancel))
    }));

    let outcome = caught.unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!("job {} panicked: {}", start, message);
        Err(Error::JobPanicked {
            start: start.clone(),
            message,
        })
    });
    ShortestPathResult { start, outcome }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
