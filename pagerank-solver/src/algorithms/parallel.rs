//! Shared-memory data-parallel power iteration.
//!
//! A fixed pool of worker threads is spawned once per run and reused for every
//! sweep. Workers start only once every thread of the pool exists; a failed
//! spawn cancels the run with [`PageRankError::ThreadSpawn`]. Rows of `W'` are
//! split into contiguous blocks, one per worker. Each sweep has the shape:
//!
//! 1. every worker snapshots the read buffer, computes `W'[i]·x + b[i]` for the
//!    rows it owns and stores the results into the write buffer;
//! 2. all workers meet at a barrier;
//! 3. the worker the barrier elects as leader decrements the shared
//!    remaining-sweep counter (or zeroes it after a failure);
//! 4. all workers meet again so the new counter value is visible to everyone.
//!
//! The two buffers alternate roles by sweep parity, so sweep `k` only ever reads
//! the values written by sweep `k - 1`. Rows are summed in the same order as the
//! serial solver, which makes both strategies agree exactly.

use std::io;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Barrier, Condvar, Mutex, PoisonError};
use std::thread::{self, ScopedJoinHandle};

use log::{debug, error, info, warn};
use pagerank_core::{ops, ComputationError, DenseMatrix};

use super::{PowerIterationMetadata, PowerIterationProblem, SolveAlgorithm, SolveResult};
use crate::error::{ConfigError, PageRankError};

/// Multi-threaded solver with a fixed worker pool and a barrier per sweep.
#[derive(Debug, Clone)]
pub struct ParallelPowerIteration {
    pub iterations: usize,
    pub threads: usize,
}

impl ParallelPowerIteration {
    pub fn with_params(iterations: usize, threads: usize) -> Self {
        Self {
            iterations,
            threads,
        }
    }
}

/// Contiguous block of rows owned by `worker`: `[k·R/T, (k+1)·R/T)`.
pub fn partition(rows: usize, workers: usize, worker: usize) -> Range<usize> {
    (worker * rows / workers)..((worker + 1) * rows / workers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Start {
    Pending,
    Go,
    Cancel,
}

/// State shared by all workers for the duration of one run.
struct SweepState<'a> {
    scaled: &'a DenseMatrix,
    teleport: &'a [f64],
    // f64 bit patterns; element stores are the only writes to the rank vector.
    buffers: [Vec<AtomicU64>; 2],
    remaining: AtomicUsize,
    // Sweeps finished by every worker. Only the barrier leader writes it.
    completed: AtomicUsize,
    failed: AtomicBool,
    first_error: Mutex<Option<PageRankError>>,
    // Workers hold here until the whole pool exists, so the barrier never
    // waits on a thread that failed to spawn.
    start: Mutex<Start>,
    started: Condvar,
    barrier: Barrier,
}

impl<'a> SweepState<'a> {
    fn new(
        scaled: &'a DenseMatrix,
        teleport: &'a [f64],
        initial: &[f64],
        iterations: usize,
        threads: usize,
    ) -> Self {
        Self {
            scaled,
            teleport,
            buffers: [to_atomic(initial), to_atomic(initial)],
            remaining: AtomicUsize::new(iterations),
            completed: AtomicUsize::new(0),
            failed: AtomicBool::new(false),
            first_error: Mutex::new(None),
            start: Mutex::new(Start::Pending),
            started: Condvar::new(),
            barrier: Barrier::new(threads),
        }
    }

    fn record_failure(&self, error: PageRankError) {
        let mut slot = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(error);
        }
        self.failed.store(true, Ordering::Release);
    }

    fn release(&self, start: Start) {
        *self.start.lock().unwrap_or_else(PoisonError::into_inner) = start;
        self.started.notify_all();
    }

    /// Blocks until the pool is complete. Returns false if the run was cancelled.
    fn wait_for_start(&self) -> bool {
        let mut start = self.start.lock().unwrap_or_else(PoisonError::into_inner);
        while *start == Start::Pending {
            start = self
                .started
                .wait(start)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *start == Start::Go
    }

    fn sweep_rows(
        &self,
        rows: &Range<usize>,
        read: &[AtomicU64],
        write: &[AtomicU64],
        snapshot: &mut [f64],
    ) -> Result<(), ComputationError> {
        for (value, cell) in snapshot.iter_mut().zip(read) {
            *value = f64::from_bits(cell.load(Ordering::Relaxed));
        }
        for row in rows.clone() {
            let value = ops::row_dot(self.scaled, row, snapshot)? + self.teleport[row];
            write[row].store(value.to_bits(), Ordering::Relaxed);
        }
        Ok(())
    }

    fn run_worker(&self, worker: usize, rows: Range<usize>) {
        if !self.wait_for_start() {
            return;
        }
        let mut snapshot = vec![0.0; self.teleport.len()];
        let mut sweep = 0usize;
        while self.remaining.load(Ordering::Acquire) > 0 {
            let read = &self.buffers[sweep % 2];
            let write = &self.buffers[(sweep + 1) % 2];

            if !self.failed.load(Ordering::Acquire) {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    self.sweep_rows(&rows, read, write, &mut snapshot)
                }));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => self.record_failure(err.into()),
                    Err(_) => self.record_failure(PageRankError::WorkerPanicked { worker }),
                }
            }

            if self.barrier.wait().is_leader() {
                if self.failed.load(Ordering::Acquire) {
                    self.remaining.store(0, Ordering::Release);
                } else {
                    let left = self.remaining.fetch_sub(1, Ordering::AcqRel) - 1;
                    self.completed.fetch_add(1, Ordering::AcqRel);
                    debug!("Sweep {} done by all workers, {} left", sweep + 1, left);
                }
            }
            self.barrier.wait();
            sweep += 1;
        }
    }

    /// Spawns `threads` workers through `spawn` and waits for all of them.
    ///
    /// If any spawn fails, the workers already running are cancelled before
    /// they reach the first barrier and the spawn failure is returned.
    fn run_pool<'env, S>(&'env self, threads: usize, spawn: S) -> Result<(), PageRankError>
    where
        S: for<'scope> Fn(
            &'scope thread::Scope<'scope, 'env>,
            usize,
            Box<dyn FnOnce() + Send + 'scope>,
        ) -> io::Result<ScopedJoinHandle<'scope, ()>>,
    {
        let rows = self.teleport.len();
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(threads);
            let mut spawn_error = None;
            for worker in 0..threads {
                let range = partition(rows, threads, worker);
                match spawn(scope, worker, Box::new(move || self.run_worker(worker, range))) {
                    Ok(handle) => handles.push(handle),
                    Err(err) => {
                        error!("Cannot spawn worker {} of {}: {}", worker, threads, err);
                        spawn_error = Some(PageRankError::ThreadSpawn {
                            worker,
                            reason: err.to_string(),
                        });
                        break;
                    }
                }
            }
            self.release(if spawn_error.is_none() {
                Start::Go
            } else {
                Start::Cancel
            });

            let panicked: Vec<usize> = handles
                .into_iter()
                .enumerate()
                .filter_map(|(worker, handle)| handle.join().err().map(|_| worker))
                .collect();
            match (spawn_error, panicked.first()) {
                (Some(err), _) => Err(err),
                (None, Some(&worker)) => Err(PageRankError::WorkerPanicked { worker }),
                (None, None) => Ok(()),
            }
        })
    }
}

fn spawn_worker<'scope, 'env>(
    scope: &'scope thread::Scope<'scope, 'env>,
    worker: usize,
    body: Box<dyn FnOnce() + Send + 'scope>,
) -> io::Result<ScopedJoinHandle<'scope, ()>> {
    thread::Builder::new()
        .name(format!("pagerank-worker-{}", worker))
        .spawn_scoped(scope, body)
}

fn to_atomic(values: &[f64]) -> Vec<AtomicU64> {
    values.iter().map(|v| AtomicU64::new(v.to_bits())).collect()
}

fn from_atomic(values: &[AtomicU64]) -> Vec<f64> {
    values
        .iter()
        .map(|v| f64::from_bits(v.load(Ordering::Acquire)))
        .collect()
}

impl SolveAlgorithm for ParallelPowerIteration {
    type Metadata = PowerIterationMetadata;

    fn name(&self) -> &'static str {
        "parallel"
    }

    fn solve(
        &self,
        problem: &PowerIterationProblem,
    ) -> Result<SolveResult<f64, Self::Metadata>, PageRankError> {
        self.validate_inputs(problem)?;
        if self.threads == 0 {
            return Err(ConfigError::BadThreadCount(self.threads).into());
        }

        let n = problem.dimension();
        let threads = self.threads;
        info!(
            "Parallel power iteration: {} nodes, {} sweeps, {} workers",
            n, self.iterations, threads
        );
        if threads > n {
            warn!(
                "{} workers for {} rows, {} workers will idle",
                threads,
                n,
                threads - n
            );
        }

        let state = SweepState::new(
            problem.scaled(),
            problem.teleport().data(),
            problem.initial().data(),
            self.iterations,
            threads,
        );
        state.run_pool(threads, spawn_worker)?;

        let first_error = state
            .first_error
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(err) = first_error {
            return Err(err);
        }

        let sweeps = state.completed.load(Ordering::Acquire);
        let x = from_atomic(&state.buffers[sweeps % 2]);
        let last_delta = if sweeps == 0 {
            0.0
        } else {
            let previous = from_atomic(&state.buffers[(sweeps + 1) % 2]);
            ops::l1_distance(&x, &previous)?
        };

        Ok(SolveResult {
            x,
            metadata: PowerIterationMetadata {
                sweeps,
                last_delta,
                threads,
            },
        })
    }
}
