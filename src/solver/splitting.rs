//! Worker pool that hands unexplored subtrees to idle workers
//!
//! Idle workers park a reusable [`WorkRequest`] on a shared bounded queue and wait
//! for it to come back filled. Busy workers poll the queue after every successful
//! placement; when a request is waiting they copy the parent state's untried cells
//! into its buffer and send it back to its owner, then carry on deeper. Work moves
//! between threads only as copies inside these buffers.
//!
//! The calling thread first feeds the starting points to idle workers, then watches
//! for exhaustion: the search space is exhausted once every worker's request sits
//! in the queue at the same time.

use crate::algorithm::placer::{Seed, StonePlacer, StonePlacerConstructor};
use crate::io::configuration::FALLBACK_WORKER_COUNT;
use crate::io::error::Result;
use crate::solver::Solver;
use crate::solver::search::{Halt, SearchObserver, descend};
use crate::solver::signal::{DoneSignal, Outcome, OutcomeSender, outcome_channel};
use crate::spatial::grid::{Grid, Placements};
use crate::spatial::starting::StartingPointsProvider;
use crossbeam::channel::{self, Receiver, Sender, select};
use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::thread;

/// Buffer an idle worker offers to be filled with work
pub struct WorkRequest {
    /// Pegs and cursor of the work handed over
    pub seed: Seed,
    reply: Sender<Self>,
}

impl WorkRequest {
    /// Create a request whose filled buffer is delivered to `reply`
    pub fn new(capacity: usize, reply: Sender<Self>) -> Self {
        Self {
            seed: Seed::with_capacity(capacity),
            reply,
        }
    }

    /// Return the request to its owner
    ///
    /// Never blocks: the owner waits with an empty reply slot for each request it
    /// has outstanding. Returns false if the owner has already exited.
    pub fn fulfil(self) -> bool {
        let reply = self.reply.clone();
        reply.send(self).is_ok()
    }
}

/// Pool size used when none is configured
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map_or(FALLBACK_WORKER_COUNT, NonZeroUsize::get)
}

/// Searches with a fixed pool of workers that split work on demand
pub struct SplittingSolver<C> {
    starting_points: StartingPointsProvider,
    constructor: C,
    workers: Option<NonZeroUsize>,
}

impl<C: StonePlacerConstructor> SplittingSolver<C> {
    /// Create a solver sized to the available hardware parallelism
    pub const fn new(starting_points: StartingPointsProvider, constructor: C) -> Self {
        Self {
            starting_points,
            constructor,
            workers: None,
        }
    }

    /// Override the number of workers
    #[must_use]
    pub const fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Number of workers a search will start
    pub fn worker_count(&self) -> usize {
        self.workers.map_or_else(default_worker_count, NonZeroUsize::get)
    }
}

// Channel ends shared by every worker
struct Pool<'a, C> {
    grid: Grid,
    constructor: &'a C,
    done: &'a DoneSignal,
    outcome: OutcomeSender,
    queue: Sender<WorkRequest>,
    requests: Receiver<WorkRequest>,
    idle: Sender<()>,
}

struct SplitObserver<'a> {
    worker: usize,
    done: &'a DoneSignal,
    queue: &'a Sender<WorkRequest>,
    requests: &'a Receiver<WorkRequest>,
}

impl SearchObserver for SplitObserver<'_> {
    fn before_attempt(&mut self) -> ControlFlow<Halt> {
        if self.done.is_closed() {
            ControlFlow::Break(Halt::Cancelled)
        } else {
            ControlFlow::Continue(())
        }
    }

    fn after_descend<P: StonePlacer>(&mut self, placer: &mut P) -> ControlFlow<Halt> {
        let Ok(mut request) = self.requests.try_recv() else {
            return ControlFlow::Continue(());
        };
        if placer.hand_off_parent(&mut request.seed) {
            tracing::trace!(
                worker = self.worker,
                depth = request.seed.placements.len(),
                "handed off work"
            );
            if !request.fulfil() {
                return ControlFlow::Break(Halt::Cancelled);
            }
        } else if self.queue.send(request).is_err() {
            return ControlFlow::Break(Halt::Cancelled);
        }
        ControlFlow::Continue(())
    }
}

impl<C: StonePlacerConstructor> Pool<'_, C> {
    fn run_worker(&self, worker: usize) {
        let (reply_tx, reply_rx) = channel::bounded(1);
        let mut request = WorkRequest::new(self.grid.size() as usize, reply_tx);
        let mut searched = 0usize;
        tracing::debug!(worker, "worker started");

        loop {
            // The queue holds one slot per worker, so parking never blocks.
            if self.queue.send(request).is_err() {
                break;
            }
            let _ = self.idle.try_send(());

            request = select! {
                recv(reply_rx) -> filled => match filled {
                    Ok(filled) => filled,
                    Err(_) => break,
                },
                recv(self.done.receiver()) -> _ => break,
            };

            let mut placer = match self.constructor.construct(self.grid, &request.seed) {
                Ok(placer) => placer,
                Err(error) => {
                    tracing::debug!(worker, %error, "work could not be planted");
                    self.outcome.report(Outcome::Failed(error));
                    self.done.close();
                    break;
                }
            };
            searched += 1;

            let mut observer = SplitObserver {
                worker,
                done: self.done,
                queue: &self.queue,
                requests: &self.requests,
            };
            match descend(&mut placer, &mut observer) {
                ControlFlow::Break(Halt::Found(solution)) => {
                    tracing::debug!(worker, "solution found");
                    self.outcome.report(Outcome::Found(solution));
                    self.done.close();
                    break;
                }
                ControlFlow::Break(Halt::Cancelled) => break,
                ControlFlow::Continue(()) => {}
            }
        }
        tracing::debug!(worker, searched, "worker stopped");
    }

    // Hand each starting point to the next idle worker. Returns false if the search
    // finished before every starting point was placed.
    fn feed(&self, seeds: &[Placements]) -> bool {
        for placements in seeds {
            let mut request = select! {
                recv(self.requests) -> request => match request {
                    Ok(request) => request,
                    Err(_) => return false,
                },
                recv(self.done.receiver()) -> _ => return false,
            };
            request.seed.placements.clear();
            request.seed.placements.extend_from_slice(placements);
            request.seed.cursor = None;
            if !request.fulfil() {
                return false;
            }
        }
        true
    }

    // Wait until every worker is parked at once, or the search finishes otherwise.
    fn detect_exhaustion(&self, idle: &Receiver<()>, pool_size: usize) {
        loop {
            select! {
                recv(idle) -> notified => {
                    if notified.is_err() {
                        return;
                    }
                    if self.requests.len() == pool_size {
                        tracing::debug!(grid = %self.grid, "every worker is idle");
                        self.outcome.report(Outcome::Exhausted);
                        self.done.close();
                        return;
                    }
                }
                recv(self.done.receiver()) -> _ => return,
            }
        }
    }
}

impl<C: StonePlacerConstructor> Solver for SplittingSolver<C> {
    fn solve(&self, grid: Grid) -> Result<Placements> {
        let seeds = (self.starting_points)(grid);
        // Surface invalid starting points before any worker starts.
        for placements in &seeds {
            self.constructor
                .construct(grid, &Seed::new(placements.clone()))?;
        }

        let pool_size = self.worker_count();
        tracing::info!(%grid, workers = pool_size, seeds = seeds.len(), "starting splitting search");

        let done = DoneSignal::new();
        let (outcome_tx, outcome_rx) = outcome_channel();
        let (queue, requests) = channel::bounded(pool_size);
        let (idle_tx, idle_rx) = channel::bounded(1);

        let pool = Pool {
            grid,
            constructor: &self.constructor,
            done: &done,
            outcome: outcome_tx,
            queue,
            requests,
            idle: idle_tx,
        };

        thread::scope(|scope| {
            for worker in 0..pool_size {
                let pool = &pool;
                scope.spawn(move || pool.run_worker(worker));
            }

            if pool.feed(&seeds) {
                pool.detect_exhaustion(&idle_rx, pool_size);
            }
            done.close();
        });
        drop(pool);

        let result = outcome_rx.wait(grid);
        match &result {
            Ok(_) => tracing::info!(%grid, "splitting search finished with a solution"),
            Err(error) => tracing::info!(%grid, %error, "splitting search finished"),
        }
        result
    }
}
