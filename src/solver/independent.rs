//! One independent search per starting point

use crate::algorithm::placer::{Seed, StonePlacerConstructor};
use crate::io::error::{Result, SearchError};
use crate::solver::Solver;
use crate::solver::search::{Halt, descend};
use crate::solver::signal::{CancelOnDone, DoneSignal, Outcome, outcome_channel};
use crate::spatial::grid::{Grid, Placements};
use crate::spatial::starting::StartingPointsProvider;
use std::ops::ControlFlow;
use std::thread;

/// Runs every starting point on its own thread
///
/// The first searcher to finish a placement reports it and closes the done signal,
/// which stops the others at their next step. A supervisor reports exhaustion once
/// every searcher has returned without a result.
pub struct IndependentSolver<C> {
    starting_points: StartingPointsProvider,
    constructor: C,
}

impl<C: StonePlacerConstructor> IndependentSolver<C> {
    /// Create a solver from a starting point provider and a placer constructor
    pub const fn new(starting_points: StartingPointsProvider, constructor: C) -> Self {
        Self {
            starting_points,
            constructor,
        }
    }
}

impl<C: StonePlacerConstructor> Solver for IndependentSolver<C> {
    fn solve(&self, grid: Grid) -> Result<Placements> {
        let placers = (self.starting_points)(grid)
            .into_iter()
            .map(|placements| self.constructor.construct(grid, &Seed::new(placements)))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(%grid, searchers = placers.len(), "starting independent search");

        let done = DoneSignal::new();
        let (outcome_tx, outcome_rx) = outcome_channel();

        let result = thread::scope(|scope| {
            let searchers: Vec<_> = placers
                .into_iter()
                .enumerate()
                .map(|(index, mut placer)| {
                    let outcome_tx = outcome_tx.clone();
                    let done = &done;
                    scope.spawn(move || {
                        let mut observer = CancelOnDone::new(done);
                        match descend(&mut placer, &mut observer) {
                            ControlFlow::Break(Halt::Found(solution)) => {
                                tracing::debug!(searcher = index, "solution found");
                                outcome_tx.report(Outcome::Found(solution));
                                done.close();
                            }
                            ControlFlow::Break(Halt::Cancelled) => {
                                tracing::debug!(searcher = index, "search cancelled");
                            }
                            ControlFlow::Continue(()) => {
                                tracing::debug!(searcher = index, "starting point exhausted");
                            }
                        }
                    })
                })
                .collect();

            let supervisor_tx = outcome_tx.clone();
            scope.spawn(move || {
                let mut lost = false;
                for searcher in searchers {
                    lost |= searcher.join().is_err();
                }
                if lost {
                    supervisor_tx.report(Outcome::Failed(SearchError::WorkerLost));
                } else {
                    supervisor_tx.report(Outcome::Exhausted);
                }
            });
            drop(outcome_tx);

            let result = outcome_rx.wait(grid);
            done.close();
            result
        });

        match &result {
            Ok(_) => tracing::info!(%grid, "independent search finished with a solution"),
            Err(error) => tracing::info!(%grid, %error, "independent search finished"),
        }
        result
    }
}
