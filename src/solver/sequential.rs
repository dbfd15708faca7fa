//! Single-threaded solver

use crate::algorithm::placer::{Seed, StonePlacerConstructor};
use crate::io::error::{Result, SearchError};
use crate::solver::Solver;
use crate::solver::search::find_solution;
use crate::spatial::grid::{Grid, Placements};
use crate::spatial::starting::StartingPointsProvider;

/// Searches each starting point in turn on the calling thread
///
/// Fully deterministic: the same provider and placer always return the same
/// placement.
pub struct SequentialSolver<C> {
    starting_points: StartingPointsProvider,
    constructor: C,
}

impl<C: StonePlacerConstructor> SequentialSolver<C> {
    /// Create a solver from a starting point provider and a placer constructor
    pub const fn new(starting_points: StartingPointsProvider, constructor: C) -> Self {
        Self {
            starting_points,
            constructor,
        }
    }
}

impl<C: StonePlacerConstructor> Solver for SequentialSolver<C> {
    fn solve(&self, grid: Grid) -> Result<Placements> {
        let seeds = (self.starting_points)(grid);
        tracing::info!(%grid, seeds = seeds.len(), "starting sequential search");

        for (index, placements) in seeds.into_iter().enumerate() {
            let mut placer = self.constructor.construct(grid, &Seed::new(placements))?;
            if let Some(solution) = find_solution(&mut placer) {
                tracing::info!(%grid, seed = index, "solution found");
                return Ok(solution);
            }
            tracing::debug!(%grid, seed = index, "starting point exhausted");
        }
        Err(SearchError::NoSolution { size: grid.size() })
    }
}
