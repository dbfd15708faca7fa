//! Command-line interface: select an implementation, run the search, report the result

use crate::algorithm::arena::{
    OpportunisticArenaConstructor, OrderedArenaConstructor, PruningArenaConstructor,
};
use crate::algorithm::bitset::{BitPointSet, BitSeparationSet};
use crate::algorithm::cache;
use crate::algorithm::placer::{OrderedConstructor, StonePlacerConstructor, UnorderedConstructor};
use crate::algorithm::pruner::{PrecomputedPruner, Pruner, RuntimePruner};
use crate::algorithm::sets::{HashPointSet, HashSeparationSet, PointSet, SeparationSet};
use crate::io::configuration::DEFAULT_GRID_SIZE;
use crate::io::error::{Result, SearchError};
use crate::io::logging;
use crate::io::progress::SearchProgress;
use crate::solver::{IndependentSolver, SequentialSolver, Solver, SplittingSolver};
use crate::spatial::grid::{Grid, Placements, check_valid_solution, format_placements};
use crate::spatial::starting::{self, StartingPointsProvider};
use clap::{Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Placement state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlacerKind {
    /// Any free cell, every ordering explored
    Unordered,
    /// Canonical ordering, fresh state per placement
    Ordered,
    /// Canonical ordering over preallocated frames
    OrderedNoalloc,
    /// Preallocated frames with batched pruning
    OrderedNoallocPruning,
    /// Preallocated frames with per-pair pruning
    OrderedNoallocOpportunisticPruning,
}

/// Membership set family
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SetKind {
    /// Hash set reference implementation
    Hash,
    /// Fixed-size bitset
    Bits,
}

/// Pruning table source
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrunerKind {
    /// Scan the grid for every query
    Runtime,
    /// Tables built once per grid size
    Precomputed,
}

/// Seed placements to search from
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StartKind {
    /// A single empty seed
    EmptyGrid,
    /// One peg in each cell of the first octant
    FirstOctant,
}

impl StartKind {
    /// Provider for this choice
    pub fn provider(self) -> StartingPointsProvider {
        match self {
            Self::EmptyGrid => starting::empty_grid,
            Self::FirstOctant => starting::first_octant,
        }
    }
}

/// Search strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SolverKind {
    /// One starting point after another on the calling thread
    Sequential,
    /// One thread per starting point
    Independent,
    /// Worker pool that splits work with idle workers
    Splitting,
}

#[derive(Parser, Debug)]
#[command(name = "pegboard")]
#[command(
    author,
    version,
    about = "Place N pegs on an NxN grid so that every pair has a distinct separation"
)]
/// Command-line arguments for the peg search
pub struct Cli {
    /// Grid side length
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub size: u8,

    /// Placement state machine
    #[arg(short, long, value_enum, default_value_t = PlacerKind::OrderedNoalloc)]
    pub placer: PlacerKind,

    /// Separation set used by the copying placers
    #[arg(long, value_enum, default_value_t = SetKind::Bits)]
    pub separation_set: SetKind,

    /// Point set used by the unordered placer
    #[arg(long, value_enum, default_value_t = SetKind::Bits)]
    pub point_set: SetKind,

    /// Pruner used by the pruning placers
    #[arg(long, value_enum, default_value_t = PrunerKind::Precomputed)]
    pub pruner: PrunerKind,

    /// Seed placements
    #[arg(long, value_enum, default_value_t = StartKind::FirstOctant)]
    pub start: StartKind,

    /// Search strategy
    #[arg(long, value_enum, default_value_t = SolverKind::Splitting)]
    pub solver: SolverKind,

    /// Worker threads for the splitting solver; 0 uses every available core
    #[arg(short, long, default_value_t = 0)]
    pub workers: usize,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter directive, overriding the environment
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Write log events to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub trace_file: Option<PathBuf>,
}

impl Cli {
    /// Check if the progress spinner should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the solver selected by the flags
    pub fn build_solver(&self) -> Box<dyn Solver> {
        match self.placer {
            PlacerKind::Unordered => match (self.separation_set, self.point_set) {
                (SetKind::Hash, SetKind::Hash) => self.unordered::<HashSeparationSet, HashPointSet>(),
                (SetKind::Hash, SetKind::Bits) => self.unordered::<HashSeparationSet, BitPointSet>(),
                (SetKind::Bits, SetKind::Hash) => self.unordered::<BitSeparationSet, HashPointSet>(),
                (SetKind::Bits, SetKind::Bits) => self.unordered::<BitSeparationSet, BitPointSet>(),
            },
            PlacerKind::Ordered => match self.separation_set {
                SetKind::Hash => self.with_constructor(OrderedConstructor::<HashSeparationSet>::new()),
                SetKind::Bits => self.with_constructor(OrderedConstructor::<BitSeparationSet>::new()),
            },
            PlacerKind::OrderedNoalloc => self.with_constructor(OrderedArenaConstructor::new()),
            PlacerKind::OrderedNoallocPruning => match self.pruner {
                PrunerKind::Runtime => self.pruning::<RuntimePruner>(),
                PrunerKind::Precomputed => self.pruning::<PrecomputedPruner>(),
            },
            PlacerKind::OrderedNoallocOpportunisticPruning => match self.pruner {
                PrunerKind::Runtime => self.opportunistic::<RuntimePruner>(),
                PrunerKind::Precomputed => self.opportunistic::<PrecomputedPruner>(),
            },
        }
    }

    fn unordered<S: SeparationSet + 'static, P: PointSet + 'static>(&self) -> Box<dyn Solver> {
        self.with_constructor(UnorderedConstructor::<S, P>::new())
    }

    fn pruning<P: Pruner>(&self) -> Box<dyn Solver> {
        self.with_constructor(PruningArenaConstructor::<P>::new())
    }

    fn opportunistic<P: Pruner>(&self) -> Box<dyn Solver> {
        self.with_constructor(OpportunisticArenaConstructor::<P>::new())
    }

    fn with_constructor<C>(&self, constructor: C) -> Box<dyn Solver>
    where
        C: StonePlacerConstructor + 'static,
    {
        let provider = self.start.provider();
        match self.solver {
            SolverKind::Sequential => Box::new(SequentialSolver::new(provider, constructor)),
            SolverKind::Independent => Box::new(IndependentSolver::new(provider, constructor)),
            SolverKind::Splitting => {
                let solver = SplittingSolver::new(provider, constructor);
                match NonZeroUsize::new(self.workers) {
                    Some(workers) => Box::new(solver.with_workers(workers)),
                    None => Box::new(solver),
                }
            }
        }
    }
}

/// Turn a search result into the line printed for the user
///
/// Solutions are sorted and validated again before they are reported.
///
/// # Errors
///
/// Returns [`SearchError::InvalidSolution`] if the solver returned a bad placement,
/// and passes through any error other than an exhausted search
pub fn report(grid: Grid, result: Result<Placements>, elapsed: Duration) -> Result<String> {
    match result {
        Ok(mut placements) => {
            placements.sort_unstable();
            if let Err(defect) = check_valid_solution(grid, &placements) {
                return Err(SearchError::InvalidSolution { placements, defect });
            }
            Ok(format!(
                "solution found for {grid} grid in {elapsed:?}: {}",
                format_placements(&placements)
            ))
        }
        Err(error) if error.is_no_solution() => {
            Ok(format!("no solution found for {grid} grid in {elapsed:?}"))
        }
        Err(error) => Err(error),
    }
}

/// Runs one search as configured on the command line
pub struct SearchRunner {
    cli: Cli,
}

impl SearchRunner {
    /// Create a runner for the parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the search and print the outcome
    ///
    /// # Errors
    ///
    /// Returns an error if logging cannot be set up, the grid size is refused, a
    /// starting point is invalid, or the solver returns an invalid placement
    pub fn run(&self) -> Result<()> {
        logging::init(self.cli.log_level.as_deref(), self.cli.trace_file.as_deref())?;
        let line = self.search()?;

        // Allow print for reporting the search outcome
        #[allow(clippy::print_stdout)]
        {
            println!("{line}");
        }
        Ok(())
    }

    /// Run the search and return the report line without printing it
    ///
    /// # Errors
    ///
    /// See [`Self::run`]
    pub fn search(&self) -> Result<String> {
        let grid = Grid::new(self.cli.size)?;
        let solver = self.cli.build_solver();
        tracing::info!(
            %grid,
            placer = ?self.cli.placer,
            solver = ?self.cli.solver,
            start = ?self.cli.start,
            "search configured"
        );

        let progress = if self.cli.should_show_progress() {
            SearchProgress::start(format!("searching {grid} grid"))
        } else {
            SearchProgress::hidden()
        };
        let started = Instant::now();
        let result = solver.solve(grid);
        let elapsed = started.elapsed();
        progress.finish();
        tracing::debug!(stats = ?cache::shared_cache_stats(), "pruner cache");

        report(grid, result, elapsed)
    }
}
