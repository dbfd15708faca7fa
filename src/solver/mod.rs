//! Depth-first search strategies
//!
//! This module contains:
//! - The shared recursive search loop and its observer hooks
//! - Cancellation and outcome channels for the parallel strategies
//! - Sequential, independent-parallel and work-splitting solvers

/// Independent searches, one thread per starting point
pub mod independent;
/// Recursive depth-first search loop
pub mod search;
/// Single-threaded search
pub mod sequential;
/// Done signal and single-slot outcome channel
pub mod signal;
/// Worker pool that splits work with idle workers
pub mod splitting;

use crate::io::error::Result;
use crate::spatial::grid::{Grid, Placements};

pub use independent::IndependentSolver;
pub use sequential::SequentialSolver;
pub use splitting::SplittingSolver;

/// Strategy for finding a full placement on a grid
pub trait Solver: Send + Sync {
    /// Find a placement of one peg per grid side with distinct separations
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::NoSolution`] once every starting point is
    /// exhausted, or [`crate::SearchError::InvalidSeed`] if a starting point breaks a
    /// placement rule
    fn solve(&self, grid: Grid) -> Result<Placements>;
}
