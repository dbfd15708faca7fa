//! Search for N pegs on an N×N board with every pairwise separation distinct
//!
//! Placers extend partial placements one peg at a time under a canonical ordering,
//! tracking used separations in bit-packed sets and optionally ruling out cells
//! with precomputed pruning tables. Solvers drive the placers depth first, either
//! sequentially or across threads with cooperative cancellation and work splitting.

#![forbid(unsafe_code)]

/// Membership sets, pruners and placement state machines
pub mod algorithm;
/// Command line, configuration, logging and error handling
pub mod io;
/// Depth-first search strategies
pub mod solver;
/// Grid geometry and starting points
pub mod spatial;

pub use io::error::{Result, SearchError};
