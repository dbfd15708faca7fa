//! Board geometry and search seeds
//!
//! This module contains:
//! - Grid, point and separation primitives with solution validation
//! - Starting point providers that seed the solvers

/// Grid geometry, separations and solution validation
pub mod grid;
/// Seed placements for the solvers
pub mod starting;

pub use grid::{Grid, Placements, Point};
