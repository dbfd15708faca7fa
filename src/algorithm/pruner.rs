//! Pruning tables: cells that can no longer receive a peg
//!
//! Two situations rule a cell out once pegs are down:
//! - it is equidistant from two placed pegs, so a peg there would repeat a separation
//!   with itself (the apex of an isosceles triangle), and
//! - it lies on a circle of an already used separation around a placed peg.
//!
//! The runtime pruner scans the grid for every query. The precomputed pruner
//! enumerates every answer once per grid size and answers queries with a word-wise
//! union of a stored bitset.

use crate::algorithm::bitset::BitPointSet;
use crate::algorithm::cache;
use crate::algorithm::sets::PointSet;
use crate::spatial::grid::{Grid, Point, separation};
use ndarray::{Array3, Array4};
use std::sync::Arc;

/// Source of cells ruled out by existing pegs
pub trait Pruner: Send + Sync + 'static {
    /// Obtain a pruner for the grid
    fn for_grid(grid: Grid) -> Arc<Self>
    where
        Self: Sized;

    /// Grid the pruner answers for
    fn grid(&self) -> Grid;

    /// Add every cell equidistant from `p1` and `p2`
    fn prune_isosceles<S: PointSet>(&self, target: &mut S, p1: Point, p2: Point);

    /// Add every cell at squared distance `sep` from `center`
    fn prune_circles<S: PointSet>(&self, target: &mut S, center: Point, sep: u16);
}

/// Pruner that answers each query by scanning the whole grid
#[derive(Clone, Copy, Debug)]
pub struct RuntimePruner {
    grid: Grid,
}

impl RuntimePruner {
    /// Create a scanning pruner for the grid
    pub const fn new(grid: Grid) -> Self {
        Self { grid }
    }
}

impl Pruner for RuntimePruner {
    fn for_grid(grid: Grid) -> Arc<Self> {
        Arc::new(Self::new(grid))
    }

    fn grid(&self) -> Grid {
        self.grid
    }

    fn prune_isosceles<S: PointSet>(&self, target: &mut S, p1: Point, p2: Point) {
        for p3 in self.grid {
            if separation(p1, p3) == separation(p2, p3) {
                target.insert(p3);
            }
        }
    }

    fn prune_circles<S: PointSet>(&self, target: &mut S, center: Point, sep: u16) {
        for p in self.grid {
            if separation(center, p) == sep {
                target.insert(p);
            }
        }
    }
}

/// Pruner answering every query from tables built once per grid size
///
/// Obtain instances through [`Pruner::for_grid`], which shares one table per grid
/// size across the process.
pub struct PrecomputedPruner {
    grid: Grid,
    /// Indexed by `[r1, c1, r2, c2]`
    isosceles: Array4<BitPointSet>,
    /// Indexed by `[row, col, sep]`
    circles: Array3<BitPointSet>,
}

impl PrecomputedPruner {
    /// Enumerate every point pair and every point/separation combination
    ///
    /// This is O(N⁶) work for an N×N grid; callers should go through the shared
    /// cache rather than building tables directly.
    pub fn build(grid: Grid) -> Self {
        let scanner = RuntimePruner::new(grid);
        let n = grid.size() as usize;
        let seps = grid.max_separation() as usize + 1;

        let isosceles = Array4::from_shape_fn((n, n, n, n), |(r1, c1, r2, c2)| {
            let mut set = BitPointSet::new();
            scanner.prune_isosceles(
                &mut set,
                Point::new(r1 as u8, c1 as u8),
                Point::new(r2 as u8, c2 as u8),
            );
            set
        });

        let circles = Array3::from_shape_fn((n, n, seps), |(row, col, sep)| {
            let mut set = BitPointSet::new();
            scanner.prune_circles(&mut set, Point::new(row as u8, col as u8), sep as u16);
            set
        });

        Self {
            grid,
            isosceles,
            circles,
        }
    }
}

impl Pruner for PrecomputedPruner {
    fn for_grid(grid: Grid) -> Arc<Self> {
        cache::shared_precomputed_pruner(grid)
    }

    fn grid(&self) -> Grid {
        self.grid
    }

    fn prune_isosceles<S: PointSet>(&self, target: &mut S, p1: Point, p2: Point) {
        let index = [
            p1.row as usize,
            p1.col as usize,
            p2.row as usize,
            p2.col as usize,
        ];
        if let Some(set) = self.isosceles.get(index) {
            target.union_with(set);
        }
    }

    fn prune_circles<S: PointSet>(&self, target: &mut S, center: Point, sep: u16) {
        let index = [center.row as usize, center.col as usize, sep as usize];
        if let Some(set) = self.circles.get(index) {
            target.union_with(set);
        }
    }
}
