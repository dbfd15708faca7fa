//! Starting point providers: the seed placements a solver searches from

use crate::spatial::grid::{Grid, Placements, Point};

/// Produces the seed placements for a grid
pub type StartingPointsProvider = fn(Grid) -> Vec<Placements>;

/// A single empty seed, searching the whole grid
pub fn empty_grid(_grid: Grid) -> Vec<Placements> {
    vec![Vec::new()]
}

/// One seed per cell of the first octant, each holding a single peg
///
/// The octant runs clockwise from the top left corner: rows and columns in the
/// top left quadrant with the column not left of the row. Every other first peg
/// is a rotation or reflection of one of these.
pub fn first_octant(grid: Grid) -> Vec<Placements> {
    let size = grid.size();
    let half = size.div_ceil(2);
    (0..half)
        .flat_map(|row| (row..half).map(move |col| vec![Point::new(row, col)]))
        .collect()
}
