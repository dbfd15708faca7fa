//! Square grid geometry: points, row-major traversal and separations
//!
//! Every other component reasons about the board through this module. Points are
//! ordered row-major, which is the order the placers walk the board in, and all
//! distances are kept as integral squared distances so they can be compared exactly.

use crate::io::error::{Result, SearchError};
use std::collections::HashMap;
use std::fmt;

/// Largest grid side that is searched; no solutions exist beyond it
pub const MAX_GRID_SIZE: u8 = 14;

/// Largest squared distance between two points on a maximum sized grid
pub const MAX_SEPARATION: u16 = (MAX_GRID_SIZE as u16 - 1) * (MAX_GRID_SIZE as u16 - 1) * 2;

/// Number of cells on a maximum sized grid
pub const MAX_CELLS: usize = MAX_GRID_SIZE as usize * MAX_GRID_SIZE as usize;

/// An N×N board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u8,
}

impl Grid {
    /// Create a grid with the given side length
    ///
    /// # Errors
    ///
    /// Returns an error if the side is zero or larger than [`MAX_GRID_SIZE`]
    pub const fn new(size: u8) -> Result<Self> {
        if size == 0 {
            return Err(SearchError::EmptyGrid);
        }
        if size > MAX_GRID_SIZE {
            return Err(SearchError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(Self { size })
    }

    /// Side length of the grid
    pub const fn size(self) -> u8 {
        self.size
    }

    /// Largest separation achievable between two cells of this grid
    pub const fn max_separation(self) -> u16 {
        let span = self.size as u16 - 1;
        span * span * 2
    }

    /// Test whether a point lies on the grid
    pub const fn contains(self, point: Point) -> bool {
        point.row < self.size && point.col < self.size
    }

    /// Next point in a left to right, top to bottom traversal
    ///
    /// The returned point is not guaranteed to be on the grid; stepping past the
    /// last cell yields the first column of the row below the grid.
    pub const fn advance(self, point: Point) -> Point {
        if point.col + 1 >= self.size {
            Point::new(point.row + 1, 0)
        } else {
            Point::new(point.row, point.col + 1)
        }
    }

    /// First point past the end of the row-major traversal
    pub const fn end(self) -> Point {
        Point::new(self.size, 0)
    }

    /// Iterate all cells in row-major order
    pub const fn iter(self) -> GridIter {
        GridIter {
            grid: self,
            next: Point::ORIGIN,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.size, self.size)
    }
}

impl IntoIterator for Grid {
    type Item = Point;
    type IntoIter = GridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the cells of a grid
#[derive(Clone, Debug)]
pub struct GridIter {
    grid: Grid,
    next: Point,
}

impl Iterator for GridIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let current = self.next;
        if !self.grid.contains(current) {
            return None;
        }
        self.next = self.grid.advance(current);
        Some(current)
    }
}

/// Coordinate of a peg on the grid
///
/// Displayed as a row letter and column number (`A0`); rows past `Z` fall back to
/// a numeric pair.
///
/// The derived ordering compares rows first, matching the traversal order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Zero-based row
    pub row: u8,
    /// Zero-based column
    pub col: u8,
}

impl Point {
    /// Top left corner
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a point
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match b'A'.checked_add(self.row).filter(u8::is_ascii_uppercase) {
            Some(letter) => write!(f, "{}{}", char::from(letter), self.col),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// Pegs placed on a grid, in placement order
pub type Placements = Vec<Point>;

/// Render placements as a space separated list of points
pub fn format_placements(placements: &[Point]) -> String {
    placements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Squared distance between two points
pub const fn separation(p1: Point, p2: Point) -> u16 {
    let dr = p1.row.abs_diff(p2.row) as u16;
    let dc = p1.col.abs_diff(p2.col) as u16;
    dr * dr + dc * dc
}

/// Reason a proposed solution fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionDefect {
    /// Wrong number of pegs placed
    WrongCount {
        /// Pegs actually placed
        placed: usize,
        /// Pegs required by the grid
        required: usize,
    },
    /// A peg lies outside the grid
    OutOfBounds(Point),
    /// Two pegs share a cell
    Collision(Point),
    /// Two pairs of pegs share a separation
    DuplicateSeparation {
        /// The repeated squared distance
        separation: u16,
        /// First pair found at that distance
        first: (Point, Point),
        /// Second pair found at that distance
        second: (Point, Point),
    },
}

impl fmt::Display for SolutionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongCount { placed, required } => {
                write!(f, "{placed} pegs have been placed, but need {required}")
            }
            Self::OutOfBounds(point) => write!(f, "{point} is out of bounds"),
            Self::Collision(point) => write!(f, "multiple pegs placed at {point}"),
            Self::DuplicateSeparation {
                separation,
                first,
                second,
            } => write!(
                f,
                "duplicated separation with squared distance {separation} between both {}-{} and {}-{}",
                first.0, first.1, second.0, second.1
            ),
        }
    }
}

/// Check that a proposed solution is valid for a grid
///
/// A valid solution has exactly one peg per grid side, every peg on the grid,
/// and pairwise distinct separations.
///
/// # Errors
///
/// Returns the first defect found
pub fn check_valid_solution(grid: Grid, placements: &[Point]) -> std::result::Result<(), SolutionDefect> {
    if placements.len() != grid.size() as usize {
        return Err(SolutionDefect::WrongCount {
            placed: placements.len(),
            required: grid.size() as usize,
        });
    }

    let mut seen: HashMap<u16, (Point, Point)> = HashMap::new();
    for (i, &p1) in placements.iter().enumerate() {
        if !grid.contains(p1) {
            return Err(SolutionDefect::OutOfBounds(p1));
        }
        for &p2 in placements.iter().skip(i + 1) {
            let sep = separation(p1, p2);
            if sep == 0 {
                return Err(SolutionDefect::Collision(p1));
            }
            if let Some(&first) = seen.get(&sep) {
                return Err(SolutionDefect::DuplicateSeparation {
                    separation: sep,
                    first,
                    second: (p1, p2),
                });
            }
            seen.insert(sep, (p1, p2));
        }
    }
    Ok(())
}
