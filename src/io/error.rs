//! Error types for search construction, execution and reporting

use crate::algorithm::placer::ConstraintViolation;
use crate::spatial::grid::{Placements, SolutionDefect, format_placements};
use std::fmt;
use std::path::PathBuf;

/// Main error type for all search operations
#[derive(Debug)]
pub enum SearchError {
    /// A grid with no cells was requested
    EmptyGrid,

    /// Grid side exceeds the largest size that can hold a solution
    GridTooLarge {
        /// Requested side length
        size: u8,
        /// Largest side length that is searched
        max: u8,
    },

    /// Every starting point was exhausted without finding a placement
    NoSolution {
        /// Side length of the grid that was searched
        size: u8,
    },

    /// A seed placement violates the placement invariants
    ///
    /// Seeds come from starting point providers or from work hand-offs, so this
    /// indicates a programming error rather than a property of the search space.
    InvalidSeed {
        /// The offending seed
        seed: Placements,
        /// Why the seed could not be placed
        violation: ConstraintViolation,
    },

    /// A returned placement failed independent validation
    InvalidSolution {
        /// The rejected placement
        placements: Placements,
        /// First defect found by the validator
        defect: SolutionDefect,
    },

    /// Every parallel searcher exited without reporting an outcome
    WorkerLost,

    /// A log filter directive could not be parsed
    InvalidLogFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "Grid must have at least one cell"),
            Self::GridTooLarge { size, max } => write!(
                f,
                "No solutions exist for grids larger than {max}x{max}, refusing to search {size}x{size}"
            ),
            Self::NoSolution { size } => {
                write!(f, "No solutions found for {size}x{size} grid")
            }
            Self::InvalidSeed { seed, violation } => write!(
                f,
                "Invalid seed placement [{}]: {violation}",
                format_placements(seed)
            ),
            Self::InvalidSolution { placements, defect } => write!(
                f,
                "Solution [{}] is invalid: {defect}",
                format_placements(placements)
            ),
            Self::WorkerLost => {
                write!(f, "All search workers exited without reporting an outcome")
            }
            Self::InvalidLogFilter { filter, reason } => {
                write!(f, "Invalid log filter '{filter}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(
                f,
                "File system error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for search results
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Whether this error only reports that the search space held no solution
    pub const fn is_no_solution(&self) -> bool {
        matches!(self, Self::NoSolution { .. })
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> SearchError {
    SearchError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
