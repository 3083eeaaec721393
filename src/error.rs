use core::fmt;

use crate::Coordinate;

/// Errors produced while generating mazes, parsing grids or querying paths.
///
/// An unreachable goal is not an error: path queries report it with an empty path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Maze dimensions must be odd and at least [MIN_DIMENSION](crate::MIN_DIMENSION).
    InvalidDimensions { rows: usize, cols: usize },
    /// Carving left fewer floor cells than needed to place start, key and exit.
    InsufficientFloorCells { found: usize },
    /// A query endpoint lies outside the grid.
    OutOfBounds {
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },
    /// Text could not be parsed into a grid.
    MalformedGrid { line: usize, reason: String },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "invalid maze dimensions {rows}x{cols}: both must be odd and at least {}",
                crate::MIN_DIMENSION
            ),
            Self::InsufficientFloorCells { found } => {
                write!(f, "need at least 3 floor cells, carving produced {found}")
            }
            Self::OutOfBounds {
                coordinate,
                rows,
                cols,
            } => write!(f, "{coordinate} lies outside the {rows}x{cols} grid"),
            Self::MalformedGrid { line, reason } => {
                write!(f, "malformed grid at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for MazeError {}
