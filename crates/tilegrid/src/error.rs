//! Map validation errors.

use thiserror::Error;

/// Reasons a tile matrix cannot be used as a map.
///
/// All of these are fatal configuration errors: they are reported while the
/// map is being built, before the simulation's first tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The matrix has fewer rows than the minimum playable size.
    #[error("map is too small: {size} rows (minimum {min})")]
    TooSmall {
        /// Number of rows supplied.
        size: usize,
        /// Minimum accepted size.
        min: usize,
    },
    /// A row's length differs from the number of rows.
    #[error("map is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Expected length.
        expected: usize,
    },
    /// A cell holds a value that is not a tile code.
    #[error("invalid tile code {code} at ({x}, {y})")]
    InvalidTile {
        /// First grid index.
        x: usize,
        /// Second grid index.
        y: usize,
        /// The rejected value.
        code: u8,
    },
    /// A cell on the outer ring is not an indestructible wall.
    #[error("border cell ({x}, {y}) is not a wall")]
    OpenBorder {
        /// First grid index.
        x: usize,
        /// Second grid index.
        y: usize,
    },
}
