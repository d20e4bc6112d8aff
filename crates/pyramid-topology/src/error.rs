//! Error types for pyramid-topology.

use thiserror::Error;

/// Result type for pyramid-topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a pyramid.
#[derive(Debug, Error)]
pub enum Error {
    /// A pyramid needs at least one row.
    #[error("pyramid must have at least one row")]
    EmptyPyramid,

    /// Row count too large to address with positions.
    #[error("row count {0} is too large")]
    RowCountTooLarge(usize),

    /// A row does not have `2 * row + 1` cells.
    #[error("row {row} has {actual} cells, expected {expected}")]
    MalformedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A color sequence with nothing in it.
    #[error("color sequence is empty")]
    EmptySequence,

    /// A color name outside the palette.
    #[error("unknown color: {0}")]
    UnknownColor(String),
}
