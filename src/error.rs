use thiserror::Error;

/// The single failure kind of this crate: a checked precondition on an index,
/// a dimension, or a non-empty container was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutOfRangeError {
    #[error("Index {index} out of range for length {len}")]
    Index { index: usize, len: usize },
    #[error("Insert position {index} out of range for length {len}")]
    InsertPosition { index: usize, len: usize },
    #[error("Container is empty")]
    Empty,
    #[error("Negative dimensions: {rows}x{cols}")]
    NegativeDimensions { rows: isize, cols: isize },
    #[error("Dimensions must match: {rows}x{cols} vs {other_rows}x{other_cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        other_rows: usize,
        other_cols: usize,
    },
    #[error("Sum at ({row}, {col}) out of range for i32")]
    Overflow { row: usize, col: usize },
}
