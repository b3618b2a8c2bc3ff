use thiserror::Error;

/// Errors raised by matrix construction and arithmetic.
///
/// Every variant carries the offending indices or dimensions so that the
/// boundary layer can report them verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("Cannot allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    #[error("Index ({row}, {col}) is out of bounds for a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Dimension mismatch in {operation}: left is {}x{}, right is {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Data length ({found}) does not match dimensions ({rows}x{cols})")]
    DataLength {
        rows: usize,
        cols: usize,
        found: usize,
    },
}

pub type Result<T> = core::result::Result<T, ComputationError>;
