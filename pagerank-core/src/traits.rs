use std::fmt::Debug;

/// Generic trait representing a matrix.
/// A vector is a matrix with a single column.
pub trait Matrix: Debug {
    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }

    /// Checks if the matrix is a column vector.
    fn is_vector(&self) -> bool {
        self.cols() == 1
    }
}
