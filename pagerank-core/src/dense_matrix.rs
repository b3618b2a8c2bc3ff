use crate::error::{ComputationError, Result};
use crate::ops;
use crate::traits::Matrix;

/// Represents a dense matrix of `f64` stored in row-major order on the CPU.
///
/// The dimensions are fixed at construction. A vector is a `DenseMatrix`
/// with a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // Data stored row-major: data[row * cols + col]
}

impl DenseMatrix {
    /// Creates a new zero-initialized matrix.
    ///
    /// # Errors
    /// Returns `ComputationError::Allocation` if either dimension is zero, if
    /// `rows * cols` overflows, or if the buffer cannot be reserved.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// Creates a new matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        let mut data = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            log::error!("Failed to reserve {} elements for a {}x{} matrix", len, rows, cols);
            return Err(ComputationError::Allocation { rows, cols });
        }
        data.resize(len, value);
        Ok(Self { rows, cols, data })
    }

    /// Creates a column vector of `len` zeros.
    pub fn zero_vector(len: usize) -> Result<Self> {
        Self::new(len, 1)
    }

    /// Creates a matrix from raw data, assuming row-major order.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            return Err(ComputationError::DataLength {
                rows,
                cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix from a list of rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(ComputationError::DataLength {
                    rows: rows.len(),
                    cols,
                    found: data.len() + row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_data(rows.len(), cols, data)
    }

    /// Creates a column vector holding `values`.
    pub fn from_column(values: Vec<f64>) -> Result<Self> {
        Self::from_data(values.len(), 1, values)
    }

    /// Gets the element at the specified row and column.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let index = self.index_of(row, col)?;
        Ok(self.data[index])
    }

    /// Sets the element at the specified row and column.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let index = self.index_of(row, col)?;
        self.data[index] = value;
        Ok(())
    }

    /// Returns the elements of one row.
    pub fn row(&self, row: usize) -> Result<&[f64]> {
        if row >= self.rows {
            return Err(ComputationError::OutOfBounds {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Returns a slice view of the underlying data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns a mutable slice view of the underlying data.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consumes the matrix, returning its row-major buffer.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    // --- Arithmetic, see `ops` ---

    /// Elementwise `self += other`.
    pub fn add_assign(&mut self, other: &DenseMatrix) -> Result<()> {
        ops::add(self, other)
    }

    /// Elementwise `self *= factor`.
    pub fn scale(&mut self, factor: f64) {
        ops::scale(self, factor)
    }

    /// Matrix product `self * right`, returned as a new matrix.
    pub fn multiply(&self, right: &DenseMatrix) -> Result<DenseMatrix> {
        ops::multiply(self, right)
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(ComputationError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(ComputationError::Allocation { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(ComputationError::Allocation { rows, cols })
}

impl Matrix for DenseMatrix {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_matrix_new_is_zeroed() {
        let matrix = DenseMatrix::new(3, 4).unwrap();
        assert_eq!(matrix.dims(), (3, 4));
        assert!(matrix.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dense_matrix_new_rejects_zero_dims() {
        assert_eq!(
            DenseMatrix::new(0, 3),
            Err(ComputationError::Allocation { rows: 0, cols: 3 })
        );
        assert_eq!(
            DenseMatrix::new(2, 0),
            Err(ComputationError::Allocation { rows: 2, cols: 0 })
        );
    }

    #[test]
    fn test_dense_matrix_new_rejects_overflowing_dims() {
        assert!(matches!(
            DenseMatrix::new(usize::MAX, 2),
            Err(ComputationError::Allocation { .. })
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut matrix = DenseMatrix::new(2, 3).unwrap();
        matrix.set(1, 2, 7.5).unwrap();
        assert_eq!(matrix.get(1, 2), Ok(7.5));
        assert_eq!(matrix.data()[5], 7.5);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let matrix = DenseMatrix::new(2, 3).unwrap();
        assert_eq!(
            matrix.get(2, 0),
            Err(ComputationError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(matrix.get(0, 3).is_err());
    }

    #[test]
    fn test_set_out_of_bounds_leaves_matrix_untouched() {
        let mut matrix = DenseMatrix::new(2, 2).unwrap();
        assert!(matrix.set(0, 2, 1.0).is_err());
        assert!(matrix.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_rows() {
        let matrix = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.dims(), (2, 2));
        assert_eq!(matrix.get(1, 0), Ok(3.0));
        assert_eq!(matrix.row(1).unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(ComputationError::DataLength { .. })));
    }

    #[test]
    fn test_from_data_length_mismatch() {
        assert_eq!(
            DenseMatrix::from_data(2, 2, vec![1.0; 3]),
            Err(ComputationError::DataLength {
                rows: 2,
                cols: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_vector_shape() {
        let vector = DenseMatrix::from_column(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(vector.is_vector());
        assert!(!vector.is_square());
        assert_eq!(vector.rows(), 3);
    }
}
