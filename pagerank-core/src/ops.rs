// Dense matrix arithmetic on the CPU.
// Every operation checks operand dimensions before touching any buffer, so a
// failed call leaves all operands unmodified.

use crate::dense_matrix::DenseMatrix;
use crate::error::{ComputationError, Result};
use crate::traits::Matrix;

fn ensure_same_dims(
    operation: &'static str,
    left: &DenseMatrix,
    right: &DenseMatrix,
) -> Result<()> {
    if left.dims() != right.dims() {
        return Err(ComputationError::DimensionMismatch {
            operation,
            left: left.dims(),
            right: right.dims(),
        });
    }
    Ok(())
}

/// Copies `source` into `dest`. Both must have identical dimensions.
pub fn copy(dest: &mut DenseMatrix, source: &DenseMatrix) -> Result<()> {
    ensure_same_dims("copy", dest, source)?;
    dest.data_mut().copy_from_slice(source.data());
    Ok(())
}

/// Elementwise `dest += other`. Both must have identical dimensions.
pub fn add(dest: &mut DenseMatrix, other: &DenseMatrix) -> Result<()> {
    ensure_same_dims("add", dest, other)?;
    dest.data_mut()
        .iter_mut()
        .zip(other.data())
        .for_each(|(d, o)| *d += o);
    Ok(())
}

/// Elementwise `matrix *= factor`.
pub fn scale(matrix: &mut DenseMatrix, factor: f64) {
    matrix.data_mut().iter_mut().for_each(|v| *v *= factor);
}

/// Standard matrix product `left * right`.
///
/// # Errors
/// Returns `ComputationError::DimensionMismatch` unless `left.cols() == right.rows()`.
/// No result buffer is allocated in that case.
pub fn multiply(left: &DenseMatrix, right: &DenseMatrix) -> Result<DenseMatrix> {
    if left.cols() != right.rows() {
        return Err(ComputationError::DimensionMismatch {
            operation: "multiply",
            left: left.dims(),
            right: right.dims(),
        });
    }

    let (rows, inner) = left.dims();
    let cols = right.cols();
    let mut result = DenseMatrix::new(rows, cols)?;
    let lhs = left.data();
    let rhs = right.data();
    let out = result.data_mut();
    for i in 0..rows {
        let left_row = &lhs[i * inner..(i + 1) * inner];
        for j in 0..cols {
            let mut dot = 0.0;
            for (k, l) in left_row.iter().enumerate() {
                dot += l * rhs[k * cols + j];
            }
            out[i * cols + j] = dot;
        }
    }
    Ok(result)
}

/// Dot product of row `row` of `matrix` with the column vector `x`.
///
/// Accumulates in column order, so it agrees exactly with the corresponding
/// entry of `multiply(matrix, x)`.
pub fn row_dot(matrix: &DenseMatrix, row: usize, x: &[f64]) -> Result<f64> {
    if matrix.cols() != x.len() {
        return Err(ComputationError::DimensionMismatch {
            operation: "row_dot",
            left: matrix.dims(),
            right: (x.len(), 1),
        });
    }
    let values = matrix.row(row)?;
    Ok(values.iter().zip(x).fold(0.0, |acc, (w, v)| acc + w * v))
}

/// L1 distance between two equally sized slices.
pub fn l1_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ComputationError::DimensionMismatch {
            operation: "l1_distance",
            left: (a.len(), 1),
            right: (b.len(), 1),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}

/// Checks that every column of a square matrix sums to 1 within `tolerance`
/// and that no entry is negative.
pub fn is_column_stochastic(matrix: &DenseMatrix, tolerance: f64) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let (rows, cols) = matrix.dims();
    let data = matrix.data();
    if data.iter().any(|&v| v < 0.0) {
        return false;
    }
    (0..cols).all(|j| {
        let sum: f64 = (0..rows).map(|i| data[i * cols + j]).sum();
        let ok = (sum - 1.0).abs() <= tolerance;
        if !ok {
            log::debug!("Column {} sums to {}", j, sum);
        }
        ok
    })
}
