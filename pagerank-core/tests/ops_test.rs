use pagerank_core::{ops, ComputationError, DenseMatrix, Matrix};

// Helper for float comparison in tests
fn assert_approx_eq_vec(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ");
    for i in 0..a.len() {
        let diff = (a[i] - b[i]).abs();
        assert!(
            diff <= tolerance,
            "Verification failed at index {}: expected {}, got {}, diff {}",
            i,
            b[i],
            a[i],
            diff
        );
    }
}

#[test]
fn test_add_mismatch_leaves_operands_unchanged() -> Result<(), ComputationError> {
    let mut dest = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])?;
    let other = DenseMatrix::from_column(vec![1.0, 1.0])?;
    let (dest_before, other_before) = (dest.clone(), other.clone());

    let err = ops::add(&mut dest, &other).unwrap_err();
    assert_eq!(
        err,
        ComputationError::DimensionMismatch {
            operation: "add",
            left: (2, 2),
            right: (2, 1),
        }
    );
    assert_eq!(dest, dest_before);
    assert_eq!(other, other_before);
    Ok(())
}

#[test]
fn test_copy_mismatch_leaves_operands_unchanged() -> Result<(), ComputationError> {
    let mut dest = DenseMatrix::filled(3, 1, 7.0)?;
    let source = DenseMatrix::filled(1, 3, 1.0)?;
    assert!(matches!(
        ops::copy(&mut dest, &source),
        Err(ComputationError::DimensionMismatch { operation: "copy", .. })
    ));
    assert_eq!(dest.data(), &[7.0, 7.0, 7.0]);

    let matching = DenseMatrix::from_column(vec![1.0, 2.0, 3.0])?;
    ops::copy(&mut dest, &matching)?;
    assert_eq!(dest, matching);
    Ok(())
}

#[test]
fn test_multiply_requires_inner_dimensions_to_agree() -> Result<(), ComputationError> {
    let left = DenseMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
    let wrong = DenseMatrix::from_column(vec![1.0, 1.0])?;
    assert_eq!(
        ops::multiply(&left, &wrong),
        Err(ComputationError::DimensionMismatch {
            operation: "multiply",
            left: (2, 3),
            right: (2, 1),
        })
    );

    let right = DenseMatrix::from_column(vec![1.0, 0.5, 0.25])?;
    let product = ops::multiply(&left, &right)?;
    assert_eq!(product.dims(), (2, 1));
    assert!(product.is_vector());
    assert_approx_eq_vec(product.data(), &[2.75, 8.0], 1e-15);
    Ok(())
}

#[test]
fn test_scaled_product_plus_teleport() -> Result<(), ComputationError> {
    // One power-iteration sweep assembled from the public operations.
    let mut w = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]])?;
    ops::scale(&mut w, 0.85);
    let x = DenseMatrix::from_column(vec![0.2, 0.8])?;
    let mut next = ops::multiply(&w, &x)?;
    ops::add(&mut next, &DenseMatrix::filled(2, 1, 0.15)?)?;
    assert_approx_eq_vec(next.data(), &[0.83, 0.32], 1e-12);

    let row_wise: Vec<f64> = (0..2)
        .map(|row| ops::row_dot(&w, row, x.data()).map(|dot| dot + 0.15))
        .collect::<Result<_, _>>()?;
    assert_eq!(row_wise, next.data());
    Ok(())
}

#[test]
fn test_out_of_bounds_access() -> Result<(), ComputationError> {
    let mut m = DenseMatrix::new(2, 3)?;
    assert_eq!(
        m.set(2, 0, 1.0),
        Err(ComputationError::OutOfBounds {
            row: 2,
            col: 0,
            rows: 2,
            cols: 3
        })
    );
    assert!(m.get(0, 3).is_err());
    assert!(m.data().iter().all(|&v| v == 0.0));
    Ok(())
}

#[test]
fn test_column_stochastic_check() -> Result<(), ComputationError> {
    let stochastic = DenseMatrix::from_rows(&[vec![0.5, 1.0], vec![0.5, 0.0]])?;
    assert!(ops::is_column_stochastic(&stochastic, 1e-12));

    let doubled = DenseMatrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 0.0]])?;
    assert!(!ops::is_column_stochastic(&doubled, 1e-12));
    Ok(())
}
