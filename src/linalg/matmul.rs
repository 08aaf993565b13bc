//! Matrix multiplication operations.
//!
//! All kernels write into a caller-provided output which must already have
//! the product's dimensions; a mismatched target is an error, never resized.

use super::check_output;
use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};

/// `c = a * b`
pub fn mult<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    if a.num_cols != b.num_rows {
        return Err(MatrustError::dimension_mismatch(
            (a.num_cols, b.num_cols),
            (b.num_rows, b.num_cols),
        ));
    }
    check_output(c, (a.num_rows, b.num_cols))?;

    let n = b.num_cols;
    c.zero();
    // i-k-j order so the inner loop streams rows of b and c
    for i in 0..a.num_rows {
        let c_row = &mut c.data[i * n..(i + 1) * n];
        for k in 0..a.num_cols {
            let a_ik = a.data[i * a.num_cols + k];
            let b_row = &b.data[k * n..(k + 1) * n];
            for (c_ij, &b_kj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ik * b_kj;
            }
        }
    }
    Ok(())
}

/// `c = aᵗ * b`, computed as a dot product per output element.
pub fn mult_trans_a<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    if a.num_rows != b.num_rows {
        return Err(MatrustError::dimension_mismatch(
            (a.num_rows, b.num_cols),
            (b.num_rows, b.num_cols),
        ));
    }
    check_output(c, (a.num_cols, b.num_cols))?;

    for i in 0..a.num_cols {
        for j in 0..b.num_cols {
            let mut sum = T::zero();
            for k in 0..a.num_rows {
                sum += a.data[k * a.num_cols + i] * b.data[k * b.num_cols + j];
            }
            c.data[i * c.num_cols + j] = sum;
        }
    }
    Ok(())
}

/// `c = aᵗ * b`, iterating over the shared dimension in the outer loop.
pub fn mult_trans_a_reorder<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
) -> Result<()> {
    if a.num_rows != b.num_rows {
        return Err(MatrustError::dimension_mismatch(
            (a.num_rows, b.num_cols),
            (b.num_rows, b.num_cols),
        ));
    }
    check_output(c, (a.num_cols, b.num_cols))?;

    let n = b.num_cols;
    c.zero();
    for k in 0..a.num_rows {
        let b_row = &b.data[k * n..(k + 1) * n];
        for i in 0..a.num_cols {
            let a_ki = a.data[k * a.num_cols + i];
            let c_row = &mut c.data[i * n..(i + 1) * n];
            for (c_ij, &b_kj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ki * b_kj;
            }
        }
    }
    Ok(())
}

/// `c = a * bᵗ`
pub fn mult_trans_b<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    if a.num_cols != b.num_cols {
        return Err(MatrustError::dimension_mismatch(
            (b.num_rows, a.num_cols),
            (b.num_rows, b.num_cols),
        ));
    }
    check_output(c, (a.num_rows, b.num_rows))?;

    let k = a.num_cols;
    for i in 0..a.num_rows {
        let a_row = &a.data[i * k..(i + 1) * k];
        for j in 0..b.num_rows {
            let b_row = &b.data[j * k..(j + 1) * k];
            c.data[i * c.num_cols + j] = a_row.iter().zip(b_row).map(|(&x, &y)| x * y).sum();
        }
    }
    Ok(())
}

/// Allocating form of [`mult`].
pub fn matmul<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    let mut c = Matrix::new(lhs.num_rows, rhs.num_cols);
    mult(lhs, rhs, &mut c)?;
    Ok(c)
}

/// Inner product of two vectors of equal length.
///
/// Each operand may be either a row or a column vector.
pub fn dot<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<T> {
    if !a.is_vector() {
        return Err(MatrustError::invalid_argument("'this' matrix is not a vector"));
    }
    if !b.is_vector() {
        return Err(MatrustError::invalid_argument("'v' matrix is not a vector"));
    }
    if a.num_elements() != b.num_elements() {
        return Err(MatrustError::dimension_mismatch(a.shape(), b.shape()));
    }
    Ok(a.data.iter().zip(b.data.iter()).map(|(&x, &y)| x * y).sum())
}
