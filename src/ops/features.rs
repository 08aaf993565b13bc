//! Predicates over matrix contents.

use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};

/// `true` if any element is NaN or infinite.
pub fn has_uncountable<T: Scalar>(a: &Matrix<T>) -> bool {
    a.data.iter().any(|x| x.is_uncountable())
}

/// Checks whether two matrices are the same within `tol`.
///
/// Matrices of different shape are never identical. NaN matches NaN and an
/// infinity matches an infinity of the same sign.
pub fn is_identical<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, tol: T) -> Result<bool> {
    if tol < T::zero() {
        return Err(MatrustError::invalid_argument("tolerance must be non-negative"));
    }
    if a.shape() != b.shape() {
        return Ok(false);
    }
    Ok(a.data.iter().zip(b.data.iter()).all(|(&x, &y)| {
        if x.is_nan() || y.is_nan() {
            x.is_nan() && y.is_nan()
        } else if x.is_infinite() || y.is_infinite() {
            x == y
        } else {
            (x - y).abs() <= tol
        }
    }))
}

/// `true` if the matrix is square and `|a[i,j] - a[j,i]| <= tol` everywhere.
pub fn is_symmetric<T: Scalar>(a: &Matrix<T>, tol: T) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.num_rows;
    for i in 0..n {
        for j in (i + 1)..n {
            if (a.data[i * n + j] - a.data[j * n + i]).abs() > tol {
                return false;
            }
        }
    }
    true
}
