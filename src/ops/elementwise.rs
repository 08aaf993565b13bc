//! Element-wise operations for matrices.

use super::check_same_shape;
use crate::{error::Result, matrix::Matrix, scalar::Scalar};

/// Apply a function element-wise to a matrix.
pub fn map<T, F>(a: &Matrix<T>, f: F) -> Matrix<T>
where
    T: Scalar,
    F: Fn(T) -> T,
{
    Matrix {
        data: a.data.iter().map(|&x| f(x)).collect(),
        num_rows: a.num_rows,
        num_cols: a.num_cols,
    }
}

/// Apply a function element-wise to two matrices of the same shape.
pub fn zip_with<T, F>(lhs: &Matrix<T>, rhs: &Matrix<T>, f: F) -> Result<Matrix<T>>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    check_same_shape(lhs, rhs)?;

    let data = lhs
        .data
        .iter()
        .zip(rhs.data.iter())
        .map(|(&a, &b)| f(a, b))
        .collect();

    Ok(Matrix {
        data,
        num_rows: lhs.num_rows,
        num_cols: lhs.num_cols,
    })
}

/// `c[i,j] = a[i,j] * b[i,j]`
pub fn element_mult<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(lhs, rhs, |a, b| a * b)
}

/// `c[i,j] = a[i,j] / b[i,j]`
pub fn element_div<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(lhs, rhs, |a, b| a / b)
}

/// `c[i,j] = a[i,j] ^ b[i,j]`
pub fn element_power<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(lhs, rhs, |a, b| a.powf(b))
}

/// `c[i,j] = a[i,j] ^ b`
pub fn element_power_scalar<T: Scalar>(a: &Matrix<T>, b: T) -> Matrix<T> {
    map(a, |x| x.powf(b))
}

/// Element-wise exponential function.
pub fn element_exp<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    map(a, |x| x.exp())
}

/// Element-wise natural logarithm.
pub fn element_log<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    map(a, |x| x.ln())
}
