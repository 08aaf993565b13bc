//! Matrix norms and condition numbers.

use super::svd::SvdDecomposition;
use crate::{matrix::Matrix, ops::element_max_abs, scalar::Scalar};

/// Frobenius norm, `sqrt(sum(a[i,j]^2))`.
///
/// Elements are scaled by the largest magnitude first so the squares cannot
/// overflow or underflow.
pub fn norm_f<T: Scalar>(a: &Matrix<T>) -> T {
    let scale = element_max_abs(a);
    if scale == T::zero() {
        return T::zero();
    }
    let sum: T = a.data.iter().map(|&x| (x / scale) * (x / scale)).sum();
    scale * sum.sqrt()
}

/// Induced 2-norm, the largest singular value.
pub fn norm_p2<T: Scalar>(a: &Matrix<T>) -> T {
    SvdDecomposition::decompose(a)
        .singular_values()
        .first()
        .copied()
        .unwrap_or_else(T::zero)
}

/// 2-norm condition number, largest over smallest singular value.
///
/// Infinite for a singular matrix.
pub fn condition_p2<T: Scalar>(a: &Matrix<T>) -> T {
    SvdDecomposition::decompose(a).condition()
}
