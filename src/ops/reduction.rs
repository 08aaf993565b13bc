//! Reduction operations for matrices.

use crate::{matrix::Matrix, scalar::Scalar};

/// Sum of the diagonal elements. Non-square matrices use the leading
/// `min(rows, cols)` diagonal.
pub fn trace<T: Scalar>(a: &Matrix<T>) -> T {
    let n = a.num_rows.min(a.num_cols);
    (0..n).map(|i| a.data[i * a.num_cols + i]).sum()
}

/// Sum of all elements.
pub fn element_sum<T: Scalar>(a: &Matrix<T>) -> T {
    a.data.iter().copied().sum()
}

/// Largest absolute value of any element, zero for an empty matrix.
pub fn element_max_abs<T: Scalar>(a: &Matrix<T>) -> T {
    a
        .data
        .iter()
        .fold(T::zero(), |max, &x| if x.abs() > max { x.abs() } else { max })
}

/// Largest element, `None` for an empty matrix.
pub fn element_max<T: Scalar>(a: &Matrix<T>) -> Option<T> {
    a.data.iter().copied().reduce(|x, y| x.max(y))
}

/// Smallest element, `None` for an empty matrix.
pub fn element_min<T: Scalar>(a: &Matrix<T>) -> Option<T> {
    a.data.iter().copied().reduce(|x, y| x.min(y))
}
