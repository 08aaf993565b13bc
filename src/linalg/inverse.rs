//! Matrix inverse, linear solves and determinant.
//!
//! The plain functions report decomposition failure as `Ok(false)`. The
//! `checked_*` functions turn both that and a non-finite result into
//! [`MatrustError::SingularMatrix`].

use log::debug;

use super::{check_output, LinearSolver, LuDecomposition, LuSolver, QrSolver, SvdDecomposition};
use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    ops::has_uncountable,
    scalar::Scalar,
};

/// Compute the determinant of a square matrix.
///
/// The determinant of a `0 x 0` matrix is one.
pub fn determinant<T: Scalar>(a: &Matrix<T>) -> Result<T> {
    if !a.is_square() {
        return Err(MatrustError::dimension_mismatch(
            (a.num_rows, a.num_rows),
            a.shape(),
        ));
    }

    let d = &a.data;
    match a.num_rows {
        0 => Ok(T::one()),
        1 => Ok(d[0]),
        // |a b|
        // |c d| = ad - bc
        2 => Ok(d[0] * d[3] - d[1] * d[2]),
        // |a b c|
        // |d e f| = a(ei - fh) - b(di - fg) + c(dh - eg)
        // |g h i|
        3 => {
            let term1 = d[0] * (d[4] * d[8] - d[5] * d[7]);
            let term2 = d[1] * (d[3] * d[8] - d[5] * d[6]);
            let term3 = d[2] * (d[3] * d[7] - d[4] * d[6]);
            Ok(term1 - term2 + term3)
        }
        _ => Ok(LuDecomposition::decompose(a)?.determinant()),
    }
}

/// Determinant that reports zero instead of a NaN or infinite value.
pub fn checked_determinant<T: Scalar>(a: &Matrix<T>) -> Result<T> {
    let det = determinant(a)?;
    if det.is_finite() {
        Ok(det)
    } else {
        debug!("determinant of {}x{} matrix is {}, reporting 0", a.num_rows, a.num_cols, det);
        Ok(T::zero())
    }
}

/// Writes the inverse of square `a` into `inv`.
///
/// Returns `false` if the LU decomposition found `a` singular.
pub fn invert<T: Scalar>(a: &Matrix<T>, inv: &mut Matrix<T>) -> Result<bool> {
    if !a.is_square() {
        return Err(MatrustError::dimension_mismatch(
            (a.num_rows, a.num_rows),
            a.shape(),
        ));
    }
    check_output(inv, a.shape())?;

    let mut solver = LuSolver::new();
    if !solver.set_a(a)? {
        return Ok(false);
    }
    solver.invert(inv)?;
    Ok(true)
}

/// Solves `A·X = B` into `x`, which must be `a.num_cols x b.num_cols`.
///
/// Square systems use LU, others are solved in the least-squares sense with
/// QR. Returns `false` if the decomposition failed.
pub fn solve<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<bool> {
    if b.num_rows != a.num_rows {
        return Err(MatrustError::dimension_mismatch(
            (a.num_rows, b.num_cols),
            b.shape(),
        ));
    }
    check_output(x, (a.num_cols, b.num_cols))?;

    if a.is_square() {
        let mut solver = LuSolver::new();
        if !solver.set_a(a)? {
            return Ok(false);
        }
        solver.solve(b, x)?;
    } else {
        let mut solver = QrSolver::new();
        if !solver.set_a(a)? {
            return Ok(false);
        }
        solver.solve(b, x)?;
    }
    Ok(true)
}

/// Moore-Penrose pseudo-inverse, `n x m` for an `m x n` input.
///
/// Defined for any input including rank-deficient ones, so no singularity
/// check is made on the result.
pub fn pinv<T: Scalar>(a: &Matrix<T>) -> Result<Matrix<T>> {
    SvdDecomposition::decompose(a).pseudo_inverse()
}

/// Allocating inverse that fails on singular or numerically unusable input.
pub fn checked_invert<T: Scalar>(a: &Matrix<T>) -> Result<Matrix<T>> {
    let mut inv = Matrix::new(a.num_rows, a.num_cols);
    if !invert(a, &mut inv)? {
        debug!("inverse of {}x{} matrix: decomposition failed", a.num_rows, a.num_cols);
        return Err(MatrustError::singular("decomposition failed"));
    }
    if has_uncountable(&inv) {
        debug!("inverse of {}x{} matrix contains NaN or Inf", a.num_rows, a.num_cols);
        return Err(MatrustError::singular("Solution contains uncountable numbers"));
    }
    Ok(inv)
}

/// Allocating solve that fails on singular or numerically unusable input.
pub fn checked_solve<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let mut x = Matrix::new(a.num_cols, b.num_cols);
    if !solve(a, b, &mut x)? {
        debug!("solve with {}x{} matrix: decomposition failed", a.num_rows, a.num_cols);
        return Err(MatrustError::singular("decomposition failed"));
    }
    if has_uncountable(&x) {
        debug!("solve with {}x{} matrix produced NaN or Inf", a.num_rows, a.num_cols);
        return Err(MatrustError::singular("Solution contains uncountable numbers"));
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{linalg::matmul, matrix};
    use approx::assert_relative_eq;

    #[test]
    fn test_determinant_2x2() {
        let a = matrix![[1.0, 2.0], [3.0, 4.0]];
        let det = determinant(&a).unwrap();
        assert_relative_eq!(det, -2.0);
    }

    #[test]
    fn test_determinant_3x3() {
        let a = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let det = determinant(&a).unwrap();
        assert_relative_eq!(det, 0.0); // This matrix is singular
    }

    #[test]
    fn test_determinant_lu_path() {
        let a = matrix![
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 4.0, 0.0],
            [1.0, 0.0, 0.0, 5.0]
        ];
        assert_relative_eq!(determinant(&a).unwrap(), 120.0, epsilon = 1e-10);
        assert_eq!(determinant(&Matrix::<f64>::new(0, 0)).unwrap(), 1.0);
        assert!(determinant(&matrix![[1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_checked_determinant_non_finite() {
        let a = matrix![[f64::INFINITY, 1.0], [1.0, f64::INFINITY]];
        assert!(!determinant(&a).unwrap().is_finite());
        assert_eq!(checked_determinant(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_inverse_2x2() {
        let a = matrix![[4.0, 7.0], [2.0, 6.0]];
        let a_inv = checked_invert(&a).unwrap();

        // Expected inverse:
        // [ 0.6 -0.7]
        // [-0.2  0.4]
        assert_relative_eq!(a_inv[(0, 0)], 0.6, epsilon = 1e-6);
        assert_relative_eq!(a_inv[(0, 1)], -0.7, epsilon = 1e-6);
        assert_relative_eq!(a_inv[(1, 0)], -0.2, epsilon = 1e-6);
        assert_relative_eq!(a_inv[(1, 1)], 0.4, epsilon = 1e-6);

        // Verify A * A^-1 = I
        let identity = matmul(&a, &a_inv).unwrap();
        assert_relative_eq!(identity[(0, 0)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(identity[(0, 1)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(identity[(1, 0)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(identity[(1, 1)], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_singular_inputs() {
        let zero = Matrix::<f64>::new(2, 2);
        assert!(matches!(checked_invert(&zero), Err(MatrustError::SingularMatrix(_))));

        let repeated = matrix![[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 4.0]];
        assert!(matches!(checked_invert(&repeated), Err(MatrustError::SingularMatrix(_))));

        let mut inv = Matrix::new(2, 2);
        assert!(!invert(&zero, &mut inv).unwrap());
    }

    #[test]
    fn test_non_finite_solution_rejected() {
        // pivots pass the singularity test but back substitution overflows
        let a = matrix![[1.0, 0.0], [0.0, 1e-10]];
        let b = matrix![[1.0], [f64::MAX]];
        let mut x = Matrix::new(2, 1);
        assert!(solve(&a, &b, &mut x).unwrap());
        assert!(has_uncountable(&x));
        match checked_solve(&a, &b) {
            Err(MatrustError::SingularMatrix(msg)) => assert!(msg.contains("uncountable")),
            other => panic!("expected SingularMatrix, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_shapes() {
        let a = matrix![[2.0, 1.0], [1.0, 3.0]];
        let b = matrix![[3.0, 1.0], [5.0, 0.0]];
        let x = checked_solve(&a, &b).unwrap();
        let back = matmul(&a, &x).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(back[(i, j)], b[(i, j)], epsilon = 1e-12);
            }
        }

        let mut wrong = Matrix::new(3, 2);
        assert!(solve(&a, &b, &mut wrong).is_err());
        assert!(checked_solve(&a, &matrix![[1.0]]).is_err());
    }

    #[test]
    fn test_pinv_shape() {
        let a = matrix![[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let p = pinv(&a).unwrap();
        assert_eq!(p.shape(), (3, 2));
        assert_relative_eq!(p[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[(1, 1)], 0.5, epsilon = 1e-12);
        assert_relative_eq!(p[(2, 0)], 0.0, epsilon = 1e-12);
    }
}
