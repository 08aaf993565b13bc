//! Eigenvalue decomposition of symmetric matrices by cyclic Jacobi rotations.

use super::{matmul, norm::norm_f};
use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    ops::{is_symmetric, sub},
    scalar::Scalar,
};

const MAX_SWEEPS: usize = 100;

/// `A = V·D·Vᵗ` for a symmetric `A`. Eigenvalues are not sorted.
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vec<T>,
    eigenvectors: Matrix<T>,
}

impl<T: Scalar> SymmetricEigen<T> {
    /// Decomposes `a`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is not square or not symmetric within a tolerance
    /// scaled to its largest element.
    pub fn decompose(a: &Matrix<T>) -> Result<Self> {
        if !a.is_square() {
            return Err(MatrustError::dimension_mismatch(
                (a.num_rows, a.num_rows),
                a.shape(),
            ));
        }
        let scale = crate::ops::element_max_abs(a);
        let tol = scale * T::epsilon() * T::from_wide(100.0);
        if !is_symmetric(a, tol) {
            return Err(MatrustError::invalid_argument(
                "eigen decomposition requires a symmetric matrix",
            ));
        }

        let n = a.num_rows;
        let mut d = a.clone();
        let mut v = Matrix::identity(n);

        let mut converged = false;
        for _ in 0..MAX_SWEEPS {
            let off = off_diagonal_norm(&d);
            if off <= T::epsilon() * norm_f(&d) {
                converged = true;
                break;
            }
            for p in 0..n {
                for q in (p + 1)..n {
                    let a_pq = d.data[p * n + q];
                    if a_pq == T::zero() {
                        continue;
                    }
                    let theta = (d.data[q * n + q] - d.data[p * n + p]) / (a_pq + a_pq);
                    let sign = if theta >= T::zero() { T::one() } else { -T::one() };
                    let t = sign / (theta.abs() + (theta * theta + T::one()).sqrt());
                    let c = T::one() / (t * t + T::one()).sqrt();
                    let s = t * c;

                    for k in 0..n {
                        let dkp = d.data[k * n + p];
                        let dkq = d.data[k * n + q];
                        d.data[k * n + p] = c * dkp - s * dkq;
                        d.data[k * n + q] = s * dkp + c * dkq;
                    }
                    for k in 0..n {
                        let dpk = d.data[p * n + k];
                        let dqk = d.data[q * n + k];
                        d.data[p * n + k] = c * dpk - s * dqk;
                        d.data[q * n + k] = s * dpk + c * dqk;
                    }
                    for k in 0..n {
                        let vkp = v.data[k * n + p];
                        let vkq = v.data[k * n + q];
                        v.data[k * n + p] = c * vkp - s * vkq;
                        v.data[k * n + q] = s * vkp + c * vkq;
                    }
                }
            }
        }

        if !converged {
            log::warn!("eig: Jacobi sweeps did not converge for a {}x{} matrix", n, n);
        }

        Ok(Self {
            eigenvalues: (0..n).map(|i| d.data[i * n + i]).collect(),
            eigenvectors: v,
        })
    }

    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// Eigenvectors stored as the columns of a square matrix.
    pub fn eigenvectors(&self) -> &Matrix<T> {
        &self.eigenvectors
    }

    /// Eigenvector `index` as an `n x 1` column.
    pub fn eigenvector(&self, index: usize) -> Result<Matrix<T>> {
        crate::ops::extract_column(&self.eigenvectors, index)
    }

    /// `||A·V - V·D||_F / ||A||_F`, or the absolute error if `A` is zero.
    pub fn quality(&self, a: &Matrix<T>) -> Result<T> {
        let av = matmul(a, &self.eigenvectors)?;
        let vd = matmul(&self.eigenvectors, &Matrix::diag(&self.eigenvalues))?;
        let err = norm_f(&sub(&av, &vd)?);
        let base = norm_f(a);
        Ok(if base == T::zero() { err } else { err / base })
    }
}

fn off_diagonal_norm<T: Scalar>(a: &Matrix<T>) -> T {
    let n = a.num_rows;
    let mut sum = T::zero();
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum = sum.hypot(a.data[i * n + j]);
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_2x2() {
        let a = matrix![[2.0, 1.0], [1.0, 2.0]];
        let eig = SymmetricEigen::decompose(&a).unwrap();
        let mut values = eig.eigenvalues().to_vec();
        values.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_relative_eq!(values[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 3.0, epsilon = 1e-12);
        assert!(eig.quality(&a).unwrap() < 1e-12);
    }

    #[test]
    fn test_symmetric_3x3() {
        let a = matrix![
            [4.0, 12.0, -16.0],
            [12.0, 37.0, -43.0],
            [-16.0, -43.0, 98.0]
        ];
        let eig = SymmetricEigen::decompose(&a).unwrap();
        assert!(eig.quality(&a).unwrap() < 1e-12);
        let sum: f64 = eig.eigenvalues().iter().sum();
        assert_relative_eq!(sum, 139.0, epsilon = 1e-9);
        assert_eq!(eig.eigenvector(2).unwrap().shape(), (3, 1));
    }

    #[test]
    fn test_rejects_non_symmetric() {
        assert!(SymmetricEigen::decompose(&matrix![[1.0, 2.0], [0.0, 1.0]]).is_err());
        assert!(SymmetricEigen::decompose(&matrix![[1.0, 2.0]]).is_err());
    }
}
