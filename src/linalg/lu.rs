//! LU decomposition with partial pivoting.

use super::{check_output, LinearSolver};
use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    ops::element_max_abs,
    scalar::Scalar,
};

/// `P·A = L·U` for a square matrix, with unit-diagonal `L` and `U` packed
/// into a single matrix.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    lu: Matrix<T>,
    pivots: Vec<usize>,
    parity: T,
    singular: bool,
}

impl<T: Scalar> LuDecomposition<T> {
    /// Factorizes `a`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is not square. Singularity is not an error; it
    /// is reported through [`LuDecomposition::is_singular`].
    pub fn decompose(a: &Matrix<T>) -> Result<Self> {
        if !a.is_square() {
            return Err(MatrustError::dimension_mismatch(
                (a.num_rows, a.num_rows),
                a.shape(),
            ));
        }

        let n = a.num_rows;
        // pivot tolerance relative to the magnitude of the input
        let tol = T::epsilon() * T::from_usize(n).unwrap_or_else(T::one) * element_max_abs(a);
        let mut lu = a.clone();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut parity = T::one();

        for k in 0..n {
            // Partial pivoting
            let mut max = k;
            for i in (k + 1)..n {
                if lu.data[i * n + k].abs() > lu.data[max * n + k].abs() {
                    max = i;
                }
            }
            if max != k {
                for j in 0..n {
                    lu.data.swap(k * n + j, max * n + j);
                }
                pivots.swap(k, max);
                parity = -parity;
            }

            let pivot = lu.data[k * n + k];
            if pivot == T::zero() {
                continue;
            }
            for i in (k + 1)..n {
                let factor = lu.data[i * n + k] / pivot;
                lu.data[i * n + k] = factor;
                for j in (k + 1)..n {
                    let u_kj = lu.data[k * n + j];
                    lu.data[i * n + j] -= factor * u_kj;
                }
            }
        }

        let singular = (0..n).any(|i| lu.data[i * n + i].abs() <= tol);

        Ok(Self {
            lu,
            pivots,
            parity,
            singular,
        })
    }

    /// `true` if some pivot is no larger than `eps * n * max|a|`.
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Product of the pivots times the sign of the row permutation.
    pub fn determinant(&self) -> T {
        let n = self.lu.num_rows;
        (0..n).fold(self.parity, |det, i| det * self.lu.data[i * n + i])
    }

    /// Row permutation: row `i` of `P·A` is row `pivots()[i]` of `A`.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    pub fn lower(&self) -> Matrix<T> {
        let n = self.lu.num_rows;
        let mut l = Matrix::identity(n);
        for i in 0..n {
            for j in 0..i {
                l.data[i * n + j] = self.lu.data[i * n + j];
            }
        }
        l
    }

    pub fn upper(&self) -> Matrix<T> {
        let n = self.lu.num_rows;
        let mut u = Matrix::new(n, n);
        for i in 0..n {
            for j in i..n {
                u.data[i * n + j] = self.lu.data[i * n + j];
            }
        }
        u
    }

    /// Solves `A·X = B` column by column using the stored factors.
    pub fn solve_into(&self, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<()> {
        let n = self.lu.num_rows;
        if b.num_rows != n {
            return Err(MatrustError::dimension_mismatch((n, b.num_cols), b.shape()));
        }
        check_output(x, (n, b.num_cols))?;

        let p = b.num_cols;
        let mut col = vec![T::zero(); n];
        for j in 0..p {
            for i in 0..n {
                col[i] = b.data[self.pivots[i] * p + j];
            }
            // forward substitution with unit L
            for i in 1..n {
                let mut sum = col[i];
                for k in 0..i {
                    sum -= self.lu.data[i * n + k] * col[k];
                }
                col[i] = sum;
            }
            // back substitution with U
            for i in (0..n).rev() {
                let mut sum = col[i];
                for k in (i + 1)..n {
                    sum -= self.lu.data[i * n + k] * col[k];
                }
                col[i] = sum / self.lu.data[i * n + i];
            }
            for i in 0..n {
                x.data[i * p + j] = col[i];
            }
        }
        Ok(())
    }
}

/// [`LinearSolver`] for square systems backed by [`LuDecomposition`].
#[derive(Debug, Clone, Default)]
pub struct LuSolver<T> {
    decomposition: Option<LuDecomposition<T>>,
}

impl<T: Scalar> LuSolver<T> {
    pub fn new() -> Self {
        Self { decomposition: None }
    }

    pub fn decomposition(&self) -> Option<&LuDecomposition<T>> {
        self.decomposition.as_ref()
    }
}

impl<T: Scalar> LinearSolver<T> for LuSolver<T> {
    fn set_a(&mut self, a: &Matrix<T>) -> Result<bool> {
        let lu = LuDecomposition::decompose(a)?;
        let ok = !lu.is_singular();
        self.decomposition = Some(lu);
        Ok(ok)
    }

    fn solve(&self, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<()> {
        self.decomposition
            .as_ref()
            .ok_or_else(|| MatrustError::invalid_argument("set_a must be called before solve"))?
            .solve_into(b, x)
    }
}
