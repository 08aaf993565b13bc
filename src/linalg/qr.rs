//! Householder QR decomposition for least-squares solves.

use super::{check_output, LinearSolver};
use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};

/// `A = Q·R` for an `m x n` matrix with `m >= n`.
///
/// The Householder vectors are kept below the diagonal of `qr`; the diagonal
/// of `R` is stored separately.
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    qr: Matrix<T>,
    r_diag: Vec<T>,
}

impl<T: Scalar> QrDecomposition<T> {
    /// Factorizes `a`, which must have at least as many rows as columns.
    pub fn decompose(a: &Matrix<T>) -> Result<Self> {
        let m = a.num_rows;
        let n = a.num_cols;
        if m < n {
            return Err(MatrustError::invalid_argument(format!(
                "QR needs rows >= cols, got {}x{}",
                m, n
            )));
        }

        let mut qr = a.clone();
        let mut r_diag = vec![T::zero(); n];

        for k in 0..n {
            let mut norm = T::zero();
            for i in k..m {
                norm = norm.hypot(qr.data[i * n + k]);
            }
            if norm == T::zero() {
                continue;
            }

            // reflect onto the axis with the sign that avoids cancellation
            if qr.data[k * n + k] < T::zero() {
                norm = -norm;
            }
            for i in k..m {
                qr.data[i * n + k] /= norm;
            }
            qr.data[k * n + k] += T::one();

            for j in (k + 1)..n {
                let mut s = T::zero();
                for i in k..m {
                    s += qr.data[i * n + k] * qr.data[i * n + j];
                }
                s = -s / qr.data[k * n + k];
                for i in k..m {
                    let v = qr.data[i * n + k];
                    qr.data[i * n + j] += s * v;
                }
            }
            r_diag[k] = -norm;
        }

        Ok(Self { qr, r_diag })
    }

    /// `true` when no diagonal entry of `R` is negligible relative to the largest.
    pub fn is_full_rank(&self) -> bool {
        let max = self
            .r_diag
            .iter()
            .fold(T::zero(), |m, &d| if d.abs() > m { d.abs() } else { m });
        let n = T::from_usize(self.qr.num_rows.max(1)).unwrap_or_else(T::one);
        let tol = max * T::epsilon() * n;
        self.r_diag.iter().all(|d| d.abs() > tol)
    }

    /// The thin `m x n` orthogonal factor.
    pub fn q(&self) -> Matrix<T> {
        let m = self.qr.num_rows;
        let n = self.qr.num_cols;
        let mut q = Matrix::new(m, n);
        for k in (0..n).rev() {
            q.data[k * n + k] = T::one();
            for j in k..n {
                let v_kk = self.qr.data[k * n + k];
                if v_kk == T::zero() {
                    continue;
                }
                let mut s = T::zero();
                for i in k..m {
                    s += self.qr.data[i * n + k] * q.data[i * n + j];
                }
                s = -s / v_kk;
                for i in k..m {
                    q.data[i * n + j] += s * self.qr.data[i * n + k];
                }
            }
        }
        q
    }

    /// The `n x n` upper triangular factor.
    pub fn r(&self) -> Matrix<T> {
        let n = self.qr.num_cols;
        let mut r = Matrix::new(n, n);
        for i in 0..n {
            r.data[i * n + i] = self.r_diag[i];
            for j in (i + 1)..n {
                r.data[i * n + j] = self.qr.data[i * n + j];
            }
        }
        r
    }

    /// Least-squares solution of `A·X = B`.
    pub fn solve_into(&self, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<()> {
        let m = self.qr.num_rows;
        let n = self.qr.num_cols;
        if b.num_rows != m {
            return Err(MatrustError::dimension_mismatch((m, b.num_cols), b.shape()));
        }
        check_output(x, (n, b.num_cols))?;

        let p = b.num_cols;
        let mut y = b.clone();

        // y = Qᵗ·b
        for k in 0..n {
            let v_kk = self.qr.data[k * n + k];
            if v_kk == T::zero() {
                continue;
            }
            for j in 0..p {
                let mut s = T::zero();
                for i in k..m {
                    s += self.qr.data[i * n + k] * y.data[i * p + j];
                }
                s = -s / v_kk;
                for i in k..m {
                    y.data[i * p + j] += s * self.qr.data[i * n + k];
                }
            }
        }

        // R·x = y
        for k in (0..n).rev() {
            for j in 0..p {
                y.data[k * p + j] /= self.r_diag[k];
            }
            for i in 0..k {
                let r_ik = self.qr.data[i * n + k];
                for j in 0..p {
                    let y_kj = y.data[k * p + j];
                    y.data[i * p + j] -= y_kj * r_ik;
                }
            }
        }

        x.data.copy_from_slice(&y.data[..n * p]);
        Ok(())
    }
}

/// [`LinearSolver`] for over-determined systems in the least-squares sense.
#[derive(Debug, Clone, Default)]
pub struct QrSolver<T> {
    decomposition: Option<QrDecomposition<T>>,
}

impl<T: Scalar> QrSolver<T> {
    pub fn new() -> Self {
        Self { decomposition: None }
    }
}

impl<T: Scalar> LinearSolver<T> for QrSolver<T> {
    fn set_a(&mut self, a: &Matrix<T>) -> Result<bool> {
        // fewer equations than unknowns has no unique solution
        if a.num_rows < a.num_cols {
            self.decomposition = None;
            return Ok(false);
        }
        let qr = QrDecomposition::decompose(a)?;
        let ok = qr.is_full_rank();
        self.decomposition = Some(qr);
        Ok(ok)
    }

    fn solve(&self, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<()> {
        self.decomposition
            .as_ref()
            .ok_or_else(|| MatrustError::invalid_argument("no decomposition to solve with"))?
            .solve_into(b, x)
    }
}
