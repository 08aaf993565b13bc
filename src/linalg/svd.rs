//! Singular value decomposition by one-sided Jacobi rotations.

use super::matmul::mult_trans_b;
use super::norm::norm_f;
use crate::{
    error::Result,
    matrix::Matrix,
    ops::sub,
    scalar::Scalar,
};

const MAX_SWEEPS: usize = 75;

/// `A = U·W·Vᵗ` with singular values sorted from largest to smallest.
///
/// Internally `U` is `m x k` and `V` is `n x k` with `k = min(m, n)`; the
/// full square factors are produced on request by completing the bases.
#[derive(Debug, Clone)]
pub struct SvdDecomposition<T> {
    u: Matrix<T>,
    singular_values: Vec<T>,
    v: Matrix<T>,
    converged: bool,
}

impl<T: Scalar> SvdDecomposition<T> {
    /// Decomposes `a`. The Jacobi iteration always produces a factorization;
    /// [`SvdDecomposition::converged`] reports whether it met its tolerance.
    pub fn decompose(a: &Matrix<T>) -> Self {
        if a.num_rows >= a.num_cols {
            Self::decompose_tall(a)
        } else {
            // Aᵗ = U'·W·V'ᵗ  =>  A = V'·W·U'ᵗ
            let t = Self::decompose_tall(&super::transpose(a));
            Self {
                u: t.v,
                singular_values: t.singular_values,
                v: t.u,
                converged: t.converged,
            }
        }
    }

    fn decompose_tall(a: &Matrix<T>) -> Self {
        let m = a.num_rows;
        let n = a.num_cols;
        let mut u = a.clone();
        let mut v = Matrix::identity(n);
        let eps = T::epsilon();

        let mut converged = n < 2;
        for _ in 0..MAX_SWEEPS {
            let mut rotated = false;
            for p in 0..n {
                for q in (p + 1)..n {
                    let mut alpha = T::zero();
                    let mut beta = T::zero();
                    let mut gamma = T::zero();
                    for i in 0..m {
                        let up = u.data[i * n + p];
                        let uq = u.data[i * n + q];
                        alpha += up * up;
                        beta += uq * uq;
                        gamma += up * uq;
                    }
                    if gamma == T::zero() || gamma.abs() <= eps * (alpha * beta).sqrt() {
                        continue;
                    }
                    rotated = true;

                    let zeta = (beta - alpha) / (gamma + gamma);
                    let sign = if zeta >= T::zero() { T::one() } else { -T::one() };
                    let t = sign / (zeta.abs() + (T::one() + zeta * zeta).sqrt());
                    let c = T::one() / (T::one() + t * t).sqrt();
                    let s = c * t;

                    rotate_columns(&mut u, p, q, c, s);
                    rotate_columns(&mut v, p, q, c, s);
                }
            }
            if !rotated {
                converged = true;
                break;
            }
        }
        if !converged {
            log::warn!("svd: Jacobi sweeps did not converge for a {}x{} matrix", m, n);
        }

        let mut singular_values: Vec<T> = (0..n)
            .map(|j| (0..m).fold(T::zero(), |acc, i| acc.hypot(u.data[i * n + j])))
            .collect();

        // sort descending, permuting the columns of U and V alongside
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&x, &y| {
            singular_values[y]
                .partial_cmp(&singular_values[x])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let u = permute_columns(&u, &order);
        let v = permute_columns(&v, &order);
        singular_values = order.iter().map(|&j| singular_values[j]).collect();

        let mut u = u;
        let largest = singular_values.first().copied().unwrap_or_else(T::zero);
        let tol = T::from_usize(m).unwrap_or_else(T::one) * largest * eps;
        let mut valid = n;
        for (j, &sigma) in singular_values.iter().enumerate() {
            if sigma <= tol || sigma == T::zero() {
                valid = j;
                break;
            }
            for i in 0..m {
                u.data[i * n + j] /= sigma;
            }
        }
        complete_basis(&mut u, valid);

        Self {
            u,
            singular_values,
            v,
            converged,
        }
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn num_rows(&self) -> usize {
        self.u.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.v.num_rows
    }

    /// Singular values, largest first.
    pub fn singular_values(&self) -> &[T] {
        &self.singular_values
    }

    /// Compact `m x k` left factor.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Compact `n x k` right factor.
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Square `m x m` left factor.
    pub fn full_u(&self) -> Matrix<T> {
        extend_basis(&self.u)
    }

    /// Square `n x n` right factor.
    pub fn full_v(&self) -> Matrix<T> {
        extend_basis(&self.v)
    }

    /// Singular values laid out on the diagonal of a `rows x cols` matrix.
    pub fn w(&self, rows: usize, cols: usize) -> Matrix<T> {
        let mut w = Matrix::new(rows, cols);
        for (i, &s) in self.singular_values.iter().enumerate() {
            if i < rows && i < cols {
                w.data[i * cols + i] = s;
            }
        }
        w
    }

    /// Threshold below which a singular value is treated as zero.
    pub fn singular_threshold(&self) -> T {
        let largest = self.singular_values.first().copied().unwrap_or_else(T::zero);
        let dim = self.num_rows().max(self.num_cols());
        T::from_usize(dim).unwrap_or_else(T::one) * largest * T::epsilon()
    }

    /// Number of singular values above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.singular_values.iter().filter(|&&s| s > tol).count()
    }

    /// `num_cols - rank`
    pub fn nullity(&self, tol: T) -> usize {
        self.num_cols() - self.rank(tol)
    }

    /// Orthonormal basis of the null space as the columns of an `n x nullity` matrix.
    pub fn null_space(&self, tol: T) -> Matrix<T> {
        let full = self.full_v();
        let n = full.num_rows;
        let rank = self.rank(tol);
        let mut ret = Matrix::new(n, n - rank);
        for i in 0..n {
            for j in rank..n {
                ret.data[i * (n - rank) + (j - rank)] = full.data[i * n + j];
            }
        }
        ret
    }

    /// `||A - U·W·Vᵗ||_F / ||A||_F`, or the absolute error if `A` is zero.
    pub fn quality(&self, a: &Matrix<T>) -> Result<T> {
        let k = self.singular_values.len();
        let mut uw = self.u.clone();
        for i in 0..uw.num_rows {
            for j in 0..k {
                uw.data[i * k + j] *= self.singular_values[j];
            }
        }
        let mut rebuilt = Matrix::new(self.num_rows(), self.num_cols());
        mult_trans_b(&uw, &self.v, &mut rebuilt)?;
        let err = norm_f(&sub(a, &rebuilt)?);
        let base = norm_f(a);
        Ok(if base == T::zero() { err } else { err / base })
    }

    /// Moore-Penrose pseudo-inverse `V·W⁺·Uᵗ`, an `n x m` matrix.
    pub fn pseudo_inverse(&self) -> Result<Matrix<T>> {
        let tol = self.singular_threshold();
        let k = self.singular_values.len();
        let mut v_scaled = self.v.clone();
        for j in 0..k {
            let s = self.singular_values[j];
            let inv = if s > tol { T::one() / s } else { T::zero() };
            for i in 0..v_scaled.num_rows {
                v_scaled.data[i * k + j] *= inv;
            }
        }
        let mut ret = Matrix::new(self.num_cols(), self.num_rows());
        mult_trans_b(&v_scaled, &self.u, &mut ret)?;
        Ok(ret)
    }

    /// Ratio of the largest to the smallest singular value.
    pub fn condition(&self) -> T {
        match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&max), Some(&min)) => max / min,
            _ => T::zero(),
        }
    }
}

fn rotate_columns<T: Scalar>(a: &mut Matrix<T>, p: usize, q: usize, c: T, s: T) {
    let n = a.num_cols;
    for i in 0..a.num_rows {
        let ap = a.data[i * n + p];
        let aq = a.data[i * n + q];
        a.data[i * n + p] = c * ap - s * aq;
        a.data[i * n + q] = s * ap + c * aq;
    }
}

fn permute_columns<T: Scalar>(a: &Matrix<T>, order: &[usize]) -> Matrix<T> {
    let n = a.num_cols;
    let mut ret = Matrix::new(a.num_rows, n);
    for i in 0..a.num_rows {
        for (dst, &src) in order.iter().enumerate() {
            ret.data[i * n + dst] = a.data[i * n + src];
        }
    }
    ret
}

/// Replaces columns `valid..` of `a` with unit vectors orthogonal to the
/// columns before them, using Gram-Schmidt against the standard basis.
fn complete_basis<T: Scalar>(a: &mut Matrix<T>, valid: usize) {
    let m = a.num_rows;
    let n = a.num_cols;
    let mut filled = valid;
    let mut candidate = 0;
    let mut col = vec![T::zero(); m];

    while filled < n && candidate < m {
        col.iter_mut().for_each(|x| *x = T::zero());
        col[candidate] = T::one();
        candidate += 1;

        // two passes keep the result orthogonal to working precision
        for _ in 0..2 {
            for j in 0..filled {
                let proj = (0..m).fold(T::zero(), |acc, i| acc + a.data[i * n + j] * col[i]);
                for i in 0..m {
                    col[i] -= proj * a.data[i * n + j];
                }
            }
        }
        let norm = col.iter().fold(T::zero(), |acc, &x| acc.hypot(x));
        if norm <= T::from_wide(0.5) {
            continue;
        }
        for i in 0..m {
            a.data[i * n + filled] = col[i] / norm;
        }
        filled += 1;
    }
}

fn extend_basis<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    let m = a.num_rows;
    let k = a.num_cols;
    let mut full = Matrix::new(m, m);
    for i in 0..m {
        full.data[i * m..i * m + k].copy_from_slice(&a.data[i * k..(i + 1) * k]);
    }
    complete_basis(&mut full, k);
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        linalg::{matmul, transpose},
        matrix,
    };
    use approx::assert_relative_eq;

    fn assert_orthonormal_columns(a: &Matrix<f64>) {
        let gram = matmul(&transpose(a), a).unwrap();
        for i in 0..gram.num_rows() {
            for j in 0..gram.num_cols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(gram[(i, j)], expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_tall_reconstruction() {
        let a = matrix![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let svd = SvdDecomposition::decompose(&a);
        assert!(svd.converged());
        assert!(svd.quality(&a).unwrap() < 1e-12);
        assert_orthonormal_columns(svd.u());
        assert_orthonormal_columns(svd.v());
        let s = svd.singular_values();
        assert!(s[0] >= s[1]);
        assert_relative_eq!(s[0] * s[0] + s[1] * s[1], 91.0, epsilon = 1e-10);
    }

    #[test]
    fn test_wide_reconstruction() {
        let a = matrix![[1.0, 0.0, 2.0], [0.0, 3.0, 0.0]];
        let svd = SvdDecomposition::decompose(&a);
        assert_eq!(svd.u().shape(), (2, 2));
        assert_eq!(svd.v().shape(), (3, 2));
        assert!(svd.quality(&a).unwrap() < 1e-12);
        assert_relative_eq!(svd.singular_values()[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(svd.singular_values()[1], 5f64.sqrt(), epsilon = 1e-12);
        assert_orthonormal_columns(&svd.full_v());
    }

    #[test]
    fn test_rank_and_null_space() {
        let a = matrix![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]];
        let svd = SvdDecomposition::decompose(&a);
        let tol = svd.singular_threshold();
        assert_eq!(svd.rank(tol), 2);
        assert_eq!(svd.nullity(tol), 1);

        let ns = svd.null_space(tol);
        assert_eq!(ns.shape(), (3, 1));
        let residual = matmul(&a, &ns).unwrap();
        for &r in residual.as_slice() {
            assert_relative_eq!(r, 0.0, epsilon = 1e-10);
        }
        // the zero singular value still gets an orthonormal left vector
        assert_orthonormal_columns(svd.u());
    }

    #[test]
    fn test_pseudo_inverse_of_invertible() {
        let a = matrix![[4.0, 7.0], [2.0, 6.0]];
        let pinv = SvdDecomposition::decompose(&a).pseudo_inverse().unwrap();
        assert_relative_eq!(pinv[(0, 0)], 0.6, epsilon = 1e-10);
        assert_relative_eq!(pinv[(0, 1)], -0.7, epsilon = 1e-10);
        assert_relative_eq!(pinv[(1, 0)], -0.2, epsilon = 1e-10);
        assert_relative_eq!(pinv[(1, 1)], 0.4, epsilon = 1e-10);
    }
}
