use super::SimpleBase;
use crate::{
    error::{MatrustError, Result},
    linalg::SvdDecomposition,
    matrix::Matrix,
    scalar::Scalar,
};

/// Singular value decomposition `A = U·W·Vᵗ` with factors wrapped in the
/// handle type of the decomposed matrix.
///
/// In compact form `U` is `m x k`, `W` is `k x k` and `V` is `n x k` with
/// `k = min(m, n)`. Otherwise `U` and `V` are square and `W` is `m x n`.
#[derive(Debug, Clone)]
pub struct SimpleSvd<T, M> {
    svd: SvdDecomposition<T>,
    mat: Matrix<T>,
    u: M,
    w: M,
    v: M,
}

impl<T: Scalar, M: SimpleBase<T>> SimpleSvd<T, M> {
    pub(crate) fn new(a: &M, compact: bool) -> Self {
        let mat = a.matrix().clone();
        let svd = SvdDecomposition::decompose(&mat);
        let (m, n) = mat.shape();
        let (u, w, v) = if compact {
            let k = m.min(n);
            (svd.u().clone(), svd.w(k, k), svd.v().clone())
        } else {
            (svd.full_u(), svd.w(m, n), svd.full_v())
        };
        Self {
            u: a.wrap_matrix(u),
            w: a.wrap_matrix(w),
            v: a.wrap_matrix(v),
            svd,
            mat,
        }
    }

    /// Orthogonal left factor.
    pub fn u(&self) -> &M {
        &self.u
    }

    /// Diagonal matrix of singular values.
    pub fn w(&self) -> &M {
        &self.w
    }

    /// Orthogonal right factor.
    pub fn v(&self) -> &M {
        &self.v
    }

    /// Singular values, largest first.
    pub fn singular_values(&self) -> Vec<f64> {
        self.svd.singular_values().iter().map(|s| s.to_wide()).collect()
    }

    pub fn singular_value(&self, index: usize) -> Result<f64> {
        let values = self.svd.singular_values();
        values
            .get(index)
            .map(|s| s.to_wide())
            .ok_or_else(|| MatrustError::index_out_of_range(index, 0, (values.len(), 1)))
    }

    pub fn rank(&self) -> usize {
        self.svd.rank(self.svd.singular_threshold())
    }

    pub fn nullity(&self) -> usize {
        self.svd.nullity(self.svd.singular_threshold())
    }

    /// Orthonormal basis of the null space, one vector per column.
    pub fn null_space(&self) -> M {
        self.u
            .wrap_matrix(self.svd.null_space(self.svd.singular_threshold()))
    }

    /// Relative reconstruction error of the decomposition.
    pub fn quality(&self) -> Result<f64> {
        Ok(self.svd.quality(&self.mat)?.to_wide())
    }

    pub fn decomposition(&self) -> &SvdDecomposition<T> {
        &self.svd
    }
}
