use super::SimpleBase;
use crate::{
    error::{MatrustError, Result},
    linalg::SymmetricEigen,
    matrix::Matrix,
    scalar::Scalar,
};

/// Eigen decomposition of a symmetric matrix, with eigenvectors wrapped in
/// the handle type of the decomposed matrix.
#[derive(Debug, Clone)]
pub struct SimpleEvd<T, M> {
    eig: SymmetricEigen<T>,
    mat: Matrix<T>,
    vectors: M,
}

impl<T: Scalar, M: SimpleBase<T>> SimpleEvd<T, M> {
    pub(crate) fn new(a: &M) -> Result<Self> {
        let mat = a.matrix().clone();
        let eig = SymmetricEigen::decompose(&mat)?;
        Ok(Self {
            vectors: a.wrap_matrix(eig.eigenvectors().clone()),
            eig,
            mat,
        })
    }

    pub fn number_of_eigenvalues(&self) -> usize {
        self.eig.eigenvalues().len()
    }

    pub fn eigenvalues(&self) -> Vec<f64> {
        self.eig.eigenvalues().iter().map(|v| v.to_wide()).collect()
    }

    pub fn eigenvalue(&self, index: usize) -> Result<f64> {
        let values = self.eig.eigenvalues();
        values
            .get(index)
            .map(|v| v.to_wide())
            .ok_or_else(|| MatrustError::index_out_of_range(index, 0, (values.len(), 1)))
    }

    /// Eigenvector for eigenvalue `index` as a column vector.
    pub fn eigenvector(&self, index: usize) -> Result<M> {
        self.vectors.extract_vector(false, index)
    }

    /// All eigenvectors, one per column.
    pub fn eigenvectors(&self) -> &M {
        &self.vectors
    }

    /// Index of the eigenvalue with the largest magnitude.
    pub fn index_max(&self) -> Option<usize> {
        self.select(|candidate, best| candidate > best)
    }

    /// Index of the eigenvalue with the smallest magnitude.
    pub fn index_min(&self) -> Option<usize> {
        self.select(|candidate, best| candidate < best)
    }

    fn select(&self, better: impl Fn(T, T) -> bool) -> Option<usize> {
        let values = self.eig.eigenvalues();
        let mut best = 0;
        for i in 1..values.len() {
            if better(values[i].abs(), values[best].abs()) {
                best = i;
            }
        }
        (!values.is_empty()).then_some(best)
    }

    /// Relative residual `||A·V - V·D|| / ||A||`.
    pub fn quality(&self) -> Result<f64> {
        Ok(self.eig.quality(&self.mat)?.to_wide())
    }

    pub fn decomposition(&self) -> &SymmetricEigen<T> {
        &self.eig
    }
}
