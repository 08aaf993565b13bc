//! Linear algebra on dense matrices.
//!
//! Kernels write into caller-sized outputs and fail on a mismatched target;
//! the allocating wrappers ([`matmul`], [`transpose`], [`checked_invert`], ...)
//! size the result themselves.

mod eig;
mod inverse;
mod lu;
mod matmul;
mod norm;
mod product;
mod qr;
mod svd;
mod transpose;

pub use eig::*;
pub use inverse::*;
pub use lu::*;
pub use matmul::*;
pub use norm::*;
pub use product::*;
pub use qr::*;
pub use svd::*;
pub use transpose::*;

use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};

/// Fails unless the output matrix already has the expected shape.
pub(crate) fn check_output<T: Scalar>(c: &Matrix<T>, expected: (usize, usize)) -> Result<()> {
    if c.shape() != expected {
        return Err(MatrustError::dimension_mismatch(expected, c.shape()));
    }
    Ok(())
}

/// A decomposition that can solve `A·X = B` once it has been given `A`.
pub trait LinearSolver<T: Scalar> {
    /// Decomposes `a`. Returns `false` if the decomposition failed, in which
    /// case the result of [`LinearSolver::solve`] is meaningless.
    fn set_a(&mut self, a: &Matrix<T>) -> Result<bool>;

    /// Writes the solution for `b` into `x`, which must already be sized.
    fn solve(&self, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<()>;

    /// Writes the inverse of the decomposed matrix into `inv`.
    fn invert(&self, inv: &mut Matrix<T>) -> Result<()> {
        let identity = Matrix::identity(inv.num_rows);
        self.solve(&identity, inv)
    }
}

/// Method-style access to the common operations of this module.
pub trait LinearAlgebra<T: Scalar>: Sized {
    /// Matrix multiplication.
    fn matmul(&self, rhs: &Self) -> Result<Self>;

    /// Matrix transpose.
    fn t(&self) -> Self;

    /// Matrix inverse, failing with `SingularMatrix` on degenerate input.
    fn inv(&self) -> Result<Self>;

    /// Matrix determinant.
    fn det(&self) -> Result<T>;

    /// Moore-Penrose pseudo-inverse.
    fn pinv(&self) -> Result<Self>;

    /// Singular value decomposition.
    fn svd(&self) -> SvdDecomposition<T>;

    /// Eigen decomposition of a symmetric matrix.
    fn eig(&self) -> Result<SymmetricEigen<T>>;
}

impl<T: Scalar> LinearAlgebra<T> for Matrix<T> {
    fn matmul(&self, rhs: &Self) -> Result<Self> {
        matmul(self, rhs)
    }

    fn t(&self) -> Self {
        transpose(self)
    }

    fn inv(&self) -> Result<Self> {
        checked_invert(self)
    }

    fn det(&self) -> Result<T> {
        determinant(self)
    }

    fn pinv(&self) -> Result<Self> {
        pinv(self)
    }

    fn svd(&self) -> SvdDecomposition<T> {
        SvdDecomposition::decompose(self)
    }

    fn eig(&self) -> Result<SymmetricEigen<T>> {
        SymmetricEigen::decompose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_trait_matmul() {
        let a = matrix![[1.0, 2.0], [3.0, 4.0]];
        let b = matrix![[5.0, 6.0], [7.0, 8.0]];
        let c = a.matmul(&b).unwrap();

        assert_eq!(c.shape(), (2, 2));
        assert_relative_eq!(c[(0, 0)], 19.0);
        assert_relative_eq!(c[(0, 1)], 22.0);
        assert_relative_eq!(c[(1, 0)], 43.0);
        assert_relative_eq!(c[(1, 1)], 50.0);
    }

    #[test]
    fn test_transpose() {
        let a = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b = a.t();

        assert_eq!(b.shape(), (3, 2));
        assert_eq!(b[(0, 0)], 1.0);
        assert_eq!(b[(0, 1)], 4.0);
        assert_eq!(b[(1, 0)], 2.0);
        assert_eq!(b[(1, 1)], 5.0);
        assert_eq!(b[(2, 0)], 3.0);
        assert_eq!(b[(2, 1)], 6.0);
    }

    #[test]
    fn test_solver_invert_default() {
        let a = matrix![[4.0, 7.0], [2.0, 6.0]];
        let mut solver = LuSolver::new();
        assert!(solver.set_a(&a).unwrap());
        let mut inv = Matrix::new(2, 2);
        solver.invert(&mut inv).unwrap();
        assert_relative_eq!(inv[(0, 0)], 0.6, epsilon = 1e-12);
        assert_relative_eq!(inv[(1, 1)], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_check_output() {
        let c = Matrix::<f64>::new(2, 3);
        assert!(check_output(&c, (2, 3)).is_ok());
        assert!(matches!(
            check_output(&c, (3, 2)),
            Err(MatrustError::DimensionMismatch { expected: (3, 2), actual: (2, 3) })
        ));
    }
}
