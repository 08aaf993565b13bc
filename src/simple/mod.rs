//! Handle types that wrap a [`Matrix`] behind a single precision-agnostic API.
//!
//! [`SimpleBase`] carries every operation as a provided method. [`SimpleMatrix`]
//! is the stock handle; other handles implement the three required methods and
//! get the rest for free, with results produced in their own type.
//!
//! ```
//! use matrust::{SimpleBase, SimpleMatrix64};
//!
//! let a = SimpleMatrix64::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
//! let b = SimpleMatrix64::from_rows(&[[1.0], [2.0]]).unwrap();
//! let x = a.solve(&b).unwrap();
//! assert!(a.mult(&x).unwrap().is_identical(&b, 1e-12).unwrap());
//! ```

mod base;
mod evd;
mod svd;

pub use base::SimpleBase;
pub use evd::SimpleEvd;
pub use svd::SimpleSvd;

use std::fmt;

use rand::Rng;

use crate::{error::Result, matrix::Matrix, random, scalar::Scalar};

/// Range bound standing for the current extent of the matrix.
pub const END: usize = usize::MAX;

/// The stock [`SimpleBase`] handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleMatrix<T> {
    mat: Matrix<T>,
}

pub type SimpleMatrix32 = SimpleMatrix<f32>;
pub type SimpleMatrix64 = SimpleMatrix<f64>;

impl<T: Scalar> SimpleMatrix<T> {
    /// A zero-filled `num_rows x num_cols` matrix.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            mat: Matrix::new(num_rows, num_cols),
        }
    }

    /// Builds a matrix from rows of wide values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Ok(Self {
            mat: base::rows_to_matrix(rows)?,
        })
    }

    pub fn identity(n: usize) -> Self {
        Self {
            mat: Matrix::identity(n),
        }
    }

    /// Square matrix with `values` on the diagonal.
    pub fn diag(values: &[f64]) -> Self {
        let values: Vec<T> = values.iter().map(|&v| T::from_wide(v)).collect();
        Self {
            mat: Matrix::diag(&values),
        }
    }

    /// Elements drawn uniformly from `[low, high)`.
    pub fn random<R: Rng + ?Sized>(
        num_rows: usize,
        num_cols: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Self {
            mat: random::uniform(num_rows, num_cols, low, high, rng)?,
        })
    }

    pub fn into_matrix(self) -> Matrix<T> {
        self.mat
    }
}

impl<T: Scalar> From<Matrix<T>> for SimpleMatrix<T> {
    fn from(mat: Matrix<T>) -> Self {
        Self { mat }
    }
}

impl<T: Scalar> SimpleBase<T> for SimpleMatrix<T> {
    fn matrix(&self) -> &Matrix<T> {
        &self.mat
    }

    fn matrix_mut(&mut self) -> &mut Matrix<T> {
        &mut self.mat
    }

    fn wrap_matrix(&self, m: Matrix<T>) -> Self {
        Self { mat: m }
    }
}

impl<T: Scalar> fmt::Display for SimpleMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mat, f)
    }
}
