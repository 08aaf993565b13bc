//! Dense linear algebra over row-major matrices.
//!
//! `matrust` stores matrices as contiguous row-major buffers and provides
//! multiplication (including symmetric `Aᵗ·A` and `A·Aᵗ` kernels), LU, QR,
//! SVD and symmetric eigen decompositions, validated inverse and solve, norms
//! and element-wise operations. Everything is written once against
//! [`Scalar`] and works for both `f32` and `f64`.
//!
//! The [`simple`] module wraps all of it in a handle type whose methods take
//! and return `f64` scalars regardless of the backing precision.
//!
//! # Example
//! ```
//! use matrust::{matrix, linalg::LinearAlgebra};
//!
//! let a = matrix![[4.0_f64, 7.0], [2.0, 6.0]];
//! let inv = a.inv().unwrap();
//! let identity = a.matmul(&inv).unwrap();
//! assert!((identity[(0, 0)] - 1.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "io")]
pub mod io;
pub mod linalg;
pub mod matrix;
pub mod ops;
pub mod random;
pub mod scalar;
pub mod simple;

pub use config::KernelConfig;
pub use error::{MatrustError, Result};
pub use linalg::{LinearAlgebra, LinearSolver};
pub use matrix::{Matrix, MatrixIter};
pub use scalar::Scalar;
pub use simple::{
    SimpleBase, SimpleEvd, SimpleMatrix, SimpleMatrix32, SimpleMatrix64, SimpleSvd, END,
};
