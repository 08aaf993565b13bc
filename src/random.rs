//! Random matrix generation.
//!
//! Every generator takes the random number generator explicitly so callers can
//! seed it for reproducible results.
//!
//! # Usage Example
//! ```
//! use matrust::random::{gaussian, uniform};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let a = uniform::<f64, _>(3, 4, -1.0, 1.0, &mut rng).unwrap();
//! let b = gaussian::<f32, _>(3, 4, 0.0, 2.0, &mut rng).unwrap();
//! assert_eq!(a.shape(), b.shape());
//! ```

use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};
use rand_distr::Normal;

fn uniform_distribution(low: f64, high: f64) -> Result<Uniform<f64>> {
    if !(low < high) {
        return Err(MatrustError::invalid_argument(format!(
            "empty uniform range [{}, {})",
            low, high
        )));
    }
    Ok(Uniform::new(low, high))
}

/// A matrix with elements drawn uniformly from `[low, high)`.
pub fn uniform<T: Scalar, R: Rng + ?Sized>(
    num_rows: usize,
    num_cols: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Matrix<T>> {
    let dist = uniform_distribution(low, high)?;
    let data = (0..num_rows * num_cols)
        .map(|_| T::from_wide(dist.sample(rng)))
        .collect();
    Matrix::from_vec(num_rows, num_cols, data)
}

/// A matrix with elements drawn from a normal distribution.
///
/// # Errors
///
/// `InvalidArgument` if `stddev` is negative or either parameter is not finite.
pub fn gaussian<T: Scalar, R: Rng + ?Sized>(
    num_rows: usize,
    num_cols: usize,
    mean: f64,
    stddev: f64,
    rng: &mut R,
) -> Result<Matrix<T>> {
    if !mean.is_finite() || !stddev.is_finite() || stddev < 0.0 {
        return Err(MatrustError::invalid_argument(format!(
            "invalid normal distribution: mean {}, standard deviation {}",
            mean, stddev
        )));
    }
    let normal =
        Normal::new(mean, stddev).map_err(|e| MatrustError::invalid_argument(e.to_string()))?;
    let data = (0..num_rows * num_cols)
        .map(|_| T::from_wide(normal.sample(rng)))
        .collect();
    Matrix::from_vec(num_rows, num_cols, data)
}

/// A symmetric `n x n` matrix with elements drawn uniformly from `[low, high)`.
pub fn symmetric<T: Scalar, R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Matrix<T>> {
    let dist = uniform_distribution(low, high)?;
    let mut m = Matrix::new(n, n);
    for i in 0..n {
        for j in i..n {
            let v = T::from_wide(dist.sample(rng));
            m.data[i * n + j] = v;
            m.data[j * n + i] = v;
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::is_symmetric;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_uniform_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = uniform::<f32, _>(10, 5, -2.0, 3.0, &mut rng).unwrap();
        assert_eq!(m.shape(), (10, 5));
        for &v in m.as_slice() {
            assert!((-2.0..3.0).contains(&v));
        }
        assert!(uniform::<f64, _>(2, 2, 1.0, 1.0, &mut rng).is_err());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = gaussian::<f64, _>(4, 4, 0.0, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = gaussian::<f64, _>(4, 4, 0.0, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gaussian_rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            gaussian::<f64, _>(1, 1, 0.0, -1.0, &mut rng),
            Err(MatrustError::InvalidArgument(_))
        ));
        assert!(gaussian::<f32, _>(1, 1, 0.0, f64::NAN, &mut rng).is_err());
        assert!(gaussian::<f64, _>(1, 1, f64::INFINITY, 1.0, &mut rng).is_err());

        // zero spread is a point mass
        let m = gaussian::<f64, _>(2, 2, 1.5, 0.0, &mut rng).unwrap();
        assert!(m.as_slice().iter().all(|&v| v == 1.5));
    }

    #[test]
    fn test_symmetric() {
        let mut rng = StdRng::seed_from_u64(11);
        let m = symmetric::<f64, _>(6, -1.0, 1.0, &mut rng).unwrap();
        assert!(is_symmetric(&m, 0.0));
    }
}
