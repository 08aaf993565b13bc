//! Symmetric matrix products `A·Aᵗ` and `Aᵗ·A`.
//!
//! Both products are symmetric, so every kernel here computes only the
//! upper triangle and, except for [`inner_reorder_upper`], mirrors it into
//! the lower one. The output must be pre-sized to the square result.

use super::check_output;
use crate::{config::KernelConfig, error::Result, matrix::Matrix, scalar::Scalar};

/// `c = a * aᵗ` for an `n x m` input, giving an `n x n` result.
///
/// Accumulates the `m` rank-1 outer products of the columns of `a`, touching
/// only `j >= i` in each update, and mirrors once at the end.
pub fn outer<T: Scalar>(a: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    let n = a.num_rows;
    let m = a.num_cols;
    check_output(c, (n, n))?;

    c.zero();
    for k in 0..m {
        for i in 0..n {
            let a_ik = a.data[i * m + k];
            let c_row = i * n;
            for j in i..n {
                c.data[c_row + j] += a_ik * a.data[j * m + k];
            }
        }
    }
    mirror_upper(c);
    Ok(())
}

/// `c = aᵗ * a` for an `n x m` input, giving an `m x m` result.
///
/// Computes each `(i, j)` with `i <= j` as the dot product of columns `i`
/// and `j`, then writes it to `(j, i)` as well. Suited to small inputs.
pub fn inner_small<T: Scalar>(a: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    let n = a.num_rows;
    let m = a.num_cols;
    check_output(c, (m, m))?;

    for i in 0..m {
        for j in i..m {
            let mut sum = T::zero();
            for k in 0..n {
                sum += a.data[k * m + i] * a.data[k * m + j];
            }
            c.data[i * m + j] = sum;
            c.data[j * m + i] = sum;
        }
    }
    Ok(())
}

/// `c = aᵗ * a`, with the shared dimension in the inner accumulation loop
/// walking rows of `a` contiguously.
pub fn inner_reorder<T: Scalar>(a: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    inner_reorder_upper(a, c)?;
    mirror_upper(c);
    Ok(())
}

/// Upper triangle of `aᵗ * a`.
///
/// Only entries with `j >= i` are written. The strictly lower triangle of
/// `c` is left with whatever it held before the call and must not be read.
pub fn inner_reorder_upper<T: Scalar>(a: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    let n = a.num_rows;
    let m = a.num_cols;
    check_output(c, (m, m))?;

    for i in 0..m {
        let c_start = i * m + i;
        let c_end = (i + 1) * m;
        if n == 0 {
            c.data[c_start..c_end].fill(T::zero());
            continue;
        }

        // first row of a initialises the output row
        let a_i = a.data[i];
        for (c_ij, &a_j) in c.data[c_start..c_end].iter_mut().zip(&a.data[i..m]) {
            *c_ij = a_i * a_j;
        }

        for k in 1..n {
            let row = &a.data[k * m + i..(k + 1) * m];
            let a_ki = row[0];
            for (c_ij, &a_kj) in c.data[c_start..c_end].iter_mut().zip(row) {
                *c_ij += a_ki * a_kj;
            }
        }
    }
    Ok(())
}

/// `c = aᵗ * a`, picking the kernel by the number of columns of `a`.
pub fn mult_inner<T: Scalar>(a: &Matrix<T>, c: &mut Matrix<T>, config: &KernelConfig) -> Result<()> {
    if a.num_cols >= config.mult_inner_switch {
        log::trace!("mult_inner: column-dot kernel for {} columns", a.num_cols);
        inner_small(a, c)
    } else {
        log::trace!("mult_inner: reordered kernel for {} columns", a.num_cols);
        inner_reorder(a, c)
    }
}

/// `c = a * aᵗ`
pub fn mult_outer<T: Scalar>(a: &Matrix<T>, c: &mut Matrix<T>) -> Result<()> {
    outer(a, c)
}

fn mirror_upper<T: Scalar>(c: &mut Matrix<T>) {
    let n = c.num_rows;
    for i in 0..n {
        for j in (i + 1)..n {
            c.data[j * n + i] = c.data[i * n + j];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::MatrustError,
        linalg::{mult_trans_a, mult_trans_b},
        matrix,
    };

    fn sample() -> Matrix<f64> {
        matrix![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]
    }

    #[test]
    fn test_outer_concrete() {
        let mut c = Matrix::new(3, 3);
        outer(&sample(), &mut c).unwrap();
        assert_eq!(
            c,
            matrix![[5.0, 11.0, 17.0], [11.0, 25.0, 39.0], [17.0, 39.0, 61.0]]
        );
    }

    #[test]
    fn test_inner_concrete() {
        let expected = matrix![[35.0, 44.0], [44.0, 56.0]];
        let mut c = Matrix::new(2, 2);
        inner_small(&sample(), &mut c).unwrap();
        assert_eq!(c, expected);

        let mut c = Matrix::new(2, 2);
        inner_reorder(&sample(), &mut c).unwrap();
        assert_eq!(c, expected);
    }

    #[test]
    fn test_upper_leaves_lower_untouched() {
        let mut c = Matrix::from_vec(2, 2, vec![-1.0, -1.0, -1.0, -1.0]).unwrap();
        inner_reorder_upper(&sample(), &mut c).unwrap();
        assert_eq!(c[(0, 0)], 35.0);
        assert_eq!(c[(0, 1)], 44.0);
        assert_eq!(c[(1, 1)], 56.0);
        assert_eq!(c[(1, 0)], -1.0);
    }

    #[test]
    fn test_rejects_wrong_target() {
        let mut c = Matrix::new(3, 3);
        assert!(matches!(
            inner_small(&sample(), &mut c),
            Err(MatrustError::DimensionMismatch { expected: (2, 2), actual: (3, 3) })
        ));
        let mut c = Matrix::new(2, 2);
        assert!(outer(&sample(), &mut c).is_err());
        assert!(inner_reorder_upper(&sample(), &mut c.clone()).is_ok());
    }

    #[test]
    fn test_dispatch_matches_generic() {
        let a: Matrix<f32> = matrix![[0.5, -1.0, 2.0], [1.5, 0.0, -0.25]];
        let mut expected = Matrix::new(3, 3);
        mult_trans_a(&a, &a, &mut expected).unwrap();

        for switch in [0, 100] {
            let config = KernelConfig::default().with_mult_inner_switch(switch);
            let mut c = Matrix::new(3, 3);
            mult_inner(&a, &mut c, &config).unwrap();
            assert_eq!(c, expected);
        }

        let mut expected = Matrix::new(2, 2);
        mult_trans_b(&a, &a, &mut expected).unwrap();
        let mut c = Matrix::new(2, 2);
        mult_outer(&a, &mut c).unwrap();
        assert_eq!(c, expected);
    }

    #[test]
    fn test_empty_shared_dimension() {
        let a = Matrix::<f64>::new(0, 2);
        let mut c = Matrix::from_vec(2, 2, vec![9.0; 4]).unwrap();
        inner_reorder(&a, &mut c).unwrap();
        assert_eq!(c, Matrix::new(2, 2));
    }
}
