//! Matrix transpose operations.

use super::check_output;
use crate::{config::KernelConfig, error::Result, matrix::Matrix, scalar::Scalar};

/// Transpose a matrix into a newly allocated one, using the default
/// kernel thresholds.
pub fn transpose<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    let config = KernelConfig::default();
    let mut ret = Matrix::new(a.num_cols, a.num_rows);
    if a.num_elements() >= config.transpose_switch {
        transpose_block(a, &mut ret, config.block_width);
    } else {
        transpose_naive(a, &mut ret);
    }
    ret
}

/// Transpose `a` into the pre-sized `out`, switching to a tiled copy
/// for large inputs.
pub fn transpose_into<T: Scalar>(
    a: &Matrix<T>,
    out: &mut Matrix<T>,
    config: &KernelConfig,
) -> Result<()> {
    check_output(out, (a.num_cols, a.num_rows))?;
    if a.num_elements() >= config.transpose_switch {
        transpose_block(a, out, config.block_width);
    } else {
        transpose_naive(a, out);
    }
    Ok(())
}

/// In-place transpose of a square matrix.
pub fn transpose_square_<T: Scalar>(a: &mut Matrix<T>) {
    debug_assert!(a.is_square());
    let n = a.num_rows;
    for i in 0..n {
        for j in (i + 1)..n {
            a.data.swap(i * n + j, j * n + i);
        }
    }
}

fn transpose_naive<T: Scalar>(a: &Matrix<T>, out: &mut Matrix<T>) {
    let m = a.num_rows;
    let n = a.num_cols;
    for i in 0..m {
        for j in 0..n {
            out.data[j * m + i] = a.data[i * n + j];
        }
    }
}

fn transpose_block<T: Scalar>(a: &Matrix<T>, out: &mut Matrix<T>, block: usize) {
    let m = a.num_rows;
    let n = a.num_cols;
    for i0 in (0..m).step_by(block) {
        let i1 = (i0 + block).min(m);
        for j0 in (0..n).step_by(block) {
            let j1 = (j0 + block).min(n);
            for i in i0..i1 {
                for j in j0..j1 {
                    out.data[j * m + i] = a.data[i * n + j];
                }
            }
        }
    }
}
