//! Copying sub-matrices out of and into dense matrices.

use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};

/// Copies rows `y0..y1` and columns `x0..x1` into a new `(y1-y0) x (x1-x0)` matrix.
pub fn extract<T: Scalar>(
    src: &Matrix<T>,
    y0: usize,
    y1: usize,
    x0: usize,
    x1: usize,
) -> Result<Matrix<T>> {
    if y1 < y0 || x1 < x0 {
        return Err(MatrustError::invalid_argument(format!(
            "inverted range rows {}..{} cols {}..{}",
            y0, y1, x0, x1
        )));
    }
    if y1 > src.num_rows || x1 > src.num_cols {
        return Err(MatrustError::index_out_of_range(y1, x1, src.shape()));
    }

    let cols = x1 - x0;
    let mut data = Vec::with_capacity((y1 - y0) * cols);
    for row in y0..y1 {
        let start = row * src.num_cols + x0;
        data.extend_from_slice(&src.data[start..start + cols]);
    }
    Matrix::from_vec(y1 - y0, cols, data)
}

/// Writes `src` into `dst` with its top-left corner at `(row, col)`.
///
/// `dst` is never resized; `src` must fit entirely inside it.
pub fn insert<T: Scalar>(src: &Matrix<T>, dst: &mut Matrix<T>, row: usize, col: usize) -> Result<()> {
    let max_row = row + src.num_rows;
    let max_col = col + src.num_cols;
    if max_row > dst.num_rows || max_col > dst.num_cols {
        return Err(MatrustError::dimension_mismatch(dst.shape(), (max_row, max_col)));
    }

    for r in 0..src.num_rows {
        let src_start = r * src.num_cols;
        let dst_start = (row + r) * dst.num_cols + col;
        dst.data[dst_start..dst_start + src.num_cols]
            .copy_from_slice(&src.data[src_start..src_start + src.num_cols]);
    }
    Ok(())
}

/// Diagonal elements as a `min(rows, cols) x 1` column vector.
pub fn extract_diag<T: Scalar>(src: &Matrix<T>) -> Matrix<T> {
    let n = src.num_rows.min(src.num_cols);
    Matrix {
        data: (0..n).map(|i| src.data[i * src.num_cols + i]).collect(),
        num_rows: n,
        num_cols: 1,
    }
}

/// Row `row` as a `1 x cols` vector.
pub fn extract_row<T: Scalar>(src: &Matrix<T>, row: usize) -> Result<Matrix<T>> {
    if row >= src.num_rows {
        return Err(MatrustError::index_out_of_range(row, 0, src.shape()));
    }
    extract(src, row, row + 1, 0, src.num_cols)
}

/// Column `col` as a `rows x 1` vector.
pub fn extract_column<T: Scalar>(src: &Matrix<T>, col: usize) -> Result<Matrix<T>> {
    if col >= src.num_cols {
        return Err(MatrustError::index_out_of_range(0, col, src.shape()));
    }
    Ok(Matrix {
        data: (0..src.num_rows)
            .map(|r| src.data[r * src.num_cols + col])
            .collect(),
        num_rows: src.num_rows,
        num_cols: 1,
    })
}

/// Kronecker product, `(a.rows * b.rows) x (a.cols * b.cols)`.
pub fn kron<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    let num_rows = a.num_rows * b.num_rows;
    let num_cols = a.num_cols * b.num_cols;
    let mut c = Matrix::new(num_rows, num_cols);

    for i in 0..a.num_rows {
        for j in 0..a.num_cols {
            let a_ij = a.data[i * a.num_cols + j];
            for r in 0..b.num_rows {
                let dst = (i * b.num_rows + r) * num_cols + j * b.num_cols;
                let src = r * b.num_cols;
                for k in 0..b.num_cols {
                    c.data[dst + k] = a_ij * b.data[src + k];
                }
            }
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;

    #[test]
    fn test_extract() {
        let a = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let b = extract(&a, 1, 3, 0, 2).unwrap();
        assert_eq!(b.shape(), (2, 2));
        assert_eq!(b.as_slice(), &[4.0, 5.0, 7.0, 8.0]);

        let empty = extract(&a, 1, 1, 0, 3).unwrap();
        assert_eq!(empty.shape(), (0, 3));

        assert!(extract(&a, 0, 4, 0, 1).is_err());
        assert!(extract(&a, 2, 1, 0, 1).is_err());
    }

    #[test]
    fn test_insert() {
        let mut dst = Matrix::<f64>::new(3, 3);
        let src = matrix![[1.0, 2.0], [3.0, 4.0]];
        insert(&src, &mut dst, 1, 1).unwrap();
        assert_eq!(dst.as_slice(), &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 3.0, 4.0]);
        assert!(matches!(
            insert(&src, &mut dst, 2, 0),
            Err(MatrustError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_vectors_and_diag() {
        let a = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(extract_row(&a, 1).unwrap().as_slice(), &[4.0, 5.0, 6.0]);
        let col = extract_column(&a, 2).unwrap();
        assert_eq!(col.shape(), (2, 1));
        assert_eq!(col.as_slice(), &[3.0, 6.0]);
        let d = extract_diag(&a);
        assert_eq!(d.shape(), (2, 1));
        assert_eq!(d.as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn test_kron() {
        let a = matrix![[1.0, 2.0]];
        let b = matrix![[0.0, 1.0], [1.0, 0.0]];
        let c = kron(&a, &b);
        assert_eq!(c.shape(), (2, 4));
        assert_eq!(c.as_slice(), &[0.0, 1.0, 0.0, 2.0, 1.0, 0.0, 2.0, 0.0]);
    }
}
