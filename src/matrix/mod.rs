//! Row-major dense matrix storage.
//!
//! [`Matrix`] is the substrate every kernel in the crate operates on: a single
//! contiguous buffer holding `num_rows * num_cols` elements, with element
//! `(row, col)` stored at offset `row * num_cols + col`.

mod iter;

pub use iter::MatrixIter;

use crate::{
    error::{MatrustError, Result},
    scalar::Scalar,
};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A dense, row-major matrix of `f32` or `f64` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) data: Vec<T>,
    pub(crate) num_rows: usize,
    pub(crate) num_cols: usize,
}

impl<T: Scalar> Matrix<T> {
    /// Creates a zero-filled matrix.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![T::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not match the dimensions.
    pub fn from_vec(num_rows: usize, num_cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != num_rows * num_cols {
            return Err(MatrustError::invalid_argument(format!(
                "buffer of length {} cannot back a {}x{} matrix",
                data.len(),
                num_rows,
                num_cols
            )));
        }
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Builds a matrix from a list of rows, which must all have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != num_cols {
                return Err(MatrustError::invalid_argument(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    num_cols
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(num_rows, num_cols, data)
    }

    /// Creates an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut ret = Self::new(n, n);
        for i in 0..n {
            ret.data[i * n + i] = T::one();
        }
        ret
    }

    /// Creates a square matrix with `values` along the diagonal.
    pub fn diag(values: &[T]) -> Self {
        let n = values.len();
        let mut ret = Self::new(n, n);
        for (i, &v) in values.iter().enumerate() {
            ret.data[i * n + i] = v;
        }
        ret
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_rows * self.num_cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.num_cols)
    }

    /// Number of elements the backing buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn is_vector(&self) -> bool {
        self.num_rows == 1 || self.num_cols == 1
    }

    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.num_rows && col < self.num_cols
    }

    /// Flat offset of `(row, col)`. Performs no bounds check.
    #[inline]
    pub fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.num_cols + col
    }

    /// Bounds-checked element read.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        if !self.is_in_bounds(row, col) {
            return Err(MatrustError::index_out_of_range(row, col, self.shape()));
        }
        Ok(self.data[row * self.num_cols + col])
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if !self.is_in_bounds(row, col) {
            return Err(MatrustError::index_out_of_range(row, col, self.shape()));
        }
        self.data[row * self.num_cols + col] = value;
        Ok(())
    }

    /// Reads the element at a flat row-major offset.
    ///
    /// There is no 2-D bounds check; an offset past the buffer panics.
    #[inline]
    pub fn get_flat(&self, index: usize) -> T {
        self.data[index]
    }

    /// Writes the element at a flat row-major offset. See [`Matrix::get_flat`].
    #[inline]
    pub fn set_flat(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Changes the logical dimensions of the matrix.
    ///
    /// When the new element count fits in the existing buffer the buffer is
    /// reused and never shrunk. Otherwise a new zero-filled buffer of the exact
    /// size is allocated.
    ///
    /// With `preserve_data` set, every element whose `(row, col)` exists in both
    /// geometries keeps its value and all other cells are zero. Without it the
    /// flat row-major prefix is left as is and cells past the old size are zero.
    pub fn reshape(&mut self, num_rows: usize, num_cols: usize, preserve_data: bool) {
        let new_len = num_rows * num_cols;

        if new_len > self.data.capacity() {
            let mut data = vec![T::zero(); new_len];
            if preserve_data {
                let keep_rows = self.num_rows.min(num_rows);
                let keep_cols = self.num_cols.min(num_cols);
                for r in 0..keep_rows {
                    let src = r * self.num_cols;
                    data[r * num_cols..r * num_cols + keep_cols]
                        .copy_from_slice(&self.data[src..src + keep_cols]);
                }
            }
            self.data = data;
        } else if preserve_data && num_cols != self.num_cols {
            self.relayout_in_place(num_rows, num_cols);
        } else {
            self.data.resize(new_len, T::zero());
        }

        self.num_rows = num_rows;
        self.num_cols = num_cols;
    }

    // Moves rows to their offsets under a new column count without leaving the buffer.
    fn relayout_in_place(&mut self, num_rows: usize, num_cols: usize) {
        let old_cols = self.num_cols;
        let keep_rows = self.num_rows.min(num_rows);
        let keep_cols = old_cols.min(num_cols);
        let new_len = num_rows * num_cols;
        let old_len = self.data.len();

        self.data.resize(old_len.max(new_len), T::zero());

        if num_cols < old_cols {
            for r in 0..keep_rows {
                let src = r * old_cols;
                self.data.copy_within(src..src + keep_cols, r * num_cols);
            }
        } else {
            for r in (0..keep_rows).rev() {
                let src = r * old_cols;
                let dst = r * num_cols;
                self.data.copy_within(src..src + keep_cols, dst);
                self.data[dst + keep_cols..dst + num_cols].fill(T::zero());
            }
        }

        let tail = (keep_rows * num_cols).min(self.data.len());
        self.data[tail..].fill(T::zero());
        self.data.truncate(new_len);
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn zero(&mut self) {
        self.fill(T::zero());
    }

    /// Copies the contents of `other` into this matrix. Both must share dimensions.
    pub fn set_from(&mut self, other: &Matrix<T>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrustError::dimension_mismatch(self.shape(), other.shape()));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Converts to the other precision, or copies when `U == T`.
    pub fn convert<U: Scalar>(&self) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(|&v| U::from_wide(v.to_wide())).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Traverses the inclusive sub-region `[min_row, max_row] x [min_col, max_col]`.
    pub fn iter(
        &self,
        row_major: bool,
        min_row: usize,
        min_col: usize,
        max_row: usize,
        max_col: usize,
    ) -> Result<MatrixIter<'_, T>> {
        MatrixIter::new(self, row_major, min_row, min_col, max_row, max_col)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Type = dense{} , numRows = {} , numCols = {}",
            T::BITS,
            self.num_rows,
            self.num_cols
        )?;
        for r in 0..self.num_rows {
            for c in 0..self.num_cols {
                write!(f, "{:>12.4e} ", self.data[r * self.num_cols + c])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a [`Matrix`] from nested row literals.
///
/// ```
/// use matrust::matrix;
///
/// let m = matrix![[1.0, 2.0], [3.0, 4.0]];
/// assert_eq!(m.shape(), (2, 2));
/// ```
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)?]),+ $(,)?) => {
        match $crate::Matrix::from_rows(&[$(&[$($x),*][..]),+]) {
            Ok(m) => m,
            Err(e) => panic!("matrix!: {}", e),
        }
    };
}
