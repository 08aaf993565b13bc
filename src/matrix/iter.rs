use super::Matrix;
use crate::{
    error::{MatrustError, Result},
    scalar::Scalar,
};

/// Traversal over an inclusive rectangular sub-region of a [`Matrix`].
///
/// Yields `(row, col, value)` in either row-major or column-major order and
/// can be rewound with [`MatrixIter::reset`].
#[derive(Debug, Clone)]
pub struct MatrixIter<'a, T> {
    matrix: &'a Matrix<T>,
    row_major: bool,
    min_row: usize,
    min_col: usize,
    num_rows: usize,
    num_cols: usize,
    index: usize,
}

impl<'a, T: Scalar> MatrixIter<'a, T> {
    pub(super) fn new(
        matrix: &'a Matrix<T>,
        row_major: bool,
        min_row: usize,
        min_col: usize,
        max_row: usize,
        max_col: usize,
    ) -> Result<Self> {
        if max_row < min_row || max_col < min_col {
            return Err(MatrustError::invalid_argument(format!(
                "empty iteration region [{}, {}] x [{}, {}]",
                min_row, max_row, min_col, max_col
            )));
        }
        if !matrix.is_in_bounds(max_row, max_col) {
            return Err(MatrustError::index_out_of_range(max_row, max_col, matrix.shape()));
        }
        Ok(Self {
            matrix,
            row_major,
            min_row,
            min_col,
            num_rows: max_row - min_row + 1,
            num_cols: max_col - min_col + 1,
            index: 0,
        })
    }

    /// Rewinds to the first element of the region.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn is_row_major(&self) -> bool {
        self.row_major
    }

    fn coordinates(&self, index: usize) -> (usize, usize) {
        if self.row_major {
            (self.min_row + index / self.num_cols, self.min_col + index % self.num_cols)
        } else {
            (self.min_row + index % self.num_rows, self.min_col + index / self.num_rows)
        }
    }
}

impl<'a, T: Scalar> Iterator for MatrixIter<'a, T> {
    type Item = (usize, usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.num_rows * self.num_cols {
            return None;
        }
        let (row, col) = self.coordinates(self.index);
        self.index += 1;
        Some((row, col, self.matrix[(row, col)]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_rows * self.num_cols - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Scalar> ExactSizeIterator for MatrixIter<'a, T> {}

#[cfg(test)]
mod tests {
    use crate::matrix;

    #[test]
    fn test_row_major_region() {
        let m = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let values: Vec<f64> = m.iter(true, 1, 1, 2, 2).unwrap().map(|(_, _, v)| v).collect();
        assert_eq!(values, vec![5.0, 6.0, 8.0, 9.0]);
    }

    #[test]
    fn test_column_major_and_reset() {
        let m = matrix![[1.0f32, 2.0], [3.0, 4.0]];
        let mut it = m.iter(false, 0, 0, 1, 1).unwrap();
        assert_eq!(it.len(), 4);
        let first: Vec<_> = it.by_ref().collect();
        assert_eq!(
            first,
            vec![(0, 0, 1.0), (1, 0, 3.0), (0, 1, 2.0), (1, 1, 4.0)]
        );
        assert!(it.next().is_none());
        it.reset();
        assert_eq!(it.next(), Some((0, 0, 1.0)));
    }

    #[test]
    fn test_region_out_of_bounds() {
        let m = matrix![[1.0, 2.0]];
        assert!(m.iter(true, 0, 0, 1, 1).is_err());
        assert!(m.iter(true, 0, 1, 0, 0).is_err());
    }
}
