use super::{SimpleEvd, SimpleSvd, END};
use crate::{
    config::KernelConfig,
    error::Result,
    linalg,
    matrix::{Matrix, MatrixIter},
    ops,
    scalar::Scalar,
};

/// High level operations shared by every matrix handle.
///
/// An implementor supplies access to its backing [`Matrix`] and a factory,
/// [`SimpleBase::wrap_matrix`], that turns a freshly computed matrix into a
/// handle of its own type. Every provided method that returns a matrix goes
/// through that factory, so chains of operations on a custom handle keep the
/// custom type.
///
/// Scalar arguments are taken as `f64` and narrowed to the backing precision;
/// non-matrix results are widened back to `f64`.
pub trait SimpleBase<T: Scalar>: Sized + Clone {
    fn matrix(&self) -> &Matrix<T>;

    fn matrix_mut(&mut self) -> &mut Matrix<T>;

    /// Wraps `m` in a new handle of the implementing type.
    fn wrap_matrix(&self, m: Matrix<T>) -> Self;

    /// A new zero-filled handle of the implementing type.
    fn create_matrix(&self, num_rows: usize, num_cols: usize) -> Self {
        self.wrap_matrix(Matrix::new(num_rows, num_cols))
    }

    fn transpose(&self) -> Self {
        self.wrap_matrix(linalg::transpose(self.matrix()))
    }

    /// `self * b`
    fn mult(&self, b: &Self) -> Result<Self> {
        let mut ret = self.create_matrix(self.num_rows(), b.num_cols());
        linalg::mult(self.matrix(), b.matrix(), ret.matrix_mut())?;
        Ok(ret)
    }

    /// `selfᵗ * self`, computed with the symmetric inner-product kernels.
    fn mult_inner(&self) -> Result<Self> {
        let n = self.num_cols();
        let mut ret = self.create_matrix(n, n);
        linalg::mult_inner(self.matrix(), ret.matrix_mut(), &KernelConfig::default())?;
        Ok(ret)
    }

    /// `self * selfᵗ`, computed with the symmetric outer-product kernel.
    fn mult_outer(&self) -> Result<Self> {
        let n = self.num_rows();
        let mut ret = self.create_matrix(n, n);
        linalg::mult_outer(self.matrix(), ret.matrix_mut())?;
        Ok(ret)
    }

    /// Kronecker product.
    fn kron(&self, b: &Self) -> Self {
        self.wrap_matrix(ops::kron(self.matrix(), b.matrix()))
    }

    fn plus(&self, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(ops::add(self.matrix(), b.matrix())?))
    }

    fn minus(&self, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(ops::sub(self.matrix(), b.matrix())?))
    }

    /// Adds `b` to every element.
    fn plus_scalar(&self, b: f64) -> Self {
        self.wrap_matrix(ops::add_scalar(self.matrix(), T::from_wide(b)))
    }

    /// Subtracts `b` from every element.
    fn minus_scalar(&self, b: f64) -> Self {
        self.wrap_matrix(ops::sub_scalar(self.matrix(), T::from_wide(b)))
    }

    /// `self + beta * b`
    fn plus_scaled(&self, beta: f64, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(ops::add_scaled(
            self.matrix(),
            T::from_wide(beta),
            b.matrix(),
        )?))
    }

    /// Dot product of two vectors.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either operand is not a vector.
    fn dot(&self, v: &Self) -> Result<f64> {
        Ok(linalg::dot(self.matrix(), v.matrix())?.to_wide())
    }

    fn scale(&self, val: f64) -> Self {
        self.wrap_matrix(ops::scale(self.matrix(), T::from_wide(val)))
    }

    fn divide(&self, val: f64) -> Self {
        self.wrap_matrix(ops::divide(self.matrix(), T::from_wide(val)))
    }

    /// Inverse of a square matrix.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` if the decomposition fails or the inverse holds NaN
    /// or infinite values.
    fn invert(&self) -> Result<Self> {
        Ok(self.wrap_matrix(linalg::checked_invert(self.matrix())?))
    }

    /// Moore-Penrose pseudo-inverse. Never reports singularity.
    fn pseudo_inverse(&self) -> Result<Self> {
        Ok(self.wrap_matrix(linalg::pinv(self.matrix())?))
    }

    /// Solves `self * x = b` for `x`.
    ///
    /// Non-square systems are solved in the least-squares sense.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` under the same conditions as [`SimpleBase::invert`].
    fn solve(&self, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(linalg::checked_solve(self.matrix(), b.matrix())?))
    }

    /// Copies the contents of `a`, which must have the same dimensions.
    fn set_from(&mut self, a: &Self) -> Result<()> {
        self.matrix_mut().set_from(a.matrix())
    }

    fn fill(&mut self, val: f64) {
        self.matrix_mut().fill(T::from_wide(val));
    }

    fn zero(&mut self) {
        self.matrix_mut().zero();
    }

    /// Frobenius norm.
    fn norm_f(&self) -> f64 {
        linalg::norm_f(self.matrix()).to_wide()
    }

    /// 2-norm condition number.
    fn condition_p2(&self) -> f64 {
        linalg::condition_p2(self.matrix()).to_wide()
    }

    /// Determinant, or zero when it is not a finite number.
    fn determinant(&self) -> Result<f64> {
        Ok(linalg::checked_determinant(self.matrix())?.to_wide())
    }

    fn trace(&self) -> f64 {
        ops::trace(self.matrix()).to_wide()
    }

    /// Changes the dimensions without preserving the `(row, col)` layout.
    fn reshape(&mut self, num_rows: usize, num_cols: usize) {
        self.matrix_mut().reshape(num_rows, num_cols, false);
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.matrix_mut().set(row, col, T::from_wide(value))
    }

    /// Writes a flat row-major element. Panics past the end of the buffer.
    fn set_flat(&mut self, index: usize, value: f64) {
        self.matrix_mut().set_flat(index, T::from_wide(value));
    }

    /// `self[row, offset..offset + values.len()] = values`
    fn set_row(&mut self, row: usize, offset: usize, values: &[f64]) -> Result<()> {
        for (i, &v) in values.iter().enumerate() {
            self.set(row, offset + i, v)?;
        }
        Ok(())
    }

    /// `self[offset..offset + values.len(), column] = values`
    fn set_column(&mut self, column: usize, offset: usize, values: &[f64]) -> Result<()> {
        for (i, &v) in values.iter().enumerate() {
            self.set(offset + i, column, v)?;
        }
        Ok(())
    }

    fn get(&self, row: usize, col: usize) -> Result<f64> {
        Ok(self.matrix().get(row, col)?.to_wide())
    }

    /// Reads a flat row-major element. Panics past the end of the buffer.
    fn get_flat(&self, index: usize) -> f64 {
        self.matrix().get_flat(index).to_wide()
    }

    fn get_index(&self, row: usize, col: usize) -> usize {
        self.matrix().get_index(row, col)
    }

    fn iter(
        &self,
        row_major: bool,
        min_row: usize,
        min_col: usize,
        max_row: usize,
        max_col: usize,
    ) -> Result<MatrixIter<'_, T>> {
        self.matrix().iter(row_major, min_row, min_col, max_row, max_col)
    }

    fn copy(&self) -> Self {
        self.wrap_matrix(self.matrix().clone())
    }

    fn num_rows(&self) -> usize {
        self.matrix().num_rows()
    }

    fn num_cols(&self) -> usize {
        self.matrix().num_cols()
    }

    fn num_elements(&self) -> usize {
        self.matrix().num_elements()
    }

    fn is_vector(&self) -> bool {
        self.matrix().is_vector()
    }

    fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        self.matrix().is_in_bounds(row, col)
    }

    /// Bits in the backing element type, 32 or 64.
    fn bits(&self) -> u32 {
        T::BITS
    }

    /// Rows `y0..y1` and columns `x0..x1`. [`END`] in any bound stands for
    /// the matching extent of this matrix.
    fn extract_matrix(&self, y0: usize, y1: usize, x0: usize, x1: usize) -> Result<Self> {
        let (rows, cols) = self.matrix().shape();
        let resolve = |v: usize, extent: usize| if v == END { extent } else { v };
        Ok(self.wrap_matrix(ops::extract(
            self.matrix(),
            resolve(y0, rows),
            resolve(y1, rows),
            resolve(x0, cols),
            resolve(x1, cols),
        )?))
    }

    /// Row `element` as a row vector, or column `element` as a column vector.
    fn extract_vector(&self, extract_row: bool, element: usize) -> Result<Self> {
        let m = if extract_row {
            ops::extract_row(self.matrix(), element)?
        } else {
            ops::extract_column(self.matrix(), element)?
        };
        Ok(self.wrap_matrix(m))
    }

    /// Diagonal as a column vector.
    fn extract_diag(&self) -> Self {
        self.wrap_matrix(ops::extract_diag(self.matrix()))
    }

    /// Copies `b` into this matrix with its corner at `(insert_row, insert_col)`.
    fn insert_into_this(&mut self, insert_row: usize, insert_col: usize, b: &Self) -> Result<()> {
        ops::insert(b.matrix(), self.matrix_mut(), insert_row, insert_col)
    }

    /// A new matrix holding this one with `b` written at `(insert_row, insert_col)`.
    ///
    /// The result grows, zero padded, only as far as `b` requires. [`END`]
    /// places `b` just past the last row or column.
    fn combine(&self, insert_row: usize, insert_col: usize, b: &Self) -> Result<Self> {
        let insert_row = if insert_row == END { self.num_rows() } else { insert_row };
        let insert_col = if insert_col == END { self.num_cols() } else { insert_col };

        let max_row = insert_row + b.num_rows();
        let max_col = insert_col + b.num_cols();

        let mut ret = if max_row > self.num_rows() || max_col > self.num_cols() {
            let mut grown = self.create_matrix(
                max_row.max(self.num_rows()),
                max_col.max(self.num_cols()),
            );
            grown.insert_into_this(0, 0, self)?;
            grown
        } else {
            self.copy()
        };
        ret.insert_into_this(insert_row, insert_col, b)?;
        Ok(ret)
    }

    /// Checks whether `a` matches this matrix element by element within `tol`.
    fn is_identical(&self, a: &Self, tol: f64) -> Result<bool> {
        ops::is_identical(self.matrix(), a.matrix(), T::from_wide(tol))
    }

    fn has_uncountable(&self) -> bool {
        ops::has_uncountable(self.matrix())
    }

    /// Largest absolute value of any element.
    fn element_max_abs(&self) -> f64 {
        ops::element_max_abs(self.matrix()).to_wide()
    }

    fn element_sum(&self) -> f64 {
        ops::element_sum(self.matrix()).to_wide()
    }

    fn element_mult(&self, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(ops::element_mult(self.matrix(), b.matrix())?))
    }

    fn element_div(&self, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(ops::element_div(self.matrix(), b.matrix())?))
    }

    fn element_power(&self, b: &Self) -> Result<Self> {
        Ok(self.wrap_matrix(ops::element_power(self.matrix(), b.matrix())?))
    }

    fn element_power_scalar(&self, b: f64) -> Self {
        self.wrap_matrix(ops::element_power_scalar(self.matrix(), T::from_wide(b)))
    }

    fn element_exp(&self) -> Self {
        self.wrap_matrix(ops::element_exp(self.matrix()))
    }

    fn element_log(&self) -> Self {
        self.wrap_matrix(ops::element_log(self.matrix()))
    }

    fn negative(&self) -> Self {
        self.wrap_matrix(ops::neg(self.matrix()))
    }

    /// Singular value decomposition, compact (`U` is `m x k`) or full.
    fn svd(&self, compact: bool) -> SimpleSvd<T, Self> {
        SimpleSvd::new(self, compact)
    }

    /// Eigen decomposition of a symmetric matrix.
    fn eig(&self) -> Result<SimpleEvd<T, Self>> {
        SimpleEvd::new(self)
    }

    #[cfg(feature = "io")]
    fn save_to_file_csv<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        crate::io::save_csv(self.matrix(), path)
    }

    /// Reads a matrix from CSV into a handle of this type.
    #[cfg(feature = "io")]
    fn load_csv<P: AsRef<std::path::Path>>(&self, path: P) -> Result<Self> {
        Ok(self.wrap_matrix(crate::io::load_csv(path)?))
    }
}

/// Builds a matrix from rows of wide values, narrowing each element.
pub(crate) fn rows_to_matrix<T: Scalar, R: AsRef<[f64]>>(rows: &[R]) -> Result<Matrix<T>> {
    let narrowed: Vec<Vec<T>> = rows
        .iter()
        .map(|row| row.as_ref().iter().map(|&v| T::from_wide(v)).collect())
        .collect();
    Matrix::from_rows(&narrowed)
}
