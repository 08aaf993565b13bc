//! Element-level operations on dense matrices.
//!
//! Functions without a trailing underscore allocate and return a new matrix;
//! the `_`-suffixed variants mutate their first argument in place.

mod arithmetic;
mod elementwise;
mod extract;
mod features;
mod reduction;

pub use arithmetic::*;
pub use elementwise::*;
pub use extract::*;
pub use features::*;
pub use reduction::*;

use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
};

/// Fails unless both operands have identical dimensions.
pub(crate) fn check_same_shape<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<()> {
    let expected = (lhs.num_rows, lhs.num_cols);
    let actual = (rhs.num_rows, rhs.num_cols);
    if expected != actual {
        return Err(MatrustError::dimension_mismatch(expected, actual));
    }
    Ok(())
}
