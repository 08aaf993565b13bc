//! Arithmetic operations for matrices.

use super::{check_same_shape, zip_with};
use crate::{error::Result, matrix::Matrix, scalar::Scalar};

/// Element-wise addition of two matrices.
pub fn add<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(lhs, rhs, |a, b| a + b)
}

/// Element-wise subtraction of two matrices.
pub fn sub<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(lhs, rhs, |a, b| a - b)
}

/// Computes `lhs + beta * rhs`.
pub fn add_scaled<T: Scalar>(lhs: &Matrix<T>, beta: T, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(lhs, rhs, |a, b| a + beta * b)
}

/// In-place `lhs += beta * rhs`.
pub fn add_equals_<T: Scalar>(lhs: &mut Matrix<T>, beta: T, rhs: &Matrix<T>) -> Result<()> {
    check_same_shape(lhs, rhs)?;
    lhs.data
        .iter_mut()
        .zip(rhs.data.iter())
        .for_each(|(a, &b)| *a += beta * b);
    Ok(())
}

/// Adds `value` to every element.
pub fn add_scalar<T: Scalar>(a: &Matrix<T>, value: T) -> Matrix<T> {
    let mut ret = a.clone();
    ret.data.iter_mut().for_each(|x| *x += value);
    ret
}

/// Subtracts `value` from every element.
pub fn sub_scalar<T: Scalar>(a: &Matrix<T>, value: T) -> Matrix<T> {
    let mut ret = a.clone();
    ret.data.iter_mut().for_each(|x| *x -= value);
    ret
}

/// Multiplies every element by `alpha`.
pub fn scale<T: Scalar>(a: &Matrix<T>, alpha: T) -> Matrix<T> {
    let mut ret = a.clone();
    scale_(&mut ret, alpha);
    ret
}

pub fn scale_<T: Scalar>(a: &mut Matrix<T>, alpha: T) {
    a.data.iter_mut().for_each(|x| *x *= alpha);
}

/// Divides every element by `alpha`.
pub fn divide<T: Scalar>(a: &Matrix<T>, alpha: T) -> Matrix<T> {
    let mut ret = a.clone();
    divide_(&mut ret, alpha);
    ret
}

pub fn divide_<T: Scalar>(a: &mut Matrix<T>, alpha: T) {
    a.data.iter_mut().for_each(|x| *x /= alpha);
}

/// Element-wise negation of a matrix.
pub fn neg<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    let mut ret = a.clone();
    change_sign_(&mut ret);
    ret
}

pub fn change_sign_<T: Scalar>(a: &mut Matrix<T>) {
    a.data.iter_mut().for_each(|x| *x = -*x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::MatrustError, matrix};

    #[test]
    fn test_add() {
        let a = matrix![[1.0, 2.0, 3.0]];
        let b = matrix![[4.0, 5.0, 6.0]];
        let c = add(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_sub() {
        let a = matrix![[4.0f32, 5.0], [6.0, 7.0]];
        let b = matrix![[1.0f32, 2.0], [3.0, 4.0]];
        let c = sub(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = matrix![[1.0, 2.0]];
        let b = matrix![[1.0], [2.0]];
        assert!(matches!(
            add(&a, &b),
            Err(MatrustError::DimensionMismatch { expected: (1, 2), actual: (2, 1) })
        ));
    }

    #[test]
    fn test_add_scaled_and_equals() {
        let mut a = matrix![[1.0, 1.0]];
        let b = matrix![[2.0, -4.0]];
        assert_eq!(add_scaled(&a, 0.5, &b).unwrap().as_slice(), &[2.0, -1.0]);
        add_equals_(&mut a, 2.0, &b).unwrap();
        assert_eq!(a.as_slice(), &[5.0, -7.0]);
    }

    #[test]
    fn test_scalar_ops() {
        let a = matrix![[2.0, -4.0]];
        assert_eq!(scale(&a, 1.5).as_slice(), &[3.0, -6.0]);
        assert_eq!(divide(&a, 2.0).as_slice(), &[1.0, -2.0]);
        assert_eq!(add_scalar(&a, 1.0).as_slice(), &[3.0, -3.0]);
        assert_eq!(sub_scalar(&a, 1.0).as_slice(), &[1.0, -5.0]);
        assert_eq!(neg(&a).as_slice(), &[-2.0, 4.0]);
    }
}
