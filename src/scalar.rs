//! Element types a [`Matrix`](crate::Matrix) can be instantiated with.
//!
//! The engine is written once against [`Scalar`] and instantiated for the two
//! supported precisions, `f32` and `f64`. The trait is sealed, so no third
//! precision can show up at runtime.

use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};
use std::iter::Sum;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A floating point element type backing a dense matrix.
pub trait Scalar:
    Float
    + NumAssign
    + FromPrimitive
    + Default
    + Debug
    + Display
    + LowerExp
    + Sum
    + Send
    + Sync
    + sealed::Sealed
    + 'static
{
    /// Number of bits in the element type.
    const BITS: u32;

    /// Tolerance used when comparing results of equivalent computations.
    const TEST_TOLERANCE: Self;

    /// Narrows (or passes through) a wide scalar argument.
    fn from_wide(value: f64) -> Self;

    /// Widens the value to the type used for non-matrix results.
    fn to_wide(self) -> f64;

    /// `true` for NaN and either infinity.
    #[inline]
    fn is_uncountable(self) -> bool {
        !self.is_finite()
    }
}

impl Scalar for f32 {
    const BITS: u32 = 32;
    const TEST_TOLERANCE: f32 = 1e-4;

    #[inline]
    fn from_wide(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_wide(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    const BITS: u32 = 64;
    const TEST_TOLERANCE: f64 = 1e-8;

    #[inline]
    fn from_wide(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_wide(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing() {
        assert_eq!(f32::from_wide(0.5), 0.5f32);
        assert_eq!(f64::from_wide(0.1), 0.1);
        assert_eq!(2.5f32.to_wide(), 2.5);
    }

    #[test]
    fn test_uncountable() {
        assert!(f64::NAN.is_uncountable());
        assert!(f32::INFINITY.is_uncountable());
        assert!(f64::NEG_INFINITY.is_uncountable());
        assert!(!1.0f64.is_uncountable());
    }
}
