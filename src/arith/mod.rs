// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Numeric representations the path engine can run on.
//!
//! [`CollatzInt`] is the capability trait the engine is generic over: the usual
//! ring operations (from `num_traits::Signed`), truncating division and
//! remainder, ordering, decimal conversion, and the overflow-checked operations
//! of [`SafeArith`]. Fixed-width (`i32`, `i64`, `i128`) and arbitrary-precision
//! (`num_bigint::BigInt`) integers are both valid instantiations.

pub mod safe;

pub use safe::{ArithOp, OverflowError, SafeArith};

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed};
use std::fmt;
use std::str::FromStr;

/// Sign of an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// The sign as -1, 0 or 1.
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    /// Sign character used by the equivalence-class encoding.
    pub fn to_char(self) -> Option<char> {
        match self {
            Sign::Negative => Some('-'),
            Sign::Zero => None,
            Sign::Positive => Some('+'),
        }
    }
}

/// An integer representation usable by [`crate::path::Path`].
pub trait CollatzInt:
    SafeArith
    + Signed
    + FromPrimitive
    + From<i32>
    + Ord
    + Clone
    + fmt::Debug
    + fmt::Display
    + FromStr
    + Send
    + Sync
    + 'static
{
    /// True when the representation can overflow.
    const FIXED_WIDTH: bool;

    /// Absolute value, saturating at the maximum for fixed widths.
    fn abs_value(&self) -> Self;

    fn sgn(&self) -> Sign {
        if self.is_negative() {
            Sign::Negative
        } else if self.is_zero() {
            Sign::Zero
        } else {
            Sign::Positive
        }
    }

    /// Number of decimal digits in the magnitude (at least 1).
    fn decimal_digits(&self) -> usize {
        self.abs_value().to_string().len()
    }
}

macro_rules! impl_collatz_int {
    ($($t:ty),*) => {
        $(
            impl CollatzInt for $t {
                const FIXED_WIDTH: bool = true;

                fn abs_value(&self) -> Self {
                    self.saturating_abs()
                }
            }
        )*
    };
}

impl_collatz_int!(i32, i64, i128);

impl CollatzInt for BigInt {
    const FIXED_WIDTH: bool = false;

    fn abs_value(&self) -> Self {
        self.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!((-7i64).sgn(), Sign::Negative);
        assert_eq!(0i64.sgn(), Sign::Zero);
        assert_eq!(BigInt::from(12).sgn(), Sign::Positive);
        assert_eq!(Sign::Negative.as_i8(), -1);
        assert_eq!(Sign::Zero.to_char(), None);
    }

    #[test]
    fn test_abs_value_saturates() {
        assert_eq!(i64::MIN.abs_value(), i64::MAX);
        assert_eq!((-3i32).abs_value(), 3);
        assert_eq!(BigInt::from(-9).abs_value(), BigInt::from(9));
    }

    #[test]
    fn test_truncating_division_matches_bigint() {
        for (a, b) in [(-7i64, 2i64), (7, 2), (-7, 3), (7, -3)] {
            let big_a = BigInt::from(a);
            let big_b = BigInt::from(b);
            assert_eq!(BigInt::from(a / b), &big_a / &big_b);
            assert_eq!(BigInt::from(a % b), &big_a % &big_b);
        }
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(0i64.decimal_digits(), 1);
        assert_eq!((-12345i64).decimal_digits(), 5);
    }
}
