// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Overflow-checked scalar arithmetic.
//!
//! Fixed-width integers use the checked operations of the standard library and
//! report an [`OverflowError`] when the mathematical result does not fit.
//! Arbitrary-precision integers cannot overflow, so their implementation simply
//! forwards to the native operators.
//!
//! # Examples
//!
//! ```
//! use collatz_orbits::arith::SafeArith;
//!
//! assert_eq!(40i64.safe_mul(&3).unwrap(), 120);
//! assert!(i64::MAX.safe_add(&1).is_err());
//! ```

use num_bigint::BigInt;
use strum_macros::Display;
use thiserror::Error;

/// The arithmetic operation that overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

impl ArithOp {
    fn symbol(self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
            ArithOp::Mul => '*',
        }
    }
}

/// A fixed-width result was not representable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("integer {op} overflow: {lhs} {} {rhs}", .op.symbol())]
pub struct OverflowError {
    pub op: ArithOp,
    pub lhs: String,
    pub rhs: String,
}

impl OverflowError {
    fn new(op: ArithOp, lhs: &dyn std::fmt::Display, rhs: &dyn std::fmt::Display) -> Self {
        Self {
            op,
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }
}

/// Add, subtract and multiply without silent wrap-around.
pub trait SafeArith: Sized {
    fn safe_add(&self, rhs: &Self) -> Result<Self, OverflowError>;
    fn safe_sub(&self, rhs: &Self) -> Result<Self, OverflowError>;
    fn safe_mul(&self, rhs: &Self) -> Result<Self, OverflowError>;
}

macro_rules! impl_fixed_width {
    ($($t:ty),*) => {
        $(
            impl SafeArith for $t {
                fn safe_add(&self, rhs: &Self) -> Result<Self, OverflowError> {
                    self.checked_add(*rhs)
                        .ok_or_else(|| OverflowError::new(ArithOp::Add, self, rhs))
                }

                fn safe_sub(&self, rhs: &Self) -> Result<Self, OverflowError> {
                    self.checked_sub(*rhs)
                        .ok_or_else(|| OverflowError::new(ArithOp::Sub, self, rhs))
                }

                fn safe_mul(&self, rhs: &Self) -> Result<Self, OverflowError> {
                    self.checked_mul(*rhs)
                        .ok_or_else(|| OverflowError::new(ArithOp::Mul, self, rhs))
                }
            }
        )*
    };
}

impl_fixed_width!(i32, i64, i128);

impl SafeArith for BigInt {
    fn safe_add(&self, rhs: &Self) -> Result<Self, OverflowError> {
        Ok(self + rhs)
    }

    fn safe_sub(&self, rhs: &Self) -> Result<Self, OverflowError> {
        Ok(self - rhs)
    }

    fn safe_mul(&self, rhs: &Self) -> Result<Self, OverflowError> {
        Ok(self * rhs)
    }
}
