// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The connection step and divisor reduction, in a chosen representation.

use crate::arith::{CollatzInt, OverflowError};
use crate::config::CollatzParams;

/// Map parameters converted once into the numeric type `T`.
#[derive(Debug, Clone)]
pub(crate) struct Coefficients<T> {
    pub divisor: T,
    pub multiplier: T,
    pub addend: T,
    /// `divisor * multiplier`.
    pub modulus: T,
}

impl<T: CollatzInt> Coefficients<T> {
    /// Convert `params` into `T`.
    pub fn new(params: &CollatzParams) -> Self {
        Self {
            divisor: T::from(params.divisor()),
            multiplier: T::from(params.multiplier()),
            addend: T::from(params.addend()),
            modulus: T::from(params.modulus()),
        }
    }

    /// `n * multiplier + addend`.
    pub fn connection(&self, n: &T) -> Result<T, OverflowError> {
        n.safe_mul(&self.multiplier)?.safe_add(&self.addend)
    }

    /// True when the divisor divides `n`.
    pub fn divides(&self, n: &T) -> bool {
        (n.clone() % self.divisor.clone()).is_zero()
    }

    /// True when the multiplier divides `n`.
    pub fn multiplier_divides(&self, n: &T) -> bool {
        (n.clone() % self.multiplier.clone()).is_zero()
    }

    /// `n / divisor`.
    pub fn divide(&self, n: &T) -> T {
        n.clone() / self.divisor.clone()
    }

    /// Remove every divisor factor from `n`, returning how many were removed.
    ///
    /// Zero is left alone.
    pub fn reduce_all(&self, n: &mut T) -> u32 {
        let mut factors = 0;
        if n.is_zero() {
            return factors;
        }
        while self.divides(n) {
            *n = self.divide(n);
            factors += 1;
        }
        factors
    }

    /// Remove divisor factors from `n`, stopping as soon as its magnitude
    /// drops below `bound`.
    pub fn reduce_below(&self, n: &mut T, bound: &T) -> u32 {
        let mut factors = 0;
        if n.is_zero() {
            return factors;
        }
        while self.divides(n) {
            *n = self.divide(n);
            factors += 1;
            if n.abs_value() < *bound {
                break;
            }
        }
        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> Coefficients<i64> {
        Coefficients::new(&CollatzParams::default())
    }

    #[test]
    fn test_connection() {
        let steps = canonical();
        assert_eq!(steps.connection(&7), Ok(22));
        assert_eq!(steps.connection(&-5), Ok(-14));
        assert!(steps.connection(&(i64::MAX / 2)).is_err());
    }

    #[test]
    fn test_reduce_all() {
        let steps = canonical();
        let mut n = 52;
        assert_eq!(steps.reduce_all(&mut n), 2);
        assert_eq!(n, 13);

        let mut zero = 0;
        assert_eq!(steps.reduce_all(&mut zero), 0);
    }

    #[test]
    fn test_reduce_below_stops_early() {
        let steps = canonical();
        // 304 -> 152 -> 76: stops at 76 < 79 although 76 is still even
        let mut n = 304;
        assert_eq!(steps.reduce_below(&mut n, &79), 2);
        assert_eq!(n, 76);
    }
}
