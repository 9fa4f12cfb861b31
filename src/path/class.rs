// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Equivalence-class strings.
//!
//! A class string is an optional sign followed by mixed-radix digits. The
//! leading digit is the residue of the start modulo `divisor * multiplier`;
//! every later digit is `0` or `1`, and a `1` in position `k` contributes
//! `divisor * multiplier * 2^(k-1)`. With the canonical map `+11` is 7,
//! `+31` is 9 and `+101` is 13.

use super::step::Coefficients;
use super::Path;
use crate::arith::CollatzInt;
use crate::config::CollatzParams;
use crate::error::{ParseFailure, PathError};

/// Class length of `start`: one more than the number of divisions by the
/// divisor it takes for `|start / multiplier|` to reach 1.
pub fn class_length_of<T: CollatzInt>(start: &T, params: &CollatzParams) -> usize {
    let steps = Coefficients::<T>::new(params);
    let one = T::one();
    let mut residual = (start.clone() / steps.multiplier.clone()).abs_value();
    let mut len = 1;
    while residual > one {
        residual = steps.divide(&residual);
        len += 1;
    }
    len
}

/// Number of digits in a class string, not counting a sign.
pub fn class_digits(input: &str) -> usize {
    let len = input.chars().count();
    if input.starts_with(['+', '-']) {
        len - 1
    } else {
        len
    }
}

/// Parse an equivalence-class string into its starting value.
///
/// ```
/// use collatz_orbits::{parse_class, CollatzParams};
///
/// let params = CollatzParams::default();
/// assert_eq!(parse_class::<i64>("+101", &params).unwrap(), 13);
/// assert_eq!(parse_class::<i64>("-11", &params).unwrap(), -7);
/// assert!(parse_class::<i64>("+7", &params).is_err());
/// ```
pub fn parse_class<T: CollatzInt>(input: &str, params: &CollatzParams) -> Result<T, PathError> {
    let steps = Coefficients::<T>::new(params);
    let fail = |position: usize, reason: ParseFailure| PathError::Parse {
        input: input.to_owned(),
        position,
        reason,
    };

    let mut chars = input.char_indices().peekable();
    let negative = match chars.peek() {
        Some((_, '-')) => {
            chars.next();
            true
        }
        Some((_, '+')) => {
            chars.next();
            false
        }
        _ => false,
    };

    let (offset, lead) = chars
        .next()
        .ok_or_else(|| fail(input.len(), ParseFailure::Empty))?;
    let residue = lead
        .to_digit(10)
        .and_then(|d| i32::try_from(d).ok())
        .filter(|d| *d < params.modulus())
        .ok_or_else(|| fail(offset, ParseFailure::LeadingDigit(lead)))?;

    let mut value = T::from(residue);
    // An overflowed weight only matters if a later digit needs it.
    let mut weight = Ok(steps.modulus.clone());
    for (position, ch) in chars {
        match ch {
            '0' => {}
            '1' => value = value.safe_add(&weight.clone()?)?,
            other => return Err(fail(position, ParseFailure::TrailingDigit(other))),
        }
        weight = weight.and_then(|w: T| w.safe_add(&w));
    }

    Ok(if negative { -value } else { value })
}

impl<T: CollatzInt> Path<T> {
    /// The first `digits` digits of the class representation, signed when the
    /// start is non-zero and at least one digit is asked for.
    ///
    /// ```
    /// use collatz_orbits::{CollatzParams, Path};
    ///
    /// let path = Path::new(7i64, &CollatzParams::default());
    /// assert_eq!(path.flow(2), "+11");
    /// assert_eq!(path.flow(4), "+1100");
    /// assert_eq!(path.flow(0), "");
    /// ```
    pub fn flow(&self, digits: usize) -> String {
        let steps = Coefficients::<T>::new(&self.params);
        let mut out = String::with_capacity(digits + 1);
        if digits == 0 {
            return out;
        }
        if let Some(sign) = self.sign.to_char() {
            out.push(sign);
        }

        let mut residue = self.start.clone() % steps.modulus.clone();
        let mut factors = self.start.clone() / steps.multiplier.clone();
        for _ in 0..digits {
            out.push_str(&residue.abs_value().to_string());
            factors = steps.divide(&factors);
            residue = factors.clone() % steps.divisor.clone();
        }
        out
    }

    /// `flow(class_length())`.
    pub fn class_string(&self) -> String {
        self.flow(self.class_len)
    }
}
