// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stepping backwards and forwards one connection at a time.

use super::step::Coefficients;
use super::Path;
use crate::arith::CollatzInt;
use crate::error::PathError;

impl<T: CollatzInt> Path<T> {
    /// Search for a parent: a value whose connection, fully reduced, is the
    /// start.
    ///
    /// Candidates are `(scale * start * divisor - addend) / multiplier` for
    /// increasing `scale`. On success `scale` is left one past the match, so
    /// calling again yields the next ancestor. Starts divisible by the
    /// divisor or the multiplier have no parent and give `Ok(None)`.
    ///
    /// At most `ancestry_limit` scales are tried per call.
    ///
    /// ```
    /// use collatz_orbits::{CollatzParams, Path};
    ///
    /// let path = Path::new(5i64, &CollatzParams::default());
    /// let mut scale = 1;
    /// assert_eq!(path.ancestry(&mut scale).unwrap(), Some(3));
    /// assert_eq!(path.ancestry(&mut scale).unwrap(), Some(13));
    /// assert_eq!(scale, 5);
    /// ```
    pub fn ancestry(&self, scale: &mut T) -> Result<Option<T>, PathError> {
        let steps = Coefficients::<T>::new(&self.params);
        if steps.divides(&self.start) || steps.multiplier_divides(&self.start) {
            return Ok(None);
        }

        let one = T::one();
        let base = self.start.safe_mul(&steps.divisor)?;
        let limit = self.params.ancestry_limit();
        for _ in 0..limit {
            let parent =
                scale.safe_mul(&base)?.safe_sub(&steps.addend)? / steps.multiplier.clone();
            let mut child = steps.connection(&parent)?;
            steps.reduce_all(&mut child);
            *scale = scale.safe_add(&one)?;
            if child == self.start {
                return Ok(Some(parent));
            }
        }

        tracing::debug!(start = %self.start, scale = %scale, limit, "ancestor search exhausted");
        Err(PathError::AncestryExhausted {
            start: self.start.to_string(),
            scale: scale.to_string(),
            tried: limit,
        })
    }

    /// The value following the start: its connection when the start is not
    /// divisible by the divisor, otherwise one division.
    pub fn next(&self) -> Result<T, PathError> {
        let steps = Coefficients::<T>::new(&self.params);
        if steps.divides(&self.start) {
            Ok(steps.divide(&self.start))
        } else {
            Ok(steps.connection(&self.start)?)
        }
    }
}
