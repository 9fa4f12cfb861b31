// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Convergence analysis of a single starting value.
//!
//! A [`Path`] follows the map from a starting integer until the magnitude
//! first drops to (or below) the starting magnitude, recording the number of
//! divisor factors removed after each connection in an [`OrbitSequence`].
//!
//! # Algorithm
//!
//! 1. A start divisible by the divisor converges after one division: the orbit
//!    is `[1]`.
//! 2. Otherwise the orbit begins with a `0` leg and repeats
//!    connection → reduce until the local terminus is reached. A connection
//!    that does not fit the representation ends the orbit with the
//!    `Overflow` flag set.
//! 3. Class factors and next factors are derived from the terminus and from
//!    one more connection of the reduced start.
//!
//! # Example
//!
//! ```
//! use collatz_orbits::{CollatzParams, Path};
//!
//! let path = Path::new(79i64, &CollatzParams::default());
//! assert_eq!(path.path_string(), "0 1 1 1 3 2");
//! assert_eq!(path.path_factors(), 8);
//! assert!(path.errors().is_empty());
//! ```
//!
//! The same code runs on arbitrary-precision integers:
//!
//! ```
//! use collatz_orbits::{CollatzParams, Path};
//! use num_bigint::BigInt;
//!
//! let big: BigInt = "16253751717361873278362387462384762384723642384718361391301983076253171818271716"
//!     .parse()
//!     .unwrap();
//! let path = Path::new(big, &CollatzParams::default());
//! assert_eq!(path.path_string(), "1");
//! ```

pub mod ancestry;
pub mod class;
pub mod report;
pub(crate) mod step;

pub use class::{class_digits, class_length_of, parse_class};

use crate::arith::{CollatzInt, Sign};
use crate::config::CollatzParams;
use crate::error::{ErrorKind, ErrorSet, PathError};
use crate::orbit::OrbitSequence;
use std::cmp::Ordering;
use step::Coefficients;

/// Orbit and factor counts of one starting value.
#[derive(Debug, Clone)]
pub struct Path<T> {
    start: T,
    sign: Sign,
    /// Value of largest magnitude met along the orbit.
    peak: T,
    /// First orbit value whose magnitude is not above the start's.
    terminus: T,
    orbit: OrbitSequence,
    path_factors: u32,
    class_factors: u32,
    next_factors: u32,
    class_len: usize,
    errors: ErrorSet,
    params: CollatzParams,
    block_limit: Option<usize>,
}

impl<T: CollatzInt> Path<T> {
    /// Analyse `start`, with the class length derived from its magnitude.
    pub fn new(start: T, params: &CollatzParams) -> Self {
        let mut path = Self::blank(start.clone(), params, None);
        path.set(start);
        path
    }

    /// Analyse `start` with an explicit class length.
    ///
    /// In speed mode `class_len` also bounds the path factors: once the
    /// running total exceeds it the orbit is left incomplete.
    pub fn with_class_len(start: T, class_len: usize, params: &CollatzParams) -> Self {
        let mut path = Self::blank(start.clone(), params, None);
        let bound = u32::try_from(class_len).unwrap_or(u32::MAX);
        path.setpath(start, Some(bound));
        path.class_len = class_len;
        path
    }

    /// Analyse the start encoded by an equivalence-class string.
    ///
    /// ```
    /// use collatz_orbits::{CollatzParams, Path};
    ///
    /// let path = Path::<i64>::from_class("+11", &CollatzParams::default()).unwrap();
    /// assert_eq!(*path.start(), 7);
    /// assert_eq!(path.class_length(), 2);
    /// ```
    pub fn from_class(input: &str, params: &CollatzParams) -> Result<Self, PathError> {
        let start: T = parse_class(input, params)?;
        let mut path = Self::blank(start.clone(), params, None);
        path.setpath(start, None);
        path.class_len = class_digits(input);
        Ok(path)
    }

    /// Analyse `start` storing at most `blocks` orbit blocks. A longer orbit
    /// is truncated and `errors()` reports `OutOfMemory`; the factor counts
    /// still cover the whole path. The budget survives [`Path::set`].
    pub fn with_block_limit(start: T, blocks: usize, params: &CollatzParams) -> Self {
        let mut path = Self::blank(start.clone(), params, Some(blocks));
        path.set(start);
        path
    }

    fn blank(start: T, params: &CollatzParams, block_limit: Option<usize>) -> Self {
        Self {
            sign: start.sgn(),
            peak: start.clone(),
            terminus: start.clone(),
            start,
            orbit: block_limit.map_or_else(OrbitSequence::new, OrbitSequence::with_block_limit),
            path_factors: 0,
            class_factors: 0,
            next_factors: 0,
            class_len: 0,
            errors: ErrorSet::empty(),
            params: *params,
            block_limit,
        }
    }

    /// Rebuild everything from a new starting value.
    pub fn set(&mut self, start: T) {
        self.class_len = class_length_of(&start, &self.params);
        self.setpath(start, None);
    }

    /// Recompute the orbit and factor counts for `start`.
    ///
    /// `max_factors` only matters in speed mode, where the computation stops
    /// as soon as the path factors exceed it. The class length is left as is.
    pub fn setpath(&mut self, start: T, max_factors: Option<u32>) {
        let (class_len, params, block_limit) = (self.class_len, self.params, self.block_limit);
        *self = Self::blank(start, &params, block_limit);
        self.class_len = class_len;

        let steps = Coefficients::new(&self.params);
        let start = self.start.clone();
        let bound = start.abs_value();
        let mut current = start.clone();

        if steps.divides(&start) {
            self.record(1);
            self.path_factors = 1;
            self.terminus = steps.divide(&start);
        } else {
            self.record(0);
            loop {
                let last = current.clone();
                match steps.connection(&current) {
                    Ok(next) if next.sgn() == self.sign => current = next,
                    Ok(next) => {
                        tracing::warn!(start = %start, from = %last, to = %next, "sign flipped during connection");
                        self.errors.insert(ErrorKind::Overflow);
                        current = last;
                        break;
                    }
                    Err(err) => {
                        tracing::warn!(start = %start, from = %last, error = %err, "connection overflowed");
                        self.errors.insert(ErrorKind::Overflow);
                        current = last;
                        break;
                    }
                }

                if current.abs_value() > self.peak.abs_value() {
                    self.peak = current.clone();
                }

                let leg = steps.reduce_below(&mut current, &bound);
                self.path_factors += leg;

                if self.params.speed() && max_factors.is_some_and(|max| self.path_factors > max) {
                    self.terminus = current;
                    return;
                }

                self.record(leg);

                if current.abs_value() <= bound {
                    break;
                }
            }
            self.terminus = current.clone();
        }

        self.class_factors = self.path_factors;
        if current.is_zero() {
            return;
        }

        self.class_factors += steps.reduce_all(&mut current);

        let mut base = start;
        steps.reduce_all(&mut base);
        match steps.connection(&base) {
            Ok(mut next) => self.next_factors = steps.reduce_all(&mut next),
            Err(err) => {
                tracing::warn!(start = %self.start, error = %err, "next connection overflowed");
                self.errors.insert(ErrorKind::Overflow);
            }
        }
    }

    fn record(&mut self, leg: u32) {
        if let Err(err) = self.orbit.append(leg) {
            if !matches!(err, PathError::Truncated { .. }) {
                tracing::warn!(start = %self.start, error = %err, "orbit truncated");
            }
        }
    }

    /// The starting value.
    pub fn start(&self) -> &T {
        &self.start
    }

    /// Sign of the start.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Value of largest magnitude visited.
    pub fn peak(&self) -> &T {
        &self.peak
    }

    /// Where the orbit stopped: the local terminus for a complete orbit.
    pub fn terminus(&self) -> &T {
        &self.terminus
    }

    /// Divisor factors removed after each connection.
    pub fn orbit(&self) -> &OrbitSequence {
        &self.orbit
    }

    /// Map parameters the path was built with.
    pub fn params(&self) -> &CollatzParams {
        &self.params
    }

    /// Sticky failures from the path and its orbit.
    pub fn errors(&self) -> ErrorSet {
        self.errors.union(self.orbit.errors())
    }

    /// Number of legs in the orbit.
    pub fn path_length(&self) -> usize {
        self.orbit.len()
    }

    /// Digits in the class string.
    pub fn class_length(&self) -> usize {
        self.class_len
    }

    /// Divisor factors removed along the orbit.
    pub fn path_factors(&self) -> u32 {
        self.path_factors
    }

    /// Path factors plus the factors left in the terminus.
    pub fn class_factors(&self) -> u32 {
        self.class_factors
    }

    /// Divisor factors produced by one more connection of the reduced start.
    pub fn next_factors(&self) -> u32 {
        self.next_factors
    }

    /// Keep only the orbit.
    pub fn into_orbit(self) -> OrbitSequence {
        self.orbit
    }

    /// The orbit as space separated legs.
    pub fn path_string(&self) -> String {
        self.orbit.to_string()
    }
}

/// Paths compare by their orbits.
impl<T> PartialEq for Path<T> {
    fn eq(&self, other: &Self) -> bool {
        self.orbit == other.orbit
    }
}

impl<T> Eq for Path<T> {}

impl<T> Ord for Path<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.orbit.cmp(&other.orbit)
    }
}

impl<T> PartialOrd for Path<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
