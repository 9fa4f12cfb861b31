// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batch computations over ranges of starting values.
//!
//! Every sweep builds [`Path`]s for the values of a [`SweepRange`] and counts
//! some property of each in a [`FrequencyTree`]. Paths are independent of one
//! another, so the `par_` variants split the range across rayon workers,
//! fold a private tree per worker and merge the trees at the end. Both
//! variants produce the same histogram.
//!
//! The [`sequence`](mod@sequence) and [`chain`](mod@chain) modules follow a
//! single start instead of a range.
//!
//! Progress is reported with `tracing::debug!` events every
//! [`BLIP_INTERVAL`] values and each path is rendered at `trace` level.

pub mod chain;
pub mod convergent;
pub mod sequence;

pub use chain::{terminal_chain, TerminalChain};
pub use convergent::{convergent_classes, convergent_paths, ClassSummary, LengthRow, PathSummary};
pub use sequence::{sequence, sequence_by_class, sequence_by_path, ConvergenceSequence, SequenceStep};

use crate::arith::CollatzInt;
use crate::config::CollatzParams;
use crate::orbit::OrbitSequence;
use crate::path::Path;
use crate::tree::FrequencyTree;
use rayon::prelude::*;
use thiserror::Error;

/// Values between two progress events.
pub const BLIP_INTERVAL: u64 = 3 << 14;

/// Failures setting up a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("a sweep over {digits} digits does not fit in 64 bits")]
    RangeOverflow { digits: u32 },

    #[error("starting value {value} does not fit the chosen integer type")]
    Unrepresentable { value: u64 },
}

/// Number of values covered by `digits` class digits:
/// `multiplier * divisor^digits`, or 0 for no digits.
///
/// ```
/// use collatz_orbits::{sweep::find_range, CollatzParams};
///
/// let params = CollatzParams::default();
/// assert_eq!(find_range(0, &params), Ok(0));
/// assert_eq!(find_range(4, &params), Ok(48));
/// ```
pub fn find_range(digits: u32, params: &CollatzParams) -> Result<u64, SweepError> {
    if digits == 0 {
        return Ok(0);
    }
    let overflow = SweepError::RangeOverflow { digits };
    let divisor = u64::try_from(params.divisor()).map_err(|_| overflow.clone())?;
    let multiplier = u64::try_from(params.multiplier()).map_err(|_| overflow.clone())?;
    divisor
        .checked_pow(digits)
        .and_then(|power| power.checked_mul(multiplier))
        .ok_or(overflow)
}

/// Starting values `first, first + step, ...` up to `last`, optionally
/// negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    first: u64,
    last: u64,
    step: u64,
    negative: bool,
}

impl SweepRange {
    /// Magnitudes `first, first + step, ..` up to `last`.
    pub fn new(first: u64, last: u64, step: u64) -> Self {
        Self {
            first,
            last,
            step: step.max(1),
            negative: false,
        }
    }

    /// `1..=last`.
    pub fn up_to(last: u64) -> Self {
        Self::new(1, last, 1)
    }

    /// `1..=find_range(|exponent|)`, negated for a negative exponent.
    pub fn exponent(exponent: i32, params: &CollatzParams) -> Result<Self, SweepError> {
        let range = find_range(exponent.unsigned_abs(), params)?;
        Ok(Self::up_to(range).negated(exponent < 0))
    }

    /// The same magnitudes, negative when `negative` is set.
    pub fn negated(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// True when the values are negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of values in the range.
    pub fn len(&self) -> u64 {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) / self.step + 1
        }
    }

    /// True when the range has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest magnitude in the range.
    pub fn last(&self) -> u64 {
        self.last
    }

    /// The `index`th value, converted to `T`.
    pub fn value<T: CollatzInt>(&self, index: u64) -> Result<T, SweepError> {
        let magnitude = self.first + index * self.step;
        let value =
            T::from_u64(magnitude).ok_or(SweepError::Unrepresentable { value: magnitude })?;
        Ok(if self.negative { -value } else { value })
    }

    /// Fail early when the largest magnitude does not fit `T`; every other
    /// value is then representable too.
    pub fn check<T: CollatzInt>(&self) -> Result<(), SweepError> {
        match self.len() {
            0 => Ok(()),
            len => self.value::<T>(len - 1).map(|_| ()),
        }
    }

    /// Every value in order, converted to `T`.
    pub fn values<T: CollatzInt>(&self) -> impl Iterator<Item = Result<T, SweepError>> + '_ {
        (0..self.len()).map(move |index| self.value(index))
    }

    /// Column width for the largest value, sign included.
    pub fn width(&self) -> usize {
        self.last.to_string().len() + usize::from(self.negative)
    }
}

pub(crate) fn blip(index: u64, range: &SweepRange) {
    if index > 0 && index % BLIP_INTERVAL == 0 {
        let done = index as f64 * 100.0 / range.len() as f64;
        tracing::debug!(index, total = range.len(), "sweep {:.3}% done", done);
    }
}

/// Count `key(start)` over every start in `range`.
pub fn histogram<T, K, F>(range: &SweepRange, mut key: F) -> Result<FrequencyTree<K>, SweepError>
where
    T: CollatzInt,
    K: Ord,
    F: FnMut(T) -> K,
{
    range.check::<T>()?;
    let mut tree = FrequencyTree::new();
    for index in 0..range.len() {
        blip(index, range);
        tree.insert(key(range.value(index)?));
    }
    Ok(tree)
}

/// [`histogram`] on the rayon pool.
pub fn par_histogram<T, K, F>(range: &SweepRange, key: F) -> Result<FrequencyTree<K>, SweepError>
where
    T: CollatzInt,
    K: Ord + Send,
    F: Fn(T) -> K + Sync + Send,
{
    range.check::<T>()?;
    (0..range.len())
        .into_par_iter()
        .try_fold(
            FrequencyTree::new,
            |mut tree, index| -> Result<FrequencyTree<K>, SweepError> {
                blip(index, range);
                tree.insert(key(range.value(index)?));
                Ok(tree)
            },
        )
        .try_reduce(FrequencyTree::new, |mut merged, tree| {
            merged.merge(tree);
            Ok(merged)
        })
}

fn path_length<T: CollatzInt>(start: T, params: &CollatzParams, width: usize) -> usize {
    let path = Path::new(start, params);
    tracing::trace!("{}", path.report_path(width));
    path.path_length()
}

fn orbit<T: CollatzInt>(start: T, params: &CollatzParams, width: usize) -> OrbitSequence {
    let path = Path::new(start, params);
    tracing::trace!("{}", path.report_path(width));
    path.into_orbit()
}

/// Histogram of path lengths over `1..=find_range(|exponent|)`; a negative
/// exponent sweeps the negated values.
pub fn dist_legs<T: CollatzInt>(
    exponent: i32,
    params: &CollatzParams,
) -> Result<FrequencyTree<usize>, SweepError> {
    let range = SweepRange::exponent(exponent, params)?;
    let width = range.width();
    histogram(&range, |start: T| path_length(start, params, width))
}

/// [`dist_legs`] on the rayon pool.
pub fn par_dist_legs<T: CollatzInt>(
    exponent: i32,
    params: &CollatzParams,
) -> Result<FrequencyTree<usize>, SweepError> {
    let range = SweepRange::exponent(exponent, params)?;
    let width = range.width();
    par_histogram(&range, |start: T| path_length(start, params, width))
}

/// Histogram of path lengths like [`dist_legs`], handing every path to
/// `each` on the way so its class can be listed.
pub fn dist_eq<T, F>(
    exponent: i32,
    params: &CollatzParams,
    mut each: F,
) -> Result<FrequencyTree<usize>, SweepError>
where
    T: CollatzInt,
    F: FnMut(&Path<T>),
{
    let range = SweepRange::exponent(exponent, params)?;
    histogram(&range, |start: T| {
        let path = Path::new(start, params);
        each(&path);
        path.path_length()
    })
}

/// Histogram of orbits over the same range as [`dist_legs`].
pub fn dist_path<T: CollatzInt>(
    exponent: i32,
    params: &CollatzParams,
) -> Result<FrequencyTree<OrbitSequence>, SweepError> {
    let range = SweepRange::exponent(exponent, params)?;
    let width = range.width();
    histogram(&range, |start: T| orbit(start, params, width))
}

/// [`dist_path`] on the rayon pool.
pub fn par_dist_path<T: CollatzInt>(
    exponent: i32,
    params: &CollatzParams,
) -> Result<FrequencyTree<OrbitSequence>, SweepError> {
    let range = SweepRange::exponent(exponent, params)?;
    let width = range.width();
    par_histogram(&range, |start: T| orbit(start, params, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_range() {
        let params = CollatzParams::default();
        assert_eq!(find_range(1, &params), Ok(6));
        assert_eq!(find_range(10, &params), Ok(3072));
        assert_eq!(find_range(62, &params), Ok(3 << 62));
        assert_eq!(
            find_range(63, &params),
            Err(SweepError::RangeOverflow { digits: 63 })
        );
    }

    #[test]
    fn test_range_values() {
        let range = SweepRange::new(3, 20, 4);
        assert_eq!(range.len(), 5);
        let values: Vec<i64> = range.values().collect::<Result<_, _>>().unwrap();
        assert_eq!(values, vec![3, 7, 11, 15, 19]);

        let negative = SweepRange::up_to(3).negated(true);
        let values: Vec<i32> = negative.values().collect::<Result<_, _>>().unwrap();
        assert_eq!(values, vec![-1, -2, -3]);
        assert_eq!(negative.width(), 2);

        assert!(SweepRange::new(5, 4, 1).is_empty());
    }

    #[test]
    fn test_unrepresentable() {
        let range = SweepRange::new(i32::MAX as u64, i32::MAX as u64 + 1, 1);
        assert!(range.value::<i32>(0).is_ok());
        assert_eq!(
            range.value::<i32>(1),
            Err(SweepError::Unrepresentable {
                value: i32::MAX as u64 + 1
            })
        );
        assert!(range.value::<i64>(1).is_ok());
        assert!(range.check::<i32>().is_err());
        assert!(range.check::<i64>().is_ok());
    }

    #[test]
    fn test_dist_legs_small() {
        let params = CollatzParams::default();
        // 1..=6: 1 "0 2", 2 "1", 3 "0 1 3", 4 "1", 5 "0 2", 6 "1"
        let tree = dist_legs::<i64>(1, &params).unwrap();
        let counts: Vec<(usize, u64)> = tree.iter().map(|(k, c)| (*k, c)).collect();
        assert_eq!(counts, vec![(1, 3), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_dist_eq_lists_every_class() {
        let params = CollatzParams::default();
        let mut classes = Vec::new();
        let tree = dist_eq::<i64, _>(1, &params, |path| {
            classes.push(path.flow(path.path_factors() as usize))
        })
        .unwrap();
        let legs = dist_legs::<i64>(1, &params).unwrap();
        assert!(tree.iter().eq(legs.iter()));
        assert_eq!(classes, ["+10", "+2", "+3000", "+4", "+50", "+0"]);
    }

    #[test]
    fn test_par_matches_sequential() {
        let params = CollatzParams::default();
        let seq = dist_path::<i64>(8, &params).unwrap();
        let par = par_dist_path::<i64>(8, &params).unwrap();
        assert_eq!(
            seq.iter().collect::<Vec<_>>(),
            par.iter().collect::<Vec<_>>()
        );
        assert_eq!(par.total(), 768);
    }
}
