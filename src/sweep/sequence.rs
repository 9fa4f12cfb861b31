// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Convergence sequences.
//!
//! A convergence sequence lists every value from a start down to the first
//! one of smaller magnitude, each with its class digits. Each connection
//! from an odd value uses up `next_factors` of those digits. A single factor
//! is a divergent step and indents the class by one more column; more
//! factors converge and pull it back. For 7 under the canonical map:
//!
//! ```text
//!  7: (05,3*2^007): +1100000
//! 22: (01,3*2^006):  +411000
//! 11: (04,3*2^006):  +510000
//! 34: (01,3*2^005):   +41010
//! 17: (02,3*2^005):   +50100
//! 52: (01,3*2^003):  +400
//! 26: (01,3*2^003):  +200
//! 13: (02,3*2^003):  +101
//! 40: (01,3*2^000):
//! 20: (01,3*2^000):
//! 10: (01,3*2^000):
//!  5: (02,3*2^000):
//! ```

use crate::arith::CollatzInt;
use crate::error::{ErrorKind, ErrorSet};
use crate::path::step::Coefficients;
use crate::path::Path;

/// One value of a sequence with the class digits still attributed to it.
#[derive(Debug, Clone)]
pub struct SequenceStep<T> {
    pub path: Path<T>,
    pub digits: usize,
    pub indent: usize,
}

impl<T: CollatzInt> SequenceStep<T> {
    /// The step's line, with the start right justified to `width`.
    pub fn report(&self, width: usize) -> String {
        self.path.report(self.digits, self.indent, width)
    }
}

/// The values from a start down to its local terminus.
#[derive(Debug, Clone)]
pub struct ConvergenceSequence<T> {
    start: T,
    width: usize,
    steps: Vec<SequenceStep<T>>,
    end: T,
    errors: ErrorSet,
}

impl<T: CollatzInt> ConvergenceSequence<T> {
    /// The value the sequence was built for.
    pub fn start(&self) -> &T {
        &self.start
    }

    /// Every value visited, the start first.
    pub fn steps(&self) -> &[SequenceStep<T>] {
        &self.steps
    }

    /// Where the sequence stopped: the first value below the start in
    /// magnitude, or the value reached when the factor budget ran out.
    pub fn end(&self) -> &T {
        &self.end
    }

    /// Column width of the starts, taken from the peak of the start's path.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Set when a connection did not fit the representation.
    pub fn errors(&self) -> ErrorSet {
        self.errors
    }

    /// One report line per step.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.steps.iter().map(move |step| step.report(self.width))
    }
}

/// Follow `path` from its start, beginning with `digits` class digits and
/// stopping below the start's magnitude or once more than `path_len`
/// factors have been used.
pub fn sequence<T: CollatzInt>(path: &Path<T>, path_len: i64, digits: i64) -> ConvergenceSequence<T> {
    let params = path.params();
    let coefficients = Coefficients::<T>::new(params);
    let start = path.start().clone();
    let bound = start.abs_value();
    let peak = path.peak();
    let width = peak.decimal_digits() + usize::from(peak.is_negative());

    let mut remaining = path_len;
    let mut digits = digits.max(0);
    let mut indent = 1usize;
    let mut current = start.clone();
    let mut steps = Vec::new();
    let mut errors = ErrorSet::empty();

    while remaining >= 0 {
        let shown = usize::try_from(digits).unwrap_or(0);
        let flow = Path::with_class_len(current.clone(), shown, params);
        let divergent_step = !coefficients.divides(&current);
        let facts = flow.next_factors();
        let next = flow.next();
        steps.push(SequenceStep {
            path: flow,
            digits: shown,
            indent,
        });

        if current.abs_value() < bound {
            break;
        }

        let next = match next {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(start = %start, at = %current, error = %err, "convergence sequence overflowed");
                errors.insert(ErrorKind::Overflow);
                break;
            }
        };
        if next.is_zero() {
            current = next;
            break;
        }

        if divergent_step {
            let used = facts as usize;
            indent = match used {
                1 => indent + 1,
                _ if used >= indent => 1,
                _ => indent + 1 - used,
            };
            digits -= i64::from(facts);
            remaining -= i64::from(facts.max(1));
        }
        current = next;
    }

    tracing::debug!(start = %start, end = %current, steps = steps.len(), "convergence sequence");
    ConvergenceSequence {
        start,
        width,
        steps,
        end: current,
        errors,
    }
}

/// Sequence whose class digits start at the path factors.
pub fn sequence_by_path<T: CollatzInt>(path: &Path<T>) -> ConvergenceSequence<T> {
    sequence(
        path,
        i64::from(path.class_factors()),
        i64::from(path.path_factors()),
    )
}

/// Sequence whose class digits start at the class length.
pub fn sequence_by_class<T: CollatzInt>(path: &Path<T>) -> ConvergenceSequence<T> {
    sequence(
        path,
        i64::from(path.class_factors()),
        i64::try_from(path.class_length()).unwrap_or(i64::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollatzParams;

    fn path(start: i64) -> Path<i64> {
        Path::new(start, &CollatzParams::default())
    }

    #[test]
    fn test_sequence_of_7() {
        let seq = sequence_by_path(&path(7));
        let lines: Vec<String> = seq.lines().collect();
        assert_eq!(
            lines,
            [
                " 7: (05,3*2^007): +1100000",
                "22: (01,3*2^006):  +411000",
                "11: (04,3*2^006):  +510000",
                "34: (01,3*2^005):   +41010",
                "17: (02,3*2^005):   +50100",
                "52: (01,3*2^003):  +400",
                "26: (01,3*2^003):  +200",
                "13: (02,3*2^003):  +101",
                "40: (01,3*2^000): ",
                "20: (01,3*2^000): ",
                "10: (01,3*2^000): ",
                " 5: (02,3*2^000): ",
            ]
        );
        assert_eq!(*seq.end(), 5);
        assert_eq!(seq.width(), 2);
        assert!(seq.errors().is_empty());
    }

    #[test]
    fn test_indent_follows_next_factors() {
        let seq = sequence_by_path(&path(7));
        let indents: Vec<usize> = seq.steps().iter().map(|s| s.indent).collect();
        assert_eq!(indents, [1, 2, 2, 3, 3, 2, 2, 2, 1, 1, 1, 1]);
        let digits: Vec<usize> = seq.steps().iter().map(|s| s.digits).collect();
        assert_eq!(digits, [7, 6, 6, 5, 5, 3, 3, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_sequence_by_class() {
        let seq = sequence_by_class(&path(7));
        assert_eq!(seq.steps().len(), 12);
        assert_eq!(seq.lines().next().as_deref(), Some(" 7: (05,3*2^002): +11"));
        assert_eq!(seq.steps()[1].digits, 1);
        assert_eq!(seq.steps()[3].digits, 0);
        assert_eq!(*seq.end(), 5);
    }

    #[test]
    fn test_even_start() {
        let seq = sequence_by_path(&path(10));
        let values: Vec<i64> = seq.steps().iter().map(|s| *s.path.start()).collect();
        assert_eq!(values, [10, 5]);
        assert_eq!(*seq.end(), 5);
    }

    #[test]
    fn test_negative_loop_runs_out_of_factors() {
        // -5 -> -14 -> -7 -> -20 -> -10 -> -5 never drops below 5.
        let seq = sequence_by_path(&path(-5));
        let values: Vec<i64> = seq.steps().iter().map(|s| *s.path.start()).collect();
        assert_eq!(values, [-5, -14, -7, -20, -10, -5]);
        assert_eq!(*seq.end(), -14);
        assert_eq!(seq.width(), 3);
    }

    #[test]
    fn test_zero() {
        let seq = sequence_by_path(&path(0));
        assert_eq!(seq.steps().len(), 1);
        assert_eq!(*seq.end(), 0);
    }

    #[test]
    fn test_overflow_stops_sequence() {
        let seq = sequence_by_path(&path(3_074_457_345_618_258_605));
        assert_eq!(seq.steps().len(), 1);
        assert!(seq.errors().contains(ErrorKind::Overflow));
    }
}
