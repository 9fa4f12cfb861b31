// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for orbit and path computation.
//!
//! Two styles coexist:
//!
//! - [`PathError`] is returned by operations that can fail outright (parsing a
//!   class string, ancestor search, a single append).
//! - [`ErrorSet`] is the sticky record kept by a [`crate::Path`] or
//!   [`crate::OrbitSequence`] whose construction ran into trouble part way.
//!   The computed prefix is kept and the caller inspects `errors()`.

use crate::arith::OverflowError;
use std::fmt;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;
use thiserror::Error;

/// Conditions that can truncate an orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCountMacro)]
#[repr(u8)]
pub enum ErrorKind {
    /// The numeric representation could not hold an intermediate value.
    Overflow,
    /// No further orbit block could be allocated.
    OutOfMemory,
}

impl ErrorKind {
    const ALL: [ErrorKind; ErrorKind::COUNT] = [ErrorKind::Overflow, ErrorKind::OutOfMemory];

    /// Bit used for this kind in [`ErrorSet::bits`].
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Short name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Overflow => "overflow",
            ErrorKind::OutOfMemory => "out of memory",
        }
    }
}

/// A sticky set of [`ErrorKind`]s, stored as a bitmask.
///
/// Overflow is bit 0 (value 1) and OutOfMemory is bit 1 (value 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ErrorSet(u8);

impl ErrorSet {
    /// No failures.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Record `kind`.
    pub fn insert(&mut self, kind: ErrorKind) {
        self.0 |= kind.bit();
    }

    /// True when `kind` has been recorded.
    pub fn contains(self, kind: ErrorKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// True when nothing has been recorded.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Failures recorded in either set.
    pub fn union(self, other: ErrorSet) -> ErrorSet {
        ErrorSet(self.0 | other.0)
    }

    /// Raw bitset, one bit per kind.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Kinds present in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ErrorKind> {
        ErrorKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl From<ErrorKind> for ErrorSet {
    fn from(kind: ErrorKind) -> Self {
        let mut set = ErrorSet::empty();
        set.insert(kind);
        set
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind.name())?;
        }
        Ok(())
    }
}

/// Errors raised by orbit and path operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error("orbit storage exhausted after {legs} legs")]
    OutOfMemory { legs: usize },

    #[error("leg of {leg} divisor factors does not fit in an orbit slot")]
    LegTooLarge { leg: u32 },

    #[error("orbit is no longer recording after an earlier failure ({errors})")]
    Truncated { errors: ErrorSet },

    #[error("invalid equivalence class {input:?}: {reason} at position {position}")]
    Parse {
        input: String,
        /// Byte offset of the offending character in `input`.
        position: usize,
        reason: ParseFailure,
    },

    #[error("no ancestor of {start} found after {tried} scales (stopped at scale {scale})")]
    AncestryExhausted {
        start: String,
        scale: String,
        tried: u64,
    },
}

impl PathError {
    /// The sticky flag this error leaves behind, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PathError::Overflow(_) | PathError::LegTooLarge { .. } => Some(ErrorKind::Overflow),
            PathError::OutOfMemory { .. } => Some(ErrorKind::OutOfMemory),
            _ => None,
        }
    }
}

/// Why an equivalence-class string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no digits")]
    Empty,
    #[error("leading digit {0:?} is not a residue of divisor * multiplier")]
    LeadingDigit(char),
    #[error("trailing digits must be 0 or 1, found {0:?}")]
    TrailingDigit(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_set_bits() {
        let mut set = ErrorSet::empty();
        assert!(set.is_empty());
        set.insert(ErrorKind::Overflow);
        assert_eq!(set.bits(), 0x1);
        set.insert(ErrorKind::OutOfMemory);
        assert_eq!(set.bits(), 0x3);
        set.insert(ErrorKind::Overflow);
        assert_eq!(set.bits(), 0x3);
    }

    #[test]
    fn test_error_set_union_and_display() {
        let a = ErrorSet::from(ErrorKind::OutOfMemory);
        let b = ErrorSet::from(ErrorKind::Overflow);
        assert_eq!(a.to_string(), "out of memory");
        assert_eq!(a.union(b).to_string(), "overflow, out of memory");
        assert_eq!(ErrorSet::empty().to_string(), "none");
    }

    #[test]
    fn test_kind_of_error() {
        assert_eq!(
            PathError::OutOfMemory { legs: 8 }.kind(),
            Some(ErrorKind::OutOfMemory)
        );
        assert_eq!(PathError::LegTooLarge { leg: 300 }.kind(), Some(ErrorKind::Overflow));
        let parse = PathError::Parse {
            input: "7".into(),
            position: 0,
            reason: ParseFailure::LeadingDigit('7'),
        };
        assert_eq!(parse.kind(), None);
        assert_eq!(
            parse.to_string(),
            "invalid equivalence class \"7\": leading digit '7' is not a residue of divisor * multiplier at position 0"
        );
    }
}
