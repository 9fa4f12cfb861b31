// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Chains of local termini.
//!
//! Starting from some value, repeatedly replace it by the local terminus of
//! its path while that keeps shrinking the magnitude. For positive starts
//! under the canonical map the chain ends at the global terminus 1; other
//! maps and negative starts can end in a different loop.

use crate::arith::CollatzInt;
use crate::config::CollatzParams;
use crate::error::ErrorSet;
use crate::path::Path;

/// Successive local termini from a start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalChain<T> {
    links: Vec<T>,
    global: bool,
    errors: ErrorSet,
}

impl<T> TerminalChain<T> {
    /// The start followed by each successive local terminus.
    pub fn links(&self) -> &[T] {
        &self.links
    }

    /// The final link.
    pub fn last(&self) -> Option<&T> {
        self.links.last()
    }

    /// True when the chain ended at magnitude 1.
    pub fn reached_global(&self) -> bool {
        self.global
    }

    /// Errors from the path that stopped the chain, if any.
    pub fn errors(&self) -> ErrorSet {
        self.errors
    }
}

/// Follow local termini from `start` until the magnitude stops decreasing.
///
/// ```
/// use collatz_orbits::{sweep::terminal_chain, CollatzParams};
///
/// let chain = terminal_chain(7i64, &CollatzParams::default());
/// assert_eq!(chain.links(), &[7, 5, 4, 2, 1]);
/// assert!(chain.reached_global());
/// ```
pub fn terminal_chain<T: CollatzInt>(start: T, params: &CollatzParams) -> TerminalChain<T> {
    let mut links = vec![start.clone()];
    let mut errors = ErrorSet::empty();
    let mut current = start;

    loop {
        let path = Path::new(current.clone(), params);
        if !path.errors().is_empty() {
            errors = path.errors();
            tracing::warn!(start = %current, %errors, "terminal chain stopped by path error");
            break;
        }
        let next = path.terminus().clone();
        if next.abs_value() >= current.abs_value() {
            break;
        }
        links.push(next.clone());
        current = next;
    }

    let global = errors.is_empty() && current.abs_value() == T::one();
    if !global {
        tracing::debug!(last = %current, "terminal chain ended away from the global terminus");
    }
    TerminalChain {
        links,
        global,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use num_bigint::BigInt;

    #[test]
    fn test_chain_of_27() {
        let chain = terminal_chain(27i64, &CollatzParams::default());
        assert!(chain.reached_global());
        assert_eq!(chain.links().first(), Some(&27));
        assert_eq!(chain.last(), Some(&1));
        assert!(chain.links().windows(2).all(|w| w[1].abs() < w[0].abs()));
    }

    #[test]
    fn test_negative_loop() {
        let chain = terminal_chain(-5i64, &CollatzParams::default());
        assert_eq!(chain.links(), &[-5]);
        assert!(!chain.reached_global());
        assert!(chain.errors().is_empty());
    }

    #[test]
    fn test_negative_17_cycle() {
        // -17 -> -50 -> -25 -> -74 -> -37 -> -110 -> -55 -> -164 -> -82
        //     -> -41 -> -122 -> -61 -> -182 -> -91 -> -272 -> ... -> -17
        let chain = terminal_chain(-17i64, &CollatzParams::default());
        assert_eq!(chain.last(), Some(&-17));
        assert!(!chain.reached_global());
    }

    #[test]
    fn test_overflow_stops_chain() {
        let chain = terminal_chain(3_074_457_345_618_258_605i64, &CollatzParams::default());
        assert_eq!(chain.links().len(), 1);
        assert!(chain.errors().contains(ErrorKind::Overflow));
        assert!(!chain.reached_global());

        let big = terminal_chain(BigInt::from(3_074_457_345_618_258_605i64), &CollatzParams::default());
        assert!(big.reached_global());
    }
}
