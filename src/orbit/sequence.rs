// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Append-only orbit of leg factor counts.

use crate::error::{ErrorKind, ErrorSet, PathError};
use crate::orbit::block::{OrbitBlock, BLOCK_LEGS};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An orbit: the number of divisor factors removed after each connection.
///
/// The first block lives inline; further blocks are owned exclusively by the
/// sequence and are released by [`OrbitSequence::clear`] or on drop. `Clone`
/// copies the whole chain.
///
/// Ordering compares blocks as integers and falls back to the length when
/// every shared block is equal, so it agrees with lexicographic order of the
/// legs and two sequences are only equal when their lengths match.
///
/// # Examples
///
/// ```
/// use collatz_orbits::orbit::OrbitSequence;
///
/// let orbit = OrbitSequence::from_legs([0, 1, 1, 1, 3, 2]).unwrap();
/// assert_eq!(orbit.len(), 6);
/// assert_eq!(orbit.to_string(), "0 1 1 1 3 2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrbitSequence {
    head: OrbitBlock,
    tail: Vec<OrbitBlock>,
    len: usize,
    errors: ErrorSet,
    /// Upper bound on blocks in the chain; `None` means allocator-limited only.
    block_limit: Option<usize>,
}

impl OrbitSequence {
    /// An empty sequence with no block budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence that refuses to grow beyond `blocks` blocks.
    ///
    /// Growing past the budget behaves exactly like an allocation failure.
    pub fn with_block_limit(blocks: usize) -> Self {
        Self {
            block_limit: Some(blocks.max(1)),
            ..Self::default()
        }
    }

    /// Build a sequence from a list of legs.
    pub fn from_legs<I>(legs: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut orbit = Self::new();
        for leg in legs {
            orbit.append(leg)?;
        }
        Ok(orbit)
    }

    /// Append one leg.
    ///
    /// Fails with `OutOfMemory` when a new block cannot be obtained and with
    /// `LegTooLarge` when the value does not fit in a slot. Either failure is
    /// sticky: the sequence stays truncated and later appends are refused.
    pub fn append(&mut self, leg: u32) -> Result<(), PathError> {
        if !self.errors.is_empty() {
            return Err(PathError::Truncated {
                errors: self.errors,
            });
        }

        let Ok(leg_byte) = u8::try_from(leg) else {
            self.errors.insert(ErrorKind::Overflow);
            return Err(PathError::LegTooLarge { leg });
        };

        let slot = self.len % BLOCK_LEGS;
        if slot == 0 && self.len > 0 {
            self.grow()?;
        }

        self.current_mut().set(slot, leg_byte);
        self.len += 1;
        Ok(())
    }

    fn grow(&mut self) -> Result<(), PathError> {
        let over_budget = self
            .block_limit
            .is_some_and(|limit| self.block_count() >= limit);

        if over_budget || self.tail.try_reserve(1).is_err() {
            self.errors.insert(ErrorKind::OutOfMemory);
            tracing::warn!(legs = self.len, "orbit block allocation failed");
            return Err(PathError::OutOfMemory { legs: self.len });
        }

        self.tail.push(OrbitBlock::empty());
        Ok(())
    }

    fn current_mut(&mut self) -> &mut OrbitBlock {
        self.tail.last_mut().unwrap_or(&mut self.head)
    }

    /// Number of legs appended.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no leg has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of blocks in the chain (never zero).
    pub fn block_count(&self) -> usize {
        1 + self.tail.len()
    }

    /// Sticky failures recorded while appending.
    pub fn errors(&self) -> ErrorSet {
        self.errors
    }

    /// Leg at position `index`, if present.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        let block = match index / BLOCK_LEGS {
            0 => &self.head,
            n => &self.tail[n - 1],
        };
        Some(block.get(index % BLOCK_LEGS))
    }

    /// Blocks in chain order.
    pub fn blocks(&self) -> impl Iterator<Item = &OrbitBlock> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Legs in append order.
    pub fn legs(&self) -> impl Iterator<Item = u8> + '_ {
        self.blocks()
            .flat_map(|block| block.legs())
            .take(self.len)
    }

    /// Sum of all legs.
    pub fn factors(&self) -> u64 {
        self.legs().map(u64::from).sum()
    }

    /// Release every block and return to the empty state.
    ///
    /// The block budget, if any, is kept.
    pub fn clear(&mut self) {
        self.head = OrbitBlock::empty();
        self.tail = Vec::new();
        self.len = 0;
        self.errors = ErrorSet::empty();
    }
}

impl Ord for OrbitSequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.blocks()
            .zip(other.blocks())
            .map(|(a, b)| a.cmp(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.len.cmp(&other.len))
    }
}

impl PartialOrd for OrbitSequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OrbitSequence {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrbitSequence {}

impl Hash for OrbitSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for block in self.blocks() {
            block.key().hash(state);
        }
    }
}

impl fmt::Display for OrbitSequence {
    /// Space separated legs, e.g. `0 1 1 1 3 2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, leg) in self.legs().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", leg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(legs: &[u32]) -> OrbitSequence {
        OrbitSequence::from_legs(legs.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty() {
        let seq = OrbitSequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.block_count(), 1);
        assert_eq!(seq.to_string(), "");
        assert!(seq.errors().is_empty());
    }

    #[test]
    fn test_append_crosses_blocks() {
        let legs: Vec<u32> = (0..20).collect();
        let seq = orbit(&legs);
        assert_eq!(seq.len(), 20);
        assert_eq!(seq.block_count(), 3);
        assert_eq!(seq.get(0), Some(0));
        assert_eq!(seq.get(8), Some(8));
        assert_eq!(seq.get(19), Some(19));
        assert_eq!(seq.get(20), None);
        assert_eq!(seq.legs().map(u32::from).collect::<Vec<_>>(), legs);
    }

    #[test]
    fn test_exactly_full_block_does_not_allocate() {
        let seq = orbit(&[1; BLOCK_LEGS]);
        assert_eq!(seq.block_count(), 1);
        assert_eq!(seq.blocks().next().map(|b| b.key()), Some(0x0101_0101_0101_0101));
    }

    #[test]
    fn test_display() {
        assert_eq!(orbit(&[0, 1, 1, 1, 3, 2]).to_string(), "0 1 1 1 3 2");
        assert_eq!(orbit(&[1]).to_string(), "1");
    }

    #[test]
    fn test_block_budget_behaves_like_out_of_memory() {
        let mut seq = OrbitSequence::with_block_limit(1);
        for leg in 0..BLOCK_LEGS as u32 {
            seq.append(leg).unwrap();
        }

        let err = seq.append(9).unwrap_err();
        assert_eq!(err, PathError::OutOfMemory { legs: BLOCK_LEGS });
        assert!(seq.errors().contains(ErrorKind::OutOfMemory));
        assert_eq!(seq.len(), BLOCK_LEGS);

        // Sticky: nothing more is recorded.
        assert!(matches!(seq.append(1), Err(PathError::Truncated { .. })));
        assert_eq!(seq.len(), BLOCK_LEGS);
    }

    #[test]
    fn test_leg_too_large() {
        let mut seq = orbit(&[0, 2]);
        assert_eq!(seq.append(256), Err(PathError::LegTooLarge { leg: 256 }));
        assert!(seq.errors().contains(ErrorKind::Overflow));
        assert_eq!(seq.len(), 2);
        seq.append(255).unwrap_err();
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut seq = orbit(&(0..30).collect::<Vec<_>>());
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.block_count(), 1);
        assert_eq!(seq, OrbitSequence::new());
        seq.append(4).unwrap();
        assert_eq!(seq.to_string(), "4");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = orbit(&(0..30).collect::<Vec<_>>());
        let mut copy = original.clone();
        copy.append(100).unwrap();
        assert_eq!(original.len(), 30);
        assert_eq!(copy.len(), 31);
        assert_ne!(original, copy);
        assert!(original < copy);
    }

    #[test]
    fn test_ordering_within_block() {
        assert!(orbit(&[0, 1, 1, 1, 3, 2]) < orbit(&[0, 1, 1, 2]));
        assert!(orbit(&[0, 2]) > orbit(&[0, 1, 9, 9]));
        assert_eq!(orbit(&[0, 1, 2]), orbit(&[0, 1, 2]));
    }

    #[test]
    fn test_zero_padding_does_not_make_sequences_equal() {
        // [1, 2] and [1, 2, 0] pack to the same first block key.
        let short = orbit(&[1, 2]);
        let long = orbit(&[1, 2, 0]);
        assert_eq!(
            short.blocks().next().map(|b| b.key()),
            long.blocks().next().map(|b| b.key())
        );
        assert_ne!(short, long);
        assert!(short < long);
    }

    #[test]
    fn test_ordering_across_blocks() {
        let mut base: Vec<u32> = vec![1; BLOCK_LEGS];
        let shorter = orbit(&base);
        base.push(0);
        let longer = orbit(&base);
        assert!(shorter < longer);

        let mut bigger = base.clone();
        bigger[BLOCK_LEGS] = 5;
        assert!(orbit(&bigger) > longer);
    }

    #[test]
    fn test_factors() {
        assert_eq!(orbit(&[0, 1, 1, 1, 3, 2]).factors(), 8);
    }
}
