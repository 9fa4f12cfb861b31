// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixed-capacity block of eight orbit legs.
//!
//! A block stores its legs in an `[u8; 8]` arranged so that reading the array
//! as a native-endian `u64` yields the legs packed most-significant first in
//! append order. Comparing two block keys as integers is then the same as
//! comparing their legs lexicographically.
//!
//! ```
//! use collatz_orbits::orbit::OrbitBlock;
//!
//! let mut block = OrbitBlock::empty();
//! block.set(0, 0x01);
//! block.set(1, 0x02);
//! assert_eq!(block.key(), 0x0102_0000_0000_0000);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Number of legs held by one block.
pub const BLOCK_LEGS: usize = std::mem::size_of::<u64>();

/// Physical byte holding logical slot `logical` (0 is the first leg appended).
///
/// Resolved at compile time from the target's byte order.
pub const fn slot_index(logical: usize) -> usize {
    if cfg!(target_endian = "little") {
        BLOCK_LEGS - 1 - logical
    } else {
        logical
    }
}

/// Eight legs packed into one word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OrbitBlock {
    bytes: [u8; BLOCK_LEGS],
}

impl OrbitBlock {
    /// A block with every slot zero.
    pub const fn empty() -> Self {
        Self {
            bytes: [0; BLOCK_LEGS],
        }
    }

    /// Rebuild a block from its integer key.
    pub const fn from_key(key: u64) -> Self {
        Self {
            bytes: key.to_ne_bytes(),
        }
    }

    /// The block as a single comparable integer.
    pub const fn key(&self) -> u64 {
        u64::from_ne_bytes(self.bytes)
    }

    /// Leg stored in logical slot `logical`.
    ///
    /// # Panics
    ///
    /// Panics if `logical >= BLOCK_LEGS`.
    pub fn get(&self, logical: usize) -> u8 {
        self.bytes[slot_index(logical)]
    }

    /// Store `leg` in slot `logical`.
    pub fn set(&mut self, logical: usize, leg: u8) {
        self.bytes[slot_index(logical)] = leg;
    }

    /// Legs in append order, including unused (zero) slots.
    pub fn legs(&self) -> [u8; BLOCK_LEGS] {
        std::array::from_fn(|logical| self.get(logical))
    }
}

impl Ord for OrbitBlock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for OrbitBlock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for OrbitBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrbitBlock({:#018x})", self.key())
    }
}
