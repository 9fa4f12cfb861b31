// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compact orbit storage.
//!
//! - OrbitBlock: eight legs packed so the block compares as one `u64`
//! - OrbitSequence: an append-only chain of blocks

pub mod block;
pub mod sequence;

pub use block::{slot_index, OrbitBlock, BLOCK_LEGS};
pub use sequence::OrbitSequence;
