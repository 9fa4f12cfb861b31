// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use collatz_orbits::{CollatzInt, CollatzParams, OrbitSequence, Path};

/// The 3n+1 map.
pub fn canonical() -> CollatzParams {
    CollatzParams::default()
}

pub fn path<T: CollatzInt>(start: T) -> Path<T> {
    Path::new(start, &canonical())
}

/// Legs of an orbit as plain integers.
pub fn legs(orbit: &OrbitSequence) -> Vec<u32> {
    orbit.legs().map(u32::from).collect()
}

/// An odd start whose first connection overflows `i64` while `3n+1` is
/// divisible by four.
pub const I64_OVERFLOW_START: i64 = 3_074_457_345_618_258_605;
