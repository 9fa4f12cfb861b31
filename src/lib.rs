// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Empirical exploration of Collatz-style orbits.
//!
//! For a starting integer `n` the map sends odd values to
//! `n * multiplier + addend` (a *connection*) and then removes factors of
//! `divisor`. A start *converges* once its magnitude first drops back to (or
//! below) its own; the number of divisor factors removed after each connection
//! on the way there is its *orbit*.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! - [`arith`]: overflow-checked arithmetic and the [`CollatzInt`] trait the
//!   engine is generic over (`i32`, `i64`, `i128`, `num_bigint::BigInt`)
//! - [`orbit`]: [`OrbitSequence`], legs packed eight to a block so that
//!   orbits compare as a handful of `u64`s
//! - [`path`]: [`Path`], the per-start engine: orbit, factor counts,
//!   equivalence-class strings, ancestry and one-line reports
//! - [`tree`]: [`FrequencyTree`], the ordered counting tree histograms use
//! - [`sweep`]: range sweeps, sequential or on the rayon pool, plus
//!   convergence sequences and terminal chains for single starts
//!
//! Map parameters are an explicit [`CollatzParams`] value handed to every
//! computation; nothing is process-wide.
//!
//! # Errors
//!
//! Building a path never fails. Trouble part way through (an intermediate
//! value that does not fit, or orbit storage running out) leaves the computed
//! prefix in place and is recorded in a sticky [`ErrorSet`]. Operations that
//! can fail outright, such as parsing a class string, return [`PathError`].
//!
//! # Example
//!
//! ```
//! use collatz_orbits::{CollatzParams, FrequencyTree, Path};
//!
//! let params = CollatzParams::default();
//! let lengths: FrequencyTree<usize> = (1..=96i64)
//!     .map(|n| Path::new(n, &params).path_length())
//!     .collect();
//! assert_eq!(lengths.search(&1), 48);
//! assert_eq!(lengths.total(), 96);
//! ```

pub mod arith;
pub mod config;
pub mod error;
pub mod orbit;
pub mod path;
pub mod sweep;
pub mod telemetry;
pub mod tree;

// Re-export commonly used types
pub use arith::{CollatzInt, OverflowError, SafeArith, Sign};
pub use config::{CollatzParams, ConfigError};
pub use error::{ErrorKind, ErrorSet, ParseFailure, PathError};
pub use orbit::OrbitSequence;
pub use path::{class_digits, class_length_of, parse_class, Path};
pub use sweep::{SweepError, SweepRange};
pub use tree::{Direction, FrequencyTree};
