// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parameters of the Collatz map.
//!
//! The map sends an odd value `n` to `n * multiplier + addend` and removes
//! factors of `divisor`. The canonical "3n+1" problem is divisor 2,
//! multiplier 3, addend 1, which is what [`CollatzParams::default`] returns.
//!
//! Parameters are an explicit value handed to every path computation rather
//! than process-wide state, so sweeps with different maps can run side by
//! side.
//!
//! # Example
//!
//! ```
//! use collatz_orbits::CollatzParams;
//!
//! let params = CollatzParams::new(2, 5, 1).unwrap().with_speed(true);
//! assert_eq!(params.multiplier(), 5);
//! assert!(params.speed());
//! assert!(CollatzParams::new(1, 3, 1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of scales tried by one ancestor search.
pub const DEFAULT_ANCESTRY_LIMIT: u64 = 1 << 20;

/// Rejected parameter combinations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("divisor must be at least 2, got {0}")]
    DivisorTooSmall(i32),

    #[error("multiplier must be at least 1, got {0}")]
    MultiplierTooSmall(i32),

    #[error("divisor {divisor} times multiplier {multiplier} does not fit in 32 bits")]
    ModulusTooLarge { divisor: i32, multiplier: i32 },

    #[error("ancestry limit must be at least 1")]
    AncestryLimitZero,
}

/// Parameters of the map `n -> n * multiplier + addend`, reduced by `divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ParamsFile")]
pub struct CollatzParams {
    divisor: i32,
    multiplier: i32,
    addend: i32,
    /// Allow path construction to stop once a factor bound is exceeded.
    speed: bool,
    ancestry_limit: u64,
}

impl CollatzParams {
    /// Validated parameters with speed mode off and the default ancestry limit.
    pub fn new(divisor: i32, multiplier: i32, addend: i32) -> Result<Self, ConfigError> {
        if divisor < 2 {
            return Err(ConfigError::DivisorTooSmall(divisor));
        }
        if multiplier < 1 {
            return Err(ConfigError::MultiplierTooSmall(multiplier));
        }
        if divisor.checked_mul(multiplier).is_none() {
            return Err(ConfigError::ModulusTooLarge {
                divisor,
                multiplier,
            });
        }
        Ok(Self {
            divisor,
            multiplier,
            addend,
            speed: false,
            ancestry_limit: DEFAULT_ANCESTRY_LIMIT,
        })
    }

    /// Enable or disable speed mode.
    pub fn with_speed(mut self, speed: bool) -> Self {
        self.speed = speed;
        self
    }

    /// Scales tried by one ancestor search; must be positive.
    pub fn with_ancestry_limit(mut self, limit: u64) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::AncestryLimitZero);
        }
        self.ancestry_limit = limit;
        Ok(self)
    }

    /// Factor removed after each connection.
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// Multiplier of the connection.
    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }

    /// Addend of the connection.
    pub fn addend(&self) -> i32 {
        self.addend
    }

    /// Whether speed mode is on.
    pub fn speed(&self) -> bool {
        self.speed
    }

    /// Scales tried by one ancestor search.
    pub fn ancestry_limit(&self) -> u64 {
        self.ancestry_limit
    }

    /// `divisor * multiplier`, the radix of the leading class digit.
    pub fn modulus(&self) -> i32 {
        // Checked in `new`.
        self.divisor * self.multiplier
    }
}

impl Default for CollatzParams {
    fn default() -> Self {
        Self {
            divisor: 2,
            multiplier: 3,
            addend: 1,
            speed: false,
            ancestry_limit: DEFAULT_ANCESTRY_LIMIT,
        }
    }
}

/// Unvalidated on-disk form of [`CollatzParams`].
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ParamsFile {
    divisor: i32,
    multiplier: i32,
    addend: i32,
    speed: bool,
    ancestry_limit: u64,
}

impl Default for ParamsFile {
    fn default() -> Self {
        let params = CollatzParams::default();
        Self {
            divisor: params.divisor,
            multiplier: params.multiplier,
            addend: params.addend,
            speed: params.speed,
            ancestry_limit: params.ancestry_limit,
        }
    }
}

impl TryFrom<ParamsFile> for CollatzParams {
    type Error = ConfigError;

    fn try_from(file: ParamsFile) -> Result<Self, Self::Error> {
        CollatzParams::new(file.divisor, file.multiplier, file.addend)?
            .with_speed(file.speed)
            .with_ancestry_limit(file.ancestry_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_canonical() {
        let params = CollatzParams::default();
        assert_eq!(
            (params.divisor(), params.multiplier(), params.addend()),
            (2, 3, 1)
        );
        assert!(!params.speed());
        assert_eq!(params.modulus(), 6);
        assert_eq!(CollatzParams::new(2, 3, 1), Ok(params));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            CollatzParams::new(0, 3, 1),
            Err(ConfigError::DivisorTooSmall(0))
        );
        assert_eq!(
            CollatzParams::new(2, 0, 1),
            Err(ConfigError::MultiplierTooSmall(0))
        );
        assert!(matches!(
            CollatzParams::new(i32::MAX, 3, 1),
            Err(ConfigError::ModulusTooLarge { .. })
        ));
        assert_eq!(
            CollatzParams::default().with_ancestry_limit(0),
            Err(ConfigError::AncestryLimitZero)
        );
    }

    #[test]
    fn test_builder() {
        let params = CollatzParams::default()
            .with_speed(true)
            .with_ancestry_limit(10)
            .unwrap();
        assert!(params.speed());
        assert_eq!(params.ancestry_limit(), 10);
    }
}
