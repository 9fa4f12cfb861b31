// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Subscriber setup for the `collatz` binary.
//!
//! Library code only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. `RUST_LOG` takes precedence over the level
//! chosen on the command line.

use std::io::IsTerminal;
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Failures installing the subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}

/// Default filter directive for a count of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr formatter filtered by `RUST_LOG`, or by `verbosity` when
/// the variable is unset.
pub fn init_tracing(verbosity: u8) -> Result<(), InitError> {
    INITIALISED
        .set(())
        .map_err(|_| InitError::AlreadyInitialised)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(verbosity))?,
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal());

    Registry::default().with(filter).with(fmt_layer).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        for verbosity in 0..5 {
            assert!(EnvFilter::try_new(default_directive(verbosity)).is_ok());
        }
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(9), "trace");
    }
}
