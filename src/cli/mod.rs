//! CLI command implementations for Republica.

pub(crate) mod autoplay;
pub(crate) mod play;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Output format for the `autoplay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AutoplayFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Seed from the clock when none was given.
fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos() & u128::from(u64::MAX)).unwrap_or(42))
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<republica::ContentError> for CliError {
    fn from(e: republica::ContentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<republica::GameError> for CliError {
    fn from(e: republica::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<republica::LaunchError> for CliError {
    fn from(e: republica::LaunchError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<republica::SaveError> for CliError {
    fn from(e: republica::SaveError) -> Self {
        Self::new(e.to_string())
    }
}
