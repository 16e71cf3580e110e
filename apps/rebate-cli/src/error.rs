//! # CLI Error Type
//!
//! Unified error type for the `rebate` binary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  config file ── toml::de::Error ──┐                                     │
//! │  cart file   ── std::io::Error ───┤                                     │
//! │  rules/cart  ── CoreError ────────┼──► CliError ──► stderr, exit 1      │
//! │  --json      ── serde_json ───────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use rebate_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown or incomplete command-line arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A TOML document could not be parsed.
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Report could not be rendered as JSON.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Domain error from rebate-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    /// Exit code reported to the shell.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: CliError = CoreError::InvalidPercentage { value: 120 }.into();
        assert_eq!(
            err.to_string(),
            "Percentage must be between 0 and 100, got 120"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::InvalidArgs("--bogus".into()).exit_code(), 2);
        assert_eq!(CliError::InvalidConfig("x".into()).exit_code(), 1);
    }
}
