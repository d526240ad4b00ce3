//! Error types for provsync-core.

use thiserror::Error;

/// Errors raised while loading the environment configuration.
///
/// Configuration is validated before any I/O happens; the first missing
/// mandatory variable aborts the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory environment variable is not set.
    #[error("missing mandatory environment variable: {0}")]
    MissingVariable(String),
}
