//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading or validating `.commisery.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    /// The file is not valid TOML or does not match the schema.
    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The TOML error.
        source: toml::de::Error,
    },

    /// `allowed-branches` is not a valid regex.
    #[error("allowed-branches is not a valid regex ({pattern}): {source}")]
    AllowedBranches {
        /// The configured pattern.
        pattern: String,
        /// The regex error.
        source: regex::Error,
    },

    /// `max-subject-length` is zero.
    #[error("max-subject-length must be positive")]
    SubjectLength,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
