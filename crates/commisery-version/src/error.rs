//! Version error types.

use thiserror::Error;

/// Version-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The text is not a version.
    #[error("invalid version: {0}")]
    Invalid(String),

    /// The prefix contains something other than letters and hyphens.
    #[error("invalid version prefix: {0:?}")]
    InvalidPrefix(String),

    /// The prerelease is not a dot-separated identifier sequence.
    #[error("invalid prerelease: {0:?}")]
    InvalidPrerelease(String),

    /// The build metadata is not a dot-separated identifier sequence.
    #[error("invalid build metadata {build:?}: {reason}")]
    InvalidBuild { build: String, reason: String },
}

/// Result type for version operations.
pub type VersionResult<T> = Result<T, VersionError>;
