//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository host error.
    #[error("host error: {0}")]
    Host(#[from] commisery_git::HostError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] commisery_config::ConfigError),

    /// Version error.
    #[error("version error: {0}")]
    Version(#[from] commisery_version::VersionError),

    /// SemVer policy violation.
    #[error(transparent)]
    SemVer(#[from] commisery_semver::SemVerError),

    /// SdkVer policy violation.
    #[error(transparent)]
    SdkVer(#[from] commisery_sdkver::SdkVerError),

    /// The tag to create already exists.
    #[error(
        "tag {tag} already exists on commit {sha}; remove the tag or make sure the version \
         history is reachable from the current branch"
    )]
    TagExists {
        /// The tag name.
        tag: String,
        /// The commit the existing tag points to.
        sha: String,
    },

    /// The release branch to create already exists.
    #[error("release branch {branch} already exists on commit {sha}")]
    BranchExists {
        /// The branch name.
        branch: String,
        /// The commit the existing branch points to.
        sha: String,
    },
}

impl CoreError {
    /// Returns true for refused transitions, as opposed to failures.
    #[must_use]
    pub fn is_policy(&self) -> bool {
        matches!(
            self,
            Self::SemVer(_) | Self::SdkVer(_) | Self::TagExists { .. } | Self::BranchExists { .. }
        )
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
