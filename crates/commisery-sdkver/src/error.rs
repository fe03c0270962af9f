//! SdkVer errors.

use commisery_version::VersionError;
use thiserror::Error;

/// Policy violations and failures of the SdkVer state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkVerError {
    /// A development version was found on a release branch.
    #[error("development version {0} cannot be bumped on a release branch")]
    DevOnReleaseBranch(String),

    /// A breaking change was requested on a release branch.
    #[error("breaking changes are not allowed on release branch {0}")]
    BreakingOnReleaseBranch(String),

    /// The release type name is unknown.
    #[error("unknown release type '{0}', expected dev, rc or rel")]
    UnknownReleaseType(String),

    /// The computed version is invalid.
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Result type for the SdkVer state machine.
pub type SdkVerResult<T> = Result<T, SdkVerError>;
