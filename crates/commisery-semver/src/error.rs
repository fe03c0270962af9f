//! SemVer engine errors.

use commisery_version::BumpLevel;
use thiserror::Error;

/// Policy violations of the SemVer engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemVerError {
    /// A major or minor bump was required on a release branch.
    #[error("a {level} bump is not allowed on a release branch, only patch releases are")]
    ReleaseBranch {
        /// The bump level the commits required.
        level: BumpLevel,
    },
}

/// Result type for the SemVer engine.
pub type SemVerResult<T> = Result<T, SemVerError>;
