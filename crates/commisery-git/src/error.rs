//! Host error types.

use thiserror::Error;

/// Repository host errors.
#[derive(Debug, Error)]
pub enum HostError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// The reference to create already exists.
    #[error("{reference} already exists and points to commit {sha}")]
    Conflict {
        /// The tag or branch name.
        reference: String,
        /// The commit the existing reference points to.
        sha: String,
    },

    /// The requested object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other failure talking to the host.
    #[error("host request failed: {0}")]
    Transport(String),

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
