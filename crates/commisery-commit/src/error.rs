//! Structural commit errors.

use thiserror::Error;

/// Errors that abort parsing of a single commit message.
///
/// None of these carry diagnostics; the caller decides whether to skip the
/// commit or report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The message is empty after clean-up.
    #[error("commit message is empty")]
    Empty,

    /// A merge commit.
    #[error("merge commit: {0}")]
    Merge(String),

    /// An autosquash commit (`fixup!` or `squash!`).
    #[error("fixup commit: {0}")]
    Fixup(String),
}

/// Result type for commit parsing.
pub type CommitResult<T> = Result<T, CommitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CommitError::Merge("Merge branch 'x'".to_string()).to_string(),
            "merge commit: Merge branch 'x'"
        );
        assert_eq!(CommitError::Empty.to_string(), "commit message is empty");
    }
}
