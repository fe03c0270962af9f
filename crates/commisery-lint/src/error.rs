//! Classification error types.

use commisery_commit::CommitError;
use thiserror::Error;

use crate::Diagnostic;

/// Errors raised while classifying a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintError {
    /// The message could not be parsed at all.
    #[error(transparent)]
    Structural(#[from] CommitError),

    /// One or more enabled rules reported a violation.
    #[error("commit message is not compliant ({} issue(s)): {subject}", .diagnostics.len())]
    NonCompliant {
        /// The subject line of the offending message.
        subject: String,
        /// Every violation found.
        diagnostics: Vec<Diagnostic>,
    },
}

impl LintError {
    /// Returns the collected diagnostics; empty for structural errors.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Structural(_) => &[],
            Self::NonCompliant { diagnostics, .. } => diagnostics,
        }
    }
}

/// Result type for classification.
pub type LintResult<T> = Result<T, LintError>;
