//! The validated commit entity.

use commisery_commit::{CommitMetadata, Footer};
use commisery_config::Config;
use commisery_version::BumpLevel;
use serde::Serialize;

use crate::{LintError, LintResult, validate};

/// A commit message that passed every enabled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConventionalCommit {
    /// The type tag.
    pub r#type: String,

    /// The scope, if any.
    pub scope: Option<String>,

    /// Whether the commit is a breaking change.
    pub breaking_change: bool,

    /// The description.
    pub description: String,

    /// The prose body.
    pub body: String,

    /// The trailers.
    pub footers: Vec<Footer>,

    /// The version bump this commit requires.
    pub bump_level: BumpLevel,
}

impl ConventionalCommit {
    /// Parses and validates a raw commit message.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Structural`] for merge, autosquash and
    /// unparsable messages, and [`LintError::NonCompliant`] with every
    /// diagnostic when an enabled rule is violated.
    pub fn parse(message: &str, config: &Config) -> LintResult<Self> {
        let metadata = CommitMetadata::parse(message)?;
        Self::from_metadata(metadata, config)
    }

    /// Validates already parsed metadata.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::NonCompliant`] when an enabled rule is violated.
    pub fn from_metadata(metadata: CommitMetadata, config: &Config) -> LintResult<Self> {
        let diagnostics = validate(&metadata, config);
        if !diagnostics.is_empty() {
            return Err(LintError::NonCompliant {
                subject: metadata.subject,
                diagnostics,
            });
        }

        let bump_level = bump_level(&metadata, config);
        Ok(Self {
            r#type: metadata.r#type.clone().unwrap_or_default(),
            scope: metadata.scope.clone(),
            breaking_change: metadata.has_breaking_footer() || metadata.has_breaking_indicator(),
            description: metadata.description.clone(),
            body: metadata.body(),
            footers: metadata.footers,
            bump_level,
        })
    }
}

fn bump_level(metadata: &CommitMetadata, config: &Config) -> BumpLevel {
    let tag = metadata.r#type.as_deref().unwrap_or_default();

    if metadata.has_breaking_footer() || metadata.has_breaking_indicator() {
        BumpLevel::Major
    } else if tag == "feat" {
        BumpLevel::Minor
    } else if tag == "fix" || config.bumps_patch(tag) {
        BumpLevel::Patch
    } else {
        BumpLevel::None
    }
}
