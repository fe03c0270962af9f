//! Bump results.

use commisery_commit::RawCommit;
use commisery_sdkver::ReleaseType;
use commisery_version::{BumpLevel, BumpTransition, Version};
use serde::Serialize;

/// What changed in a bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpMetadata {
    /// The version bumped from.
    pub from: Version,

    /// The version bumped to.
    pub to: Version,

    /// The bump level.
    #[serde(rename = "type")]
    pub bump_type: BumpLevel,
}

impl BumpMetadata {
    /// Extracts the metadata of an actual bump.
    #[must_use]
    pub fn from_transition(transition: &BumpTransition) -> Option<Self> {
        transition.to.as_ref().map(|to| Self {
            from: transition.from.clone(),
            to: to.clone(),
            bump_type: transition.bump_level,
        })
    }
}

/// The outcome of [`crate::ReleaseManager::bump`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpReport {
    /// The branch that was bumped.
    pub branch: String,

    /// The version the bump started from.
    pub current_version: Option<Version>,

    /// The new version, if any.
    pub next_version: Option<Version>,

    /// Details of the bump, if any.
    pub bump: Option<BumpMetadata>,

    /// The SdkVer release type that was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_type: Option<ReleaseType>,

    /// The commits since the current version, newest first.
    pub commits: Vec<RawCommit>,

    /// Why the bump was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl BumpReport {
    /// Creates a report for a bump that did not run.
    #[must_use]
    pub fn skipped(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            current_version: None,
            next_version: None,
            bump: None,
            release_type: None,
            commits: Vec::new(),
            skipped: Some(reason.into()),
        }
    }

    /// Returns true if a new version was decided.
    #[must_use]
    pub fn is_bump(&self) -> bool {
        self.next_version.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[test]
    fn test_metadata_from_transition() {
        let transition = BumpTransition::new(v("1.2.0"), v("1.3.0"), BumpLevel::Minor);
        let metadata = BumpMetadata::from_transition(&transition).unwrap();
        assert_eq!(metadata.to, v("1.3.0"));

        let unchanged = BumpTransition::unchanged(v("1.2.0"), BumpLevel::None);
        assert!(BumpMetadata::from_transition(&unchanged).is_none());
    }

    #[test]
    fn test_report_json() {
        let report = BumpReport {
            branch: "main".to_string(),
            current_version: Some(v("v1.2.0")),
            next_version: Some(v("v1.3.0")),
            bump: Some(BumpMetadata {
                from: v("v1.2.0"),
                to: v("v1.3.0"),
                bump_type: BumpLevel::Minor,
            }),
            release_type: None,
            commits: Vec::new(),
            skipped: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["current_version"], "v1.2.0");
        assert_eq!(json["next_version"], "v1.3.0");
        assert_eq!(json["bump"]["type"], "minor");
        assert!(json.get("skipped").is_none());
    }

    #[test]
    fn test_skipped_report() {
        let report = BumpReport::skipped("feature/x", "branch not allowed");
        assert!(!report.is_bump());
        assert_eq!(report.skipped.as_deref(), Some("branch not allowed"));
    }
}
