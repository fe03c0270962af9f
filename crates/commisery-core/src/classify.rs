//! Classification of commit ranges.

use commisery_commit::RawCommit;
use commisery_config::Config;
use commisery_lint::ConventionalCommit;
use tracing::{debug, warn};

/// Classifies `commits`, skipping the ones that are not compliant.
///
/// Skipped commits do not contribute to the bump level.
pub fn classify_commits(commits: &[RawCommit], config: &Config) -> Vec<ConventionalCommit> {
    let classified: Vec<_> = commits
        .iter()
        .filter_map(|raw| match ConventionalCommit::parse(&raw.message, config) {
            Ok(commit) => Some(commit),
            Err(err) => {
                warn!(
                    hash = %raw.short_hash(),
                    subject = %raw.subject(),
                    error = %err,
                    "skipping non-compliant commit"
                );
                None
            }
        })
        .collect();

    debug!(
        classified = classified.len(),
        skipped = commits.len() - classified.len(),
        "classified commits"
    );
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use commisery_version::BumpLevel;

    fn make_raw(hash: &str, message: &str) -> RawCommit {
        RawCommit::new(hash, message, "Test Author", "test@example.com", Utc::now())
    }

    #[test]
    fn test_classify_all_valid() {
        let commits = vec![
            make_raw("abc123", "feat: add feature"),
            make_raw("def456", "fix: fix bug"),
        ];

        let classified = classify_commits(&commits, &Config::default());
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].bump_level, BumpLevel::Minor);
        assert_eq!(classified[1].bump_level, BumpLevel::Patch);
    }

    #[test]
    fn test_classify_skips_invalid() {
        let commits = vec![
            make_raw("abc123", "feat: add feature"),
            make_raw("def456", "invalid commit message"),
            make_raw("0a1b2c3", "Merge branch 'main' into topic"),
            make_raw("ghi789", "Fix: capitalised type"),
        ];

        let classified = classify_commits(&commits, &Config::default());
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].description, "add feature");
    }

    #[test]
    fn test_classify_empty() {
        assert!(classify_commits(&[], &Config::default()).is_empty());
    }
}
