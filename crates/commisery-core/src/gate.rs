//! Pull request gate.
//!
//! A pull request passes when its title and every one of its commits are
//! compliant. Unlike the bump computation, nothing is skipped.

use std::fmt;
use std::sync::LazyLock;

use commisery_commit::RawCommit;
use commisery_config::Config;
use commisery_lint::{ConventionalCommit, LintError};
use regex::Regex;
use tracing::{debug, info};

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[(?:K|.*?m)").expect("invalid regex"));

/// What a gate failure was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateSource {
    /// The pull request title.
    Title,
    /// A commit, by hash.
    Commit(String),
}

impl fmt::Display for GateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "pull request title"),
            Self::Commit(hash) => write!(f, "commit {hash}"),
        }
    }
}

/// A message that failed classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateFailure {
    /// Where the message came from.
    pub source: GateSource,

    /// Why it failed.
    pub error: LintError,
}

impl fmt::Display for GateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.error)?;
        for diagnostic in self.error.diagnostics() {
            write!(f, "\n{diagnostic}")?;
        }
        Ok(())
    }
}

/// The result of [`check_pull_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateReport {
    /// Number of messages checked, title included.
    pub checked: usize,

    /// Every failed message.
    pub failures: Vec<GateFailure>,
}

impl GateReport {
    /// Returns true if every message is compliant.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Renders each failure as a GitHub workflow `::error::` command.
    #[must_use]
    pub fn workflow_commands(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|failure| workflow_error(&failure.to_string()))
            .collect()
    }
}

/// Validates a pull request title and its commits.
pub fn check_pull_request(title: &str, commits: &[RawCommit], config: &Config) -> GateReport {
    let mut report = GateReport::default();

    let messages = std::iter::once((GateSource::Title, title)).chain(commits.iter().map(|commit| {
        (
            GateSource::Commit(commit.short_hash().to_string()),
            commit.message.as_str(),
        )
    }));

    for (source, message) in messages {
        report.checked += 1;
        match ConventionalCommit::parse(message, config) {
            Ok(_) => debug!(%source, "compliant"),
            Err(error) => {
                info!(%source, %error, "not compliant");
                report.failures.push(GateFailure { source, error });
            }
        }
    }

    report
}

/// Formats `message` as a GitHub workflow error command.
///
/// Line breaks become `%0A` and ANSI colour sequences are removed.
pub fn workflow_error(message: &str) -> String {
    let message = message.trim_end().replace("\r\n", "%0A").replace('\n', "%0A");
    format!("::error::{}", ANSI_RE.replace_all(&message, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_raw(hash: &str, message: &str) -> RawCommit {
        RawCommit::new(hash, message, "Test Author", "test@example.com", Utc::now())
    }

    #[test]
    fn test_gate_passes() {
        let commits = vec![
            make_raw("abc1234567", "feat: add x"),
            make_raw("def4567890", "fix(parser): handle y\n\nSome details."),
        ];

        let report = check_pull_request("feat: add x and fix y", &commits, &Config::default());

        assert!(report.passed());
        assert_eq!(report.checked, 3);
        assert!(report.workflow_commands().is_empty());
    }

    #[test]
    fn test_gate_fails_on_title() {
        let report = check_pull_request("Add x", &[], &Config::default());

        assert!(!report.passed());
        assert_eq!(report.failures[0].source, GateSource::Title);
    }

    #[test]
    fn test_gate_does_not_skip_merge_commits() {
        let commits = vec![
            make_raw("abc1234567", "feat: add x"),
            make_raw("def4567890", "Merge branch 'main' into topic"),
        ];

        let report = check_pull_request("feat: add x", &commits, &Config::default());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failures[0].source,
            GateSource::Commit("def4567".to_string())
        );
        assert!(matches!(
            report.failures[0].error,
            LintError::Structural(_)
        ));
    }

    #[test]
    fn test_gate_reports_diagnostics() {
        let commits = vec![make_raw("abc1234567", "Feat: add x")];

        let report = check_pull_request("feat: add x", &commits, &Config::default());
        let commands = report.workflow_commands();

        assert_eq!(commands.len(), 1);
        assert!(commands[0].starts_with("::error::commit abc1234: "));
        assert!(commands[0].contains("C001"));
        assert!(commands[0].contains("%0A"));
        assert!(!commands[0].contains('\n'));
    }

    #[test]
    fn test_workflow_error() {
        assert_eq!(workflow_error("one\ntwo\n"), "::error::one%0Atwo");
        assert_eq!(
            workflow_error("\x1b[31merror\x1b[0m: bad\x1b[K"),
            "::error::error: bad"
        );
    }
}
