//! Commit trailers.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TRAILER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<token>BREAKING CHANGE|[\w-]+(?: [\w-]+)* by|[\w-]+)(?:(?P<colon>: )(?P<value>.+)|(?P<space> )(?P<issue>#.+))$",
    )
    .expect("invalid regex")
});

/// A `token: value` (or `token #value`) trailer.
///
/// Continuation lines are folded into `value`, joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// The trailer token as written.
    pub token: String,

    /// The trailer value, possibly spanning multiple lines.
    pub value: String,

    /// The separator between token and value (`": "` or `" "`).
    pub separator: String,
}

impl Footer {
    /// Creates a footer with the `": "` separator.
    #[must_use]
    pub fn new(token: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
            separator: ": ".to_string(),
        }
    }

    /// Parses a single trailer line.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let captures = TRAILER_RE.captures(line)?;
        let token = captures.name("token")?.as_str().to_string();

        let (separator, value) = match captures.name("colon") {
            Some(colon) => (colon.as_str(), captures.name("value")?.as_str()),
            None => (
                captures.name("space")?.as_str(),
                captures.name("issue")?.as_str(),
            ),
        };

        Some(Self {
            token,
            value: value.to_string(),
            separator: separator.to_string(),
        })
    }

    /// Returns true if this is a `BREAKING-CHANGE` (or `BREAKING CHANGE`) footer.
    #[must_use]
    pub fn is_breaking(&self) -> bool {
        self.token == "BREAKING-CHANGE" || self.token == "BREAKING CHANGE"
    }

    /// Returns the first line of the footer as it appears in the message.
    #[must_use]
    pub fn first_line(&self) -> String {
        let value = self.value.lines().next().unwrap_or_default();
        format!("{}{}{value}", self.token, self.separator)
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.value.push('\n');
        self.value.push_str(line);
    }

    pub(crate) fn blank_lines(&self) -> usize {
        self.value.split('\n').filter(|line| line.is_empty()).count()
    }

    pub(crate) fn trim_trailing_blank_lines(&mut self) {
        let trimmed = self.value.trim_end_matches('\n').len();
        self.value.truncate(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_trailer() {
        let footer = Footer::parse_line("Implements: TICKET-1").unwrap();
        assert_eq!(footer.token, "Implements");
        assert_eq!(footer.value, "TICKET-1");
        assert_eq!(footer.separator, ": ");
    }

    #[test]
    fn test_parse_issue_trailer() {
        let footer = Footer::parse_line("Fixes #42").unwrap();
        assert_eq!(footer.token, "Fixes");
        assert_eq!(footer.value, "#42");
        assert_eq!(footer.first_line(), "Fixes #42");
    }

    #[test]
    fn test_parse_breaking_alias() {
        let footer = Footer::parse_line("BREAKING CHANGE: config moved").unwrap();
        assert_eq!(footer.token, "BREAKING CHANGE");
        assert!(footer.is_breaking());
        assert!(Footer::parse_line("BREAKING-CHANGE: x").unwrap().is_breaking());
    }

    #[test]
    fn test_parse_multi_word_by_token() {
        let footer = Footer::parse_line("Signed off by: Jane <jane@example.com>").unwrap();
        assert_eq!(footer.token, "Signed off by");
    }

    #[test]
    fn test_rejects_prose() {
        assert!(Footer::parse_line("This is just a sentence.").is_none());
        assert!(Footer::parse_line("Refs 42").is_none());
        assert!(Footer::parse_line("Refs:42").is_none());
        assert!(Footer::parse_line("  Refs: 42").is_none());
    }

    #[test]
    fn test_first_line_of_folded_value() {
        let mut footer = Footer::new("BREAKING CHANGE", "first");
        footer.push_line(" second");
        assert_eq!(footer.value, "first\n second");
        assert_eq!(footer.first_line(), "BREAKING CHANGE: first");
    }
}
