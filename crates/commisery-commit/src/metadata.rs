//! Conventional Commits grammar parser.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CommitError, CommitResult, Footer, strip_message};

static MERGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Merge").expect("invalid regex"));

static FIXUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:fixup|squash)!\s+").expect("invalid regex"));

// Matches every single line: malformed subjects still split into components
// and the subject rules report what is wrong with them.
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[\w-]+)?(?:\((?P<scope>[^()]*)\))?(?P<breaking>\s*!+\s*)?(?P<separator>\s*:?\s*)(?P<description>.*)$",
    )
    .expect("invalid regex")
});

/// A character range on a line, used to place diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Zero-based character offset.
    pub start: usize,

    /// Number of characters.
    pub length: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }
}

/// A commit message split into its Conventional Commits components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMetadata {
    /// The subject line.
    pub subject: String,

    /// The type tag, if any.
    pub r#type: Option<String>,

    /// The scope between parentheses, if any.
    pub scope: Option<String>,

    /// The breaking indicator exactly as written, including surrounding
    /// whitespace; empty when absent.
    pub breaking: String,

    /// The separator exactly as written, normally `": "`.
    pub separator: String,

    /// The description after the separator.
    pub description: String,

    /// Every line after the subject.
    pub body_lines: Vec<String>,

    /// Number of leading `body_lines` that form the prose body; the footers
    /// were read from the lines after it.
    pub body_end: usize,

    /// The trailers at the end of the message.
    pub footers: Vec<Footer>,
}

impl CommitMetadata {
    /// Parses a raw commit message.
    ///
    /// The message is cleaned with [`strip_message`] first.
    ///
    /// # Errors
    ///
    /// Returns an error for empty messages, merge commits and autosquash
    /// commits. Any other subject parses; grammar violations are left to the
    /// lint rules.
    pub fn parse(raw: &str) -> CommitResult<Self> {
        let message = strip_message(raw);
        let mut lines = message.lines();
        let subject = lines.next().ok_or(CommitError::Empty)?;

        if MERGE_RE.is_match(subject) {
            return Err(CommitError::Merge(subject.to_string()));
        }
        if FIXUP_RE.is_match(subject) {
            return Err(CommitError::Fixup(subject.to_string()));
        }

        let captures = SUBJECT_RE.captures(subject);
        let text_of = |name: &str| {
            captures
                .as_ref()
                .and_then(|c| c.name(name))
                .map(|m| m.as_str().to_string())
        };

        let body_lines: Vec<String> = lines.map(str::to_string).collect();
        let (body_end, footers) = scan_footers(&body_lines);

        Ok(Self {
            subject: subject.to_string(),
            r#type: text_of("type"),
            scope: text_of("scope"),
            breaking: text_of("breaking").unwrap_or_default(),
            separator: text_of("separator").unwrap_or_default(),
            description: text_of("description").unwrap_or_default(),
            body_lines,
            body_end,
            footers,
        })
    }

    /// Returns true if the subject carries a `!` breaking indicator.
    #[must_use]
    pub fn has_breaking_indicator(&self) -> bool {
        self.breaking.contains('!')
    }

    /// Returns true if any footer is a breaking-change footer.
    #[must_use]
    pub fn has_breaking_footer(&self) -> bool {
        self.footers.iter().any(Footer::is_breaking)
    }

    /// Returns the prose body without surrounding blank lines.
    #[must_use]
    pub fn body(&self) -> String {
        self.body_lines[..self.body_end]
            .join("\n")
            .trim_matches('\n')
            .to_string()
    }

    /// Returns the span of the type tag.
    #[must_use]
    pub fn type_span(&self) -> Span {
        Span::new(0, char_len(self.r#type.as_deref()))
    }

    /// Returns the span of the scope including its parentheses.
    #[must_use]
    pub fn scope_span(&self) -> Span {
        let length = self.scope.as_deref().map_or(0, |s| s.chars().count() + 2);
        Span::new(self.type_span().length, length)
    }

    /// Returns the span of the breaking indicator.
    #[must_use]
    pub fn breaking_span(&self) -> Span {
        let scope = self.scope_span();
        Span::new(scope.start + scope.length, self.breaking.chars().count())
    }

    /// Returns the span of the separator.
    #[must_use]
    pub fn separator_span(&self) -> Span {
        let breaking = self.breaking_span();
        Span::new(
            breaking.start + breaking.length,
            self.separator.chars().count(),
        )
    }

    /// Returns the span of the description.
    #[must_use]
    pub fn description_span(&self) -> Span {
        let separator = self.separator_span();
        Span::new(
            separator.start + separator.length,
            self.description.chars().count(),
        )
    }
}

fn char_len(text: Option<&str>) -> usize {
    text.map_or(0, |t| t.chars().count())
}

/// Splits the lines after the subject into prose body and trailers.
///
/// Trailers must form the trailing block. A line that is neither a trailer
/// nor a continuation discards the trailers seen so far and moves the body
/// end past itself, except after a breaking-change footer, which absorbs
/// such lines while its value holds at most one blank line.
fn scan_footers(lines: &[String]) -> (usize, Vec<Footer>) {
    let mut footers: Vec<Footer> = Vec::new();
    let mut body_end = 0;

    for (index, line) in lines.iter().enumerate() {
        if let Some(footer) = Footer::parse_line(line) {
            footers.push(footer);
            continue;
        }

        let Some(last) = footers.last_mut() else {
            if !line.is_empty() {
                body_end = index + 1;
            }
            continue;
        };

        let absorbs_prose = last.is_breaking() && last.blank_lines() <= 1;
        if line.is_empty() || line.starts_with(char::is_whitespace) || absorbs_prose {
            last.push_line(line);
        } else {
            footers.clear();
            body_end = index + 1;
        }
    }

    for footer in &mut footers {
        footer.trim_trailing_blank_lines();
    }

    (body_end, footers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> CommitMetadata {
        CommitMetadata::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_full_subject() {
        let metadata = parse("feat(api)!: add endpoint");
        assert_eq!(metadata.r#type.as_deref(), Some("feat"));
        assert_eq!(metadata.scope.as_deref(), Some("api"));
        assert_eq!(metadata.breaking, "!");
        assert_eq!(metadata.separator, ": ");
        assert_eq!(metadata.description, "add endpoint");
        assert!(metadata.has_breaking_indicator());
        assert!(metadata.body_lines.is_empty());
        assert!(metadata.footers.is_empty());
    }

    #[test]
    fn test_parse_loose_subject() {
        let metadata = parse("Feat ( ) ! :Add thing.");
        assert_eq!(metadata.r#type.as_deref(), Some("Feat"));
        assert_eq!(metadata.scope, None);
        assert_eq!(metadata.description, "( ) ! :Add thing.");

        let metadata = parse("random commit message");
        assert_eq!(metadata.r#type.as_deref(), Some("random"));
        assert_eq!(metadata.separator, " ");
        assert_eq!(metadata.description, "commit message");

        let metadata = parse("(((");
        assert_eq!(metadata.r#type, None);
        assert_eq!(metadata.description, "(((");

        let metadata = parse(": no type");
        assert_eq!(metadata.r#type, None);
        assert_eq!(metadata.separator, ": ");
    }

    #[test]
    fn test_conventional_subjects_never_fail() {
        for subject in [
            "feat: x",
            "fix(core): y",
            "chore!: z",
            "docs(readme)!: w",
            "ci(a-b_c): v",
        ] {
            assert!(CommitMetadata::parse(subject).is_ok(), "{subject}");
        }
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            CommitMetadata::parse("Merge branch 'main' into topic"),
            Err(CommitError::Merge("Merge branch 'main' into topic".to_string()))
        );
        assert!(matches!(
            CommitMetadata::parse("fixup! feat: x"),
            Err(CommitError::Fixup(_))
        ));
        assert!(matches!(
            CommitMetadata::parse("squash!  fix: y"),
            Err(CommitError::Fixup(_))
        ));
        assert_eq!(CommitMetadata::parse("\n# only\n"), Err(CommitError::Empty));
    }

    #[test]
    fn test_spans() {
        let metadata = parse("fix(parser) !:  handle it");
        assert_eq!(metadata.type_span(), Span::new(0, 3));
        assert_eq!(metadata.scope_span(), Span::new(3, 8));
        assert_eq!(metadata.breaking_span(), Span::new(11, 2));
        assert_eq!(metadata.separator_span(), Span::new(13, 3));
        assert_eq!(metadata.description_span(), Span::new(16, 9));
    }

    #[test]
    fn test_body_and_footers() {
        let metadata = parse(
            "feat: x\n\nSome body text.\n\nSecond paragraph.\n\nImplements: TICKET-1\nSigned-off-by: A <a@b.c>",
        );
        assert_eq!(metadata.body(), "Some body text.\n\nSecond paragraph.");
        assert_eq!(
            metadata.footers,
            vec![
                Footer::new("Implements", "TICKET-1"),
                Footer::new("Signed-off-by", "A <a@b.c>"),
            ]
        );
    }

    #[test]
    fn test_continuation_lines_fold() {
        let metadata = parse("feat: x\n\nRefs: one\n  two\nCloses: #3");
        assert_eq!(metadata.footers[0].value, "one\n  two");
        assert_eq!(metadata.footers[1].first_line(), "Closes: #3");
    }

    #[test]
    fn test_prose_resets_footers() {
        let metadata = parse("feat: x\n\nRefs: one\nthis is prose again\n\nCloses: #3");
        assert_eq!(metadata.footers, vec![Footer::new("Closes", "#3")]);
        assert_eq!(metadata.body(), "Refs: one\nthis is prose again");
        assert_eq!(metadata.body_end, 3);
    }

    #[test]
    fn test_breaking_change_absorbs_paragraph() {
        let metadata = parse(
            "chore: did something\n\nBREAKING CHANGE: config moved\n\nSee the migration guide.\nRefs: #1",
        );
        assert_eq!(metadata.footers.len(), 2);
        assert_eq!(
            metadata.footers[0].value,
            "config moved\n\nSee the migration guide."
        );
        assert!(metadata.has_breaking_footer());
        assert_eq!(metadata.body(), "");
    }

    #[test]
    fn test_breaking_change_tolerates_one_blank_line() {
        let metadata = parse("feat: x\n\nBREAKING CHANGE: a\n\n\nprose\n\nRefs: #1");
        assert_eq!(metadata.footers, vec![Footer::new("Refs", "#1")]);
        assert!(!metadata.has_breaking_footer());
        assert_eq!(metadata.body_end, 5);

        let metadata = parse("feat: x\n\nBREAKING CHANGE: a\ncontinued\n\nprose\n\nmore");
        assert!(metadata.footers.is_empty());
        assert_eq!(metadata.body_end, 7);
    }

    #[test]
    fn test_blank_line_between_footers_is_trimmed() {
        let metadata = parse("fix: y\n\nRefs: #1\n\nCloses: #2");
        assert_eq!(metadata.footers[0].value, "#1");
        assert_eq!(metadata.footers.len(), 2);
    }
}
