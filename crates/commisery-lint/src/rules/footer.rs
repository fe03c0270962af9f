//! Rules on trailers.

use std::sync::LazyLock;

use commisery_commit::{CommitMetadata, Footer, Span};
use commisery_config::Config;
use regex::Regex;

use super::ISSUE_RE;
use crate::Diagnostic;

static KNOWN_TRAILER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<token>acked-by|addresses|breaking[ -]change|closes|co-authored-by|fixes|implements|references|refs|related|resolves|reviewed-by|signed-off-by)\s+\S",
    )
    .expect("invalid regex")
});

fn token_span(footer: &Footer) -> Span {
    Span::new(0, footer.token.chars().count())
}

pub(super) fn token_without_whitespace(
    metadata: &CommitMetadata,
    _: &Config,
) -> Option<Diagnostic> {
    let footer = metadata
        .footers
        .iter()
        .find(|footer| !footer.is_breaking() && footer.token.contains(char::is_whitespace))?;

    let fixed: Vec<&str> = footer.token.split_whitespace().collect();
    Some(
        Diagnostic::error(
            "C018",
            format!("footer token '{}' should not contain whitespace", footer.token),
        )
        .at(footer.first_line(), token_span(footer))
        .fix(fixed.join("-")),
    )
}

pub(super) fn no_blank_lines(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let footer = metadata.footers.iter().find(|footer| {
        let allowed = usize::from(footer.is_breaking());
        footer.value.lines().filter(|line| line.is_empty()).count() > allowed
    })?;

    Some(
        Diagnostic::error(
            "C019",
            format!("footer '{}' should not contain blank lines", footer.token),
        )
        .at(footer.first_line(), token_span(footer)),
    )
}

pub(super) fn breaking_change_first(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let position = metadata.footers.iter().position(Footer::is_breaking)?;
    let footer = metadata.footers.get(position).filter(|_| position > 0)?;

    Some(
        Diagnostic::error(
            "C020",
            format!("'{}' should be the first footer", footer.token),
        )
        .at(footer.first_line(), token_span(footer)),
    )
}

/// Scans the message bottom-up, past trailers, continuation lines and blank
/// lines, and checks the first other line.
pub(super) fn known_trailer_colon(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let line = metadata.body_lines.iter().rev().find(|line| {
        !line.is_empty()
            && !line.starts_with(char::is_whitespace)
            && Footer::parse_line(line).is_none()
    })?;

    let token = KNOWN_TRAILER_RE.captures(line)?.name("token")?.as_str();
    Some(
        Diagnostic::error(
            "C021",
            format!("trailer '{token}' should be followed by ': '"),
        )
        .at(line.as_str(), Span::new(0, token.chars().count()))
        .fix(format!("{token}:")),
    )
}

pub(super) fn references_issue(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let referenced = metadata
        .footers
        .iter()
        .any(|footer| ISSUE_RE.is_match(&footer.value));

    (!referenced).then(|| {
        Diagnostic::error(
            "C022",
            "footers should reference at least one issue, e.g. 'Implements: PROJ-123'",
        )
    })
}
