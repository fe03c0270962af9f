//! Rules on the subject line.

use commisery_commit::{CommitMetadata, Span};
use commisery_config::Config;

use super::ISSUE_RE;
use crate::{Diagnostic, closest};

const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':'];

// Capitalised technical terms that look like `KEY-123` issue references.
const ACRONYMS: &[&str] = &[
    "AES", "ARM", "CVE", "HMAC", "ISO", "MD", "PEP", "RFC", "RSA", "SHA", "UTF",
];

// Past tense, third person and gerund forms seen at the start of descriptions.
const NON_IMPERATIVE: &[&str] = &[
    "added", "adds", "adding", "allowed", "allows", "allowing", "bumped", "bumps", "bumping",
    "changed", "changes", "changing", "cleaned", "cleans", "cleaning", "created", "creates",
    "creating", "deleted", "deletes", "deleting", "disabled", "disables", "disabling", "enabled",
    "enables", "enabling", "ensured", "ensures", "ensuring", "fixed", "fixes", "fixing",
    "implemented", "implements", "implementing", "improved", "improves", "improving",
    "introduced", "introduces", "introducing", "made", "makes", "making", "merged", "merges",
    "merging", "moved", "moves", "moving", "refactored", "refactors", "refactoring", "removed",
    "removes", "removing", "renamed", "renames", "renaming", "replaced", "replaces", "replacing",
    "updated", "updates", "updating", "upgraded", "upgrades", "upgrading", "used", "uses",
    "using",
];

fn subject_error(
    id: &str,
    message: impl Into<String>,
    metadata: &CommitMetadata,
    span: Span,
) -> Diagnostic {
    Diagnostic::error(id, message).at(metadata.subject.as_str(), span)
}

pub(super) fn lower_case_type(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let r#type = metadata.r#type.as_deref()?;
    let lower = r#type.to_lowercase();
    (r#type != lower).then(|| {
        subject_error(
            "C001",
            "type tag should be in lower case",
            metadata,
            metadata.type_span(),
        )
        .fix(lower)
    })
}

pub(super) fn lower_case_description(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let first = metadata.description.chars().next()?;
    first.is_uppercase().then(|| {
        let span = Span::new(metadata.description_span().start, 1);
        subject_error(
            "C003",
            "description should start with a lower-case letter",
            metadata,
            span,
        )
        .fix(first.to_lowercase().to_string())
    })
}

pub(super) fn known_type(metadata: &CommitMetadata, config: &Config) -> Option<Diagnostic> {
    let tag = metadata.r#type.as_deref()?;
    let lower = tag.to_lowercase();
    if config.tags.contains_key(&lower) {
        return None;
    }

    let accepted: Vec<&str> = config.tags.keys().map(String::as_str).collect();
    let diagnostic = subject_error(
        "C004",
        format!(
            "unknown type tag '{tag}', use one of: {}",
            accepted.join(", ")
        ),
        metadata,
        metadata.type_span(),
    );

    Some(match closest(&lower, accepted) {
        Some(suggestion) => diagnostic.fix(suggestion),
        None => diagnostic,
    })
}

pub(super) fn separator_spacing(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let separator = &metadata.separator;
    (separator.contains(':') && separator != ": ").then(|| {
        subject_error(
            "C005",
            "separator should be ':' followed by exactly one space",
            metadata,
            metadata.separator_span(),
        )
        .fix(": ")
    })
}

pub(super) fn scope_shape(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let scope = metadata.scope.as_deref()?;
    let trimmed = scope.trim();

    let message = if trimmed.is_empty() {
        "scope should not be empty"
    } else if scope.contains(char::is_whitespace) {
        "scope should not contain whitespace"
    } else {
        return None;
    };

    let diagnostic = subject_error("C006", message, metadata, metadata.scope_span());
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        Some(diagnostic)
    } else {
        Some(diagnostic.fix(format!("({trimmed})")))
    }
}

pub(super) fn has_separator(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    if metadata.separator.contains(':') {
        return None;
    }
    let span = metadata.separator_span();
    Some(
        subject_error(
            "C007",
            "missing ': ' separator after the type tag",
            metadata,
            Span::new(span.start, span.length.max(1)),
        )
        .fix(": "),
    )
}

pub(super) fn has_description(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    metadata.description.trim().is_empty().then(|| {
        let span = Span::new(metadata.description_span().start, 1);
        subject_error("C008", "description should not be empty", metadata, span)
    })
}

pub(super) fn breaking_indicator(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let breaking = &metadata.breaking;
    (!breaking.is_empty() && breaking != "!").then(|| {
        subject_error(
            "C009",
            "breaking indicator should be a single '!' directly before the separator",
            metadata,
            metadata.breaking_span(),
        )
        .fix("!")
    })
}

pub(super) fn has_type(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    metadata.r#type.is_none().then(|| {
        subject_error(
            "C010",
            "subject should start with a type tag",
            metadata,
            Span::new(0, 1),
        )
    })
}

pub(super) fn no_trailing_punctuation(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let last = metadata.subject.chars().last()?;
    TERMINAL_PUNCTUATION.contains(&last).then(|| {
        let span = Span::new(metadata.subject.chars().count() - 1, 1);
        subject_error(
            "C011",
            format!("subject should not end with '{last}'"),
            metadata,
            span,
        )
    })
}

pub(super) fn max_length(metadata: &CommitMetadata, config: &Config) -> Option<Diagnostic> {
    let length = metadata.subject.chars().count();
    let max = config.max_subject_length;
    (length > max).then(|| {
        let excess = length - max;
        subject_error(
            "C012",
            format!("subject is {excess} character(s) longer than the maximum of {max}"),
            metadata,
            Span::new(max, excess),
        )
    })
}

pub(super) fn no_repeated_type(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let tag = metadata.r#type.as_deref()?;
    let word = metadata.description.split_whitespace().next()?;
    (word.to_lowercase() == tag.to_lowercase()).then(|| {
        let span = Span::new(metadata.description_span().start, word.chars().count());
        subject_error(
            "C013",
            format!("description should not start with the type tag '{tag}'"),
            metadata,
            span,
        )
    })
}

pub(super) fn imperative_mood(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let word = metadata.description.split_whitespace().next()?;
    let normalized = word
        .trim_end_matches(TERMINAL_PUNCTUATION)
        .to_lowercase();
    NON_IMPERATIVE.contains(&normalized.as_str()).then(|| {
        let span = Span::new(metadata.description_span().start, word.chars().count());
        Diagnostic::warning(
            "C014",
            format!("description should use the imperative mood, not '{word}'"),
        )
        .at(metadata.subject.as_str(), span)
    })
}

pub(super) fn no_issue_reference(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    let subject = &metadata.subject;
    let reference = ISSUE_RE.captures_iter(subject).find_map(|captures| {
        let whole = captures.get(0)?;
        match captures.name("key") {
            Some(key) if ACRONYMS.contains(&key.as_str()) => None,
            _ => Some(whole),
        }
    })?;

    let span = Span::new(
        subject[..reference.start()].chars().count(),
        reference.as_str().chars().count(),
    );
    Some(subject_error(
        "C016",
        format!(
            "subject should not reference issue '{}', use a footer instead",
            reference.as_str()
        ),
        metadata,
        span,
    ))
}

// There is no agreed pattern for a review remark; the rule only reserves the id.
pub(super) fn no_review_remarks(_: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    None
}
