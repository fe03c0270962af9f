//! The built-in rules.

mod body;
mod footer;
mod subject;

use std::sync::LazyLock;

use regex::Regex;

use crate::RuleDescriptor;

/// `PROJ-123` style or `#123` style issue references.
pub(crate) static ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<key>[A-Z]+)-[0-9]+\b|#[0-9]+\b").expect("invalid regex"));

pub(crate) static REGISTRY: &[RuleDescriptor] = &[
    RuleDescriptor::new("C001", "Type tag should be in lower case", true, subject::lower_case_type),
    RuleDescriptor::new(
        "C002",
        "One blank line should separate subject and body",
        true,
        body::single_blank_line,
    ),
    RuleDescriptor::new(
        "C003",
        "Description should not start with a capital letter",
        true,
        subject::lower_case_description,
    ),
    RuleDescriptor::new("C004", "Type tag should be an accepted type", true, subject::known_type),
    RuleDescriptor::new(
        "C005",
        "Separator should be a colon followed by a single space",
        true,
        subject::separator_spacing,
    ),
    RuleDescriptor::new(
        "C006",
        "Scope should be a single non-empty word",
        true,
        subject::scope_shape,
    ),
    RuleDescriptor::new("C007", "Subject should contain a ': ' separator", true, subject::has_separator),
    RuleDescriptor::new("C008", "Description should not be empty", true, subject::has_description),
    RuleDescriptor::new(
        "C009",
        "Breaking indicator should be a single '!' without whitespace",
        true,
        subject::breaking_indicator,
    ),
    RuleDescriptor::new("C010", "Subject should start with a type tag", true, subject::has_type),
    RuleDescriptor::new(
        "C011",
        "Subject should not end with punctuation",
        true,
        subject::no_trailing_punctuation,
    ),
    RuleDescriptor::new("C012", "Subject should not exceed the maximum length", true, subject::max_length),
    RuleDescriptor::new(
        "C013",
        "Description should not repeat the type tag",
        true,
        subject::no_repeated_type,
    ),
    RuleDescriptor::new(
        "C014",
        "Description should use the imperative mood",
        true,
        subject::imperative_mood,
    ),
    RuleDescriptor::new(
        "C015",
        "Body and footers should be separated from the subject by a blank line",
        true,
        body::blank_line_after_subject,
    ),
    RuleDescriptor::new(
        "C016",
        "Subject should not contain issue references",
        true,
        subject::no_issue_reference,
    ),
    RuleDescriptor::new(
        "C017",
        "Subject should not reference review comments",
        true,
        subject::no_review_remarks,
    ),
    RuleDescriptor::new(
        "C018",
        "Footer tokens should not contain whitespace",
        true,
        footer::token_without_whitespace,
    ),
    RuleDescriptor::new(
        "C019",
        "Footer values should not contain blank lines",
        true,
        footer::no_blank_lines,
    ),
    RuleDescriptor::new(
        "C020",
        "A BREAKING CHANGE footer should be the first footer",
        true,
        footer::breaking_change_first,
    ),
    RuleDescriptor::new(
        "C021",
        "Known trailers should use a colon separator",
        true,
        footer::known_trailer_colon,
    ),
    RuleDescriptor::new(
        "C022",
        "Footers should reference at least one issue",
        false,
        footer::references_issue,
    ),
];
