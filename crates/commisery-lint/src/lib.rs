//! Conventional Commits validation for Commisery.
//!
//! This crate provides:
//! - [`Diagnostic`]: A rule violation with source position and suggested fix
//! - [`RuleDescriptor`] and [`rules`]: The fixed rule registry (`C001`..`C022`)
//! - [`validate`]: Runs every enabled rule against parsed metadata
//! - [`ConventionalCommit`]: A validated commit with its bump level

mod commit;
mod diagnostic;
mod error;
mod rule;
mod rules;
mod text;

pub use commit::ConventionalCommit;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{LintError, LintResult};
pub use rule::{RuleDescriptor, find_rule, is_enabled, rules, unknown_rule_ids, validate};
pub use text::{closest, levenshtein};
