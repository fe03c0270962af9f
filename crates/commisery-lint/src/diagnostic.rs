//! Rule violations and their rendering.

use std::fmt;

use commisery_commit::Span;
use serde::Serialize;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A violation of the convention.
    Error,
    /// A likely problem found by a heuristic.
    Warning,
    /// Additional information.
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// A single rule violation.
///
/// Rendered like a compiler message: a header, the offending line, a caret
/// under the offending range and the suggested fix below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The id of the rule that produced it.
    pub rule_id: String,

    /// The severity.
    pub severity: Severity,

    /// Human-readable message.
    pub message: String,

    /// The line the diagnostic refers to.
    pub source_line: Option<String>,

    /// The offending range on `source_line`.
    pub column_range: Option<Span>,

    /// Replacement text for the offending range.
    pub suggested_fix: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic without position information.
    #[must_use]
    pub fn new(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            source_line: None,
            column_range: None,
            suggested_fix: None,
        }
    }

    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Error, message)
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Warning, message)
    }

    /// Attaches the source line without a range.
    #[must_use]
    pub fn line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    /// Attaches the source line and the offending range.
    #[must_use]
    pub fn at(mut self, source_line: impl Into<String>, span: Span) -> Self {
        self.source_line = Some(source_line.into());
        self.column_range = Some(span);
        self
    }

    /// Attaches a suggested fix.
    #[must_use]
    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.suggested_fix = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.rule_id, self.message)?;

        let Some(source_line) = &self.source_line else {
            return Ok(());
        };
        write!(f, "\n{source_line}")?;

        let start = self.column_range.map_or(0, |span| span.start);
        if let Some(span) = self.column_range {
            let tildes = "~".repeat(span.length.saturating_sub(1));
            write!(f, "\n{:start$}^{tildes}", "")?;
        }
        if let Some(suggestion) = &self.suggested_fix {
            write!(f, "\n{:start$}{suggestion}", "")?;
        }
        Ok(())
    }
}
