//! Rules on the blank line after the subject.

use commisery_commit::CommitMetadata;
use commisery_config::Config;

use crate::Diagnostic;

pub(super) fn single_blank_line(metadata: &CommitMetadata, _: &Config) -> Option<Diagnostic> {
    match metadata.body_lines.as_slice() {
        [first, second, ..] if first.is_empty() && second.is_empty() => Some(Diagnostic::error(
            "C002",
            "more than one blank line between subject and body",
        )),
        _ => None,
    }
}

pub(super) fn blank_line_after_subject(
    metadata: &CommitMetadata,
    _: &Config,
) -> Option<Diagnostic> {
    let first = metadata.body_lines.first()?;
    (!first.is_empty()).then(|| {
        Diagnostic::error("C015", "missing blank line between subject and body")
            .line(first.as_str())
    })
}
