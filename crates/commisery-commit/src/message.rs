//! Message clean-up applied before parsing.

use std::sync::LazyLock;

use regex::Regex;

static SCISSORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# -+ >8 -+").expect("invalid regex"));

/// Cleans a raw message the way `git commit --cleanup=scissors` would.
///
/// Everything from a scissors line (`# ------ >8 ------`) onwards is cut,
/// `#` comment lines are dropped, trailing whitespace is removed from every
/// line and leading or trailing blank lines are trimmed. Applying it twice
/// gives the same result as applying it once.
#[must_use]
pub fn strip_message(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .take_while(|line| !SCISSORS_RE.is_match(line))
        .filter(|line| !line.starts_with('#'))
        .map(str::trim_end)
        .collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
