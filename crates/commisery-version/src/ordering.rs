//! Release precedence.
//!
//! Precedence, not creation order, decides which tag or draft release is the
//! latest one of a prefix.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::Version;

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("invalid regex"));

impl Version {
    /// Compares release precedence.
    ///
    /// Numbers compare numerically. With equal numbers a full release outranks
    /// any prerelease, a release candidate outranks other prereleases, then
    /// the first digit run of each prerelease compares numerically and finally
    /// the prerelease text lexicographically. Prefix and build metadata do not
    /// take part.
    #[must_use]
    pub fn precedence(&self, other: &Self) -> Ordering {
        self.major()
            .cmp(&other.major())
            .then(self.minor().cmp(&other.minor()))
            .then(self.patch().cmp(&other.patch()))
            .then_with(|| compare_prerelease(self.prerelease(), other.prerelease()))
    }
}

fn compare_prerelease(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    a.starts_with("rc")
        .cmp(&b.starts_with("rc"))
        .then_with(|| first_number(a).cmp(&first_number(b)))
        .then_with(|| a.cmp(b))
}

fn first_number(text: &str) -> Option<u64> {
    DIGITS_RE.find(text)?.as_str().parse().ok()
}

/// Total order over version strings.
///
/// Strings that are not versions rank below every version and compare
/// lexicographically among themselves; versions of equal precedence are
/// ordered by their text.
pub fn compare_version_strings(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Some(x), Some(y)) => x.precedence(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Returns the highest-precedence version.
pub fn latest<'a>(versions: impl IntoIterator<Item = &'a Version>) -> Option<&'a Version> {
    versions.into_iter().max_by(|a, b| a.precedence(b))
}
