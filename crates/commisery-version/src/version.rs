//! Version value type.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BumpLevel, VersionError, VersionResult};

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>[A-Za-z-]*)(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)(?:-(?P<prerelease>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+(?P<build>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("invalid regex")
});

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z-]*$").expect("invalid regex"));

static IDENTIFIERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*$").expect("invalid regex"));

static COUNTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<pre>.*?)(?P<digits>[0-9]+)(?P<post>.*)$").expect("invalid regex")
});

/// A parsed version: `prefix? major.minor.patch(-prerelease)?(+build)?`.
///
/// Values are immutable; every operation returns a new version. Formatting is
/// the exact inverse of [`Version::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: String,
    build: String,
    prefix: String,
}

/// Options for [`Version::next_prerelease`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrereleaseOptions {
    /// Replaces the text before the counter.
    pub prefix: Option<String>,

    /// Replaces the text after the counter.
    pub suffix: Option<String>,

    /// Minimum number of digits of the counter, zero-padded.
    pub min_width: usize,
}

impl Version {
    /// Creates a plain `major.minor.patch` version.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: String::new(),
            build: String::new(),
            prefix: String::new(),
        }
    }

    /// Parses a version string.
    ///
    /// Returns `None` when the text deviates from the grammar in any way,
    /// including numeric fields with leading zeros or values that overflow.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let captures = VERSION_RE.captures(text)?;
        let number = |name: &str| captures.name(name)?.as_str().parse::<u64>().ok();
        let text_of = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Some(Self {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            prerelease: text_of("prerelease"),
            build: text_of("build"),
            prefix: text_of("prefix"),
        })
    }

    /// Sets the prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix contains anything but letters and hyphens.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> VersionResult<Self> {
        let prefix = prefix.into();
        if !PREFIX_RE.is_match(&prefix) {
            return Err(VersionError::InvalidPrefix(prefix));
        }
        self.prefix = prefix;
        Ok(self)
    }

    /// Sets the prerelease; an empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the prerelease is not a dot-separated sequence of
    /// `[0-9A-Za-z-]+` identifiers.
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> VersionResult<Self> {
        let prerelease = prerelease.into();
        if !prerelease.is_empty() && !IDENTIFIERS_RE.is_match(&prerelease) {
            return Err(VersionError::InvalidPrerelease(prerelease));
        }
        self.prerelease = prerelease;
        Ok(self)
    }

    /// Sets the build metadata; an empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the build metadata contains an empty segment or a
    /// character outside `[0-9A-Za-z-]`.
    pub fn with_build(mut self, build: impl Into<String>) -> VersionResult<Self> {
        let build = build.into();
        semver::BuildMetadata::new(&build).map_err(|e| VersionError::InvalidBuild {
            build: build.clone(),
            reason: e.to_string(),
        })?;
        self.build = build;
        Ok(self)
    }

    /// Returns the major version.
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    /// Returns the minor version.
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// Returns the patch version.
    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    /// Returns the prerelease, empty when absent.
    #[must_use]
    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    /// Returns the build metadata, empty when absent.
    #[must_use]
    pub fn build(&self) -> &str {
        &self.build
    }

    /// Returns the prefix, empty when absent.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if the version carries a prerelease.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Returns true if the prerelease is a release candidate (`rc...`).
    #[must_use]
    pub fn is_release_candidate(&self) -> bool {
        self.prerelease.starts_with("rc")
    }

    /// Returns the next major version, keeping the prefix.
    #[must_use]
    pub fn next_major(&self) -> Self {
        self.release(self.major.saturating_add(1), 0, 0)
    }

    /// Returns the next minor version, keeping the prefix.
    #[must_use]
    pub fn next_minor(&self) -> Self {
        self.release(self.major, self.minor.saturating_add(1), 0)
    }

    /// Returns the next patch version, keeping the prefix.
    #[must_use]
    pub fn next_patch(&self) -> Self {
        self.release(self.major, self.minor, self.patch.saturating_add(1))
    }

    /// Returns this version without prerelease and build metadata.
    #[must_use]
    pub fn finalized(&self) -> Self {
        self.release(self.major, self.minor, self.patch)
    }

    /// Increments the first run of digits in the prerelease.
    ///
    /// The text around the counter can be replaced through `options`, and the
    /// counter is zero-padded to `options.min_width` (or to its original width
    /// if that is larger). Build metadata is cleared.
    ///
    /// Returns `None` if the prerelease contains no digits, or if the
    /// replacement text would produce an invalid prerelease.
    #[must_use]
    pub fn next_prerelease(&self, options: &PrereleaseOptions) -> Option<Self> {
        let captures = COUNTER_RE.captures(&self.prerelease)?;
        let digits = captures.name("digits")?.as_str();
        let counter = digits.parse::<u64>().ok()?.checked_add(1)?;
        let width = options.min_width.max(digits.len());

        let pre = options
            .prefix
            .as_deref()
            .unwrap_or_else(|| captures.name("pre").map_or("", |m| m.as_str()));
        let post = options
            .suffix
            .as_deref()
            .unwrap_or_else(|| captures.name("post").map_or("", |m| m.as_str()));

        let prerelease = format!("{pre}{counter:0width$}{post}");
        if !IDENTIFIERS_RE.is_match(&prerelease) {
            return None;
        }

        Some(Self {
            prerelease,
            build: String::new(),
            ..self.clone()
        })
    }

    /// Applies a bump level.
    ///
    /// Outside initial development a `0.y.z` version always graduates to
    /// `1.0.0`, whatever the requested level. During initial development a
    /// major bump of a `0.y.z` version is demoted to a minor bump.
    ///
    /// Returns `None` when no transition applies.
    #[must_use]
    pub fn bump(&self, level: BumpLevel, initial_development: bool) -> Option<Self> {
        if !initial_development && self.major == 0 {
            return Some(self.release(1, 0, 0));
        }

        match level {
            BumpLevel::Major if initial_development && self.major == 0 => Some(self.next_minor()),
            BumpLevel::Major => Some(self.next_major()),
            BumpLevel::Minor => Some(self.next_minor()),
            BumpLevel::Patch => Some(self.next_patch()),
            BumpLevel::None => None,
        }
    }

    fn release(&self, major: u64, minor: u64, patch: u64) -> Self {
        Self {
            prefix: self.prefix.clone(),
            ..Self::new(major, minor, patch)
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.prefix, self.major, self.minor, self.patch
        )?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> VersionResult<Self> {
        Self::parse(s).ok_or_else(|| VersionError::Invalid(s.to_string()))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
