//! SdkVer release types.

use std::fmt;
use std::str::FromStr;

use commisery_version::Version;
use serde::{Deserialize, Serialize};

use crate::SdkVerError;

/// The kind of an SdkVer version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// A development build.
    Dev,
    /// A release candidate.
    Rc,
    /// A release.
    Rel,
}

impl ReleaseType {
    /// Derives the release type of a version from its prerelease.
    #[must_use]
    pub fn of(version: &Version) -> Self {
        if version.is_release_candidate() {
            Self::Rc
        } else if version.is_prerelease() {
            Self::Dev
        } else {
            Self::Rel
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Rc => write!(f, "rc"),
            Self::Rel => write!(f, "rel"),
        }
    }
}

impl FromStr for ReleaseType {
    type Err = SdkVerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "rc" => Ok(Self::Rc),
            "rel" | "release" => Ok(Self::Rel),
            other => Err(SdkVerError::UnknownReleaseType(other.to_string())),
        }
    }
}
