//! Bump levels and transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Version;

/// Version bump level, ordered `None < Patch < Minor < Major`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    /// No version bump needed.
    #[default]
    None,
    /// Patch version bump (bug fixes).
    Patch,
    /// Minor version bump (new features).
    Minor,
    /// Major version bump (breaking changes).
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::None => write!(f, "none"),
        }
    }
}

/// The outcome of a bump decision.
///
/// `to` is `None` when no transition applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpTransition {
    /// The version the decision started from.
    pub from: Version,

    /// The next version, if any.
    pub to: Option<Version>,

    /// The bump level that drove the decision.
    pub bump_level: BumpLevel,
}

impl BumpTransition {
    /// Creates a transition to a new version.
    #[must_use]
    pub fn new(from: Version, to: Version, bump_level: BumpLevel) -> Self {
        Self {
            from,
            to: Some(to),
            bump_level,
        }
    }

    /// Creates a transition that leaves the version untouched.
    #[must_use]
    pub fn unchanged(from: Version, bump_level: BumpLevel) -> Self {
        Self {
            from,
            to: None,
            bump_level,
        }
    }

    /// Returns true if the transition produces a new version.
    #[must_use]
    pub fn is_bump(&self) -> bool {
        self.to.is_some()
    }
}
