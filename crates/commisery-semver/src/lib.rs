//! SemVer bump engine for Commisery.
//!
//! The required bump is the highest [`BumpLevel`] among the classified
//! commits:
//! - Breaking changes → Major
//! - `feat` → Minor
//! - `fix` and types configured with `bump = true` → Patch
//! - Other → None

mod error;

pub use error::{SemVerError, SemVerResult};

use commisery_config::Config;
use commisery_lint::ConventionalCommit;
use commisery_version::{BumpLevel, BumpTransition, Version};
use tracing::debug;

/// SemVer bump engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemVerBumper {
    initial_development: bool,
    max_major: u64,
}

impl SemVerBumper {
    /// Creates a bumper; `max_major` of `0` means unlimited.
    #[must_use]
    pub const fn new(initial_development: bool, max_major: u64) -> Self {
        Self {
            initial_development,
            max_major,
        }
    }

    /// Creates a bumper from `initial-development` and `sdkver-max-major`.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(config.initial_development, config.sdkver_max_major)
    }

    /// Returns the highest bump level among `commits`.
    #[must_use]
    pub fn determine(commits: &[ConventionalCommit]) -> BumpLevel {
        commits
            .iter()
            .map(|commit| commit.bump_level)
            .max()
            .unwrap_or_default()
    }

    /// Computes the next version from `current` and the commits since it.
    ///
    /// # Errors
    ///
    /// Returns [`SemVerError::ReleaseBranch`] when a release branch would
    /// need a major or minor bump.
    pub fn bump(
        &self,
        current: &Version,
        commits: &[ConventionalCommit],
        release_branch: bool,
    ) -> SemVerResult<BumpTransition> {
        self.apply(current, Self::determine(commits), release_branch)
    }

    /// Applies an already determined bump level to `current`.
    ///
    /// # Errors
    ///
    /// Returns [`SemVerError::ReleaseBranch`] when a release branch would
    /// need a major or minor bump.
    pub fn apply(
        &self,
        current: &Version,
        level: BumpLevel,
        release_branch: bool,
    ) -> SemVerResult<BumpTransition> {
        if release_branch && level >= BumpLevel::Minor {
            return Err(SemVerError::ReleaseBranch { level });
        }

        let level = if level == BumpLevel::Major
            && self.max_major > 0
            && current.major() >= self.max_major
        {
            debug!(max_major = self.max_major, "major version ceiling reached");
            BumpLevel::Minor
        } else {
            level
        };

        let next = current.bump(level, self.initial_development);
        debug!(%current, %level, next = ?next.as_ref().map(ToString::to_string), "semver bump");

        Ok(match next {
            Some(next) => BumpTransition::new(current.clone(), next, level),
            None => BumpTransition::unchanged(current.clone(), level),
        })
    }
}

impl Default for SemVerBumper {
    fn default() -> Self {
        Self::new(true, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commits(messages: &[&str]) -> Vec<ConventionalCommit> {
        messages
            .iter()
            .map(|m| ConventionalCommit::parse(m, &Config::default()).unwrap())
            .collect()
    }

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[test]
    fn test_determine() {
        assert_eq!(SemVerBumper::determine(&[]), BumpLevel::None);
        assert_eq!(
            SemVerBumper::determine(&commits(&["chore: x", "fix: y", "feat: z"])),
            BumpLevel::Minor
        );
        assert_eq!(
            SemVerBumper::determine(&commits(&["fix: y", "refactor!: drop api"])),
            BumpLevel::Major
        );
    }

    #[test]
    fn test_bump_minor() {
        let bumper = SemVerBumper::new(false, 0);
        let transition = bumper
            .bump(&v("v1.4.2"), &commits(&["fix: a", "feat: b"]), false)
            .unwrap();
        assert_eq!(transition.to.unwrap().to_string(), "v1.5.0");
        assert_eq!(transition.bump_level, BumpLevel::Minor);
    }

    #[test]
    fn test_no_bump() {
        let bumper = SemVerBumper::new(false, 0);
        let transition = bumper.bump(&v("1.0.0"), &commits(&["docs: x"]), false).unwrap();
        assert!(!transition.is_bump());
    }

    #[test]
    fn test_initial_development_demotes_major() {
        let bumper = SemVerBumper::new(true, 0);
        let transition = bumper
            .bump(&v("0.3.1"), &commits(&["feat!: rework"]), false)
            .unwrap();
        assert_eq!(transition.to.unwrap().to_string(), "0.4.0");
    }

    #[test]
    fn test_graduation() {
        let bumper = SemVerBumper::new(false, 0);
        let transition = bumper.bump(&v("0.3.1"), &commits(&["docs: x"]), false).unwrap();
        assert_eq!(transition.to.unwrap().to_string(), "1.0.0");
    }

    #[test]
    fn test_max_major_clamp() {
        let bumper = SemVerBumper::new(false, 2);
        let transition = bumper
            .bump(&v("2.1.0"), &commits(&["feat!: rework"]), false)
            .unwrap();
        assert_eq!(transition.to.unwrap().to_string(), "2.2.0");

        let transition = bumper
            .bump(&v("1.1.0"), &commits(&["feat!: rework"]), false)
            .unwrap();
        assert_eq!(transition.to.unwrap().to_string(), "2.0.0");
    }

    #[test]
    fn test_release_branch_policy() {
        let bumper = SemVerBumper::new(false, 0);
        let err = bumper
            .bump(&v("1.2.0"), &commits(&["feat: x"]), true)
            .unwrap_err();
        assert_eq!(err, SemVerError::ReleaseBranch { level: BumpLevel::Minor });

        let transition = bumper.bump(&v("1.2.0"), &commits(&["fix: x"]), true).unwrap();
        assert_eq!(transition.to.unwrap().to_string(), "1.2.1");
    }
}
