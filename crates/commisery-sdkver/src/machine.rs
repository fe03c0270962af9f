//! The SdkVer transition table.

use std::sync::LazyLock;

use commisery_config::Config;
use commisery_version::{BumpLevel, BumpTransition, PrereleaseOptions, Version};
use regex::Regex;
use tracing::debug;

use crate::{ReleaseType, SdkVerError, SdkVerResult};

static COUNTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z-]*[0-9]+").expect("invalid regex"));

/// Input of a single SdkVer decision.
#[derive(Debug, Clone, Copy)]
pub struct SdkVerRequest<'a> {
    /// The version to start from.
    pub current: &'a Version,

    /// The requested release type.
    pub release_type: ReleaseType,

    /// Whether the commits since `current` contain a breaking change.
    pub breaking: bool,

    /// The branch being bumped.
    pub branch: &'a str,

    /// Whether `branch` is a release branch.
    pub release_branch: bool,

    /// Whether HEAD already carries the tag of `current`.
    pub head_matches_tag: bool,

    /// Short hash of HEAD, appended to development versions.
    pub short_sha: &'a str,
}

/// SdkVer bump state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkVerBumper {
    initial_development: bool,
    max_major: u64,
}

impl SdkVerBumper {
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

    /// Decides the next version.
    ///
    /// Guards run in a fixed order before the table lookup: an already
    /// tagged HEAD is a no-op, breaking changes are refused on release
    /// branches, the major ceiling turns breaking changes into non-breaking
    /// ones, and finally `0.y.z` versions either stay in initial development
    /// or graduate.
    ///
    /// # Errors
    ///
    /// Returns an error for breaking changes on a release branch, for a
    /// development version on a release branch, or if the computed
    /// prerelease is invalid.
    pub fn bump(&self, request: &SdkVerRequest<'_>) -> SdkVerResult<BumpTransition> {
        let current = request.current;

        if request.head_matches_tag {
            debug!(%current, "HEAD is already tagged");
            return Ok(BumpTransition::unchanged(current.clone(), BumpLevel::None));
        }
        if request.breaking && request.release_branch {
            return Err(SdkVerError::BreakingOnReleaseBranch(
                request.branch.to_string(),
            ));
        }

        let mut breaking = request.breaking;
        if self.max_major > 0 && current.major() >= self.max_major {
            debug!(max_major = self.max_major, "major version ceiling reached");
            breaking = false;
        }
        if current.major() == 0 {
            if self.initial_development {
                breaking = false;
            } else if !request.release_branch {
                breaking = true;
            }
        }

        let current_type = ReleaseType::of(current);
        let transition = lookup(current_type, request.release_type, request.release_branch)
            .ok_or_else(|| SdkVerError::DevOnReleaseBranch(current.to_string()))?;

        let next = transition(
            current,
            &Step {
                breaking,
                sha: request.short_sha,
            },
        )?;
        debug!(
            %current,
            %next,
            from = %current_type,
            to = %request.release_type,
            release_branch = request.release_branch,
            breaking,
            "sdkver bump"
        );

        let level = level_between(current, &next);
        Ok(BumpTransition::new(current.clone(), next, level))
    }
}

impl Default for SdkVerBumper {
    fn default() -> Self {
        Self::new(true, 0)
    }
}

struct Step<'a> {
    breaking: bool,
    sha: &'a str,
}

type Transition = fn(&Version, &Step<'_>) -> SdkVerResult<Version>;

/// `None` marks the unreachable development-on-release-branch cases.
fn lookup(current: ReleaseType, requested: ReleaseType, release_branch: bool) -> Option<Transition> {
    use ReleaseType::{Dev, Rc, Rel};

    let transition: Transition = match (current, requested, release_branch) {
        (Dev, _, true) => return None,
        (Dev, Dev, false) => next_dev,
        (Dev, Rc, false) => promote_to_rc,
        (Rel, Rc, false) => start_next_rc,
        (Rc, Rc, false) => next_rc_or_major,
        (Rc | Rel, Dev, false) => start_next_dev,
        (Dev | Rc, Rel, _) => finalize,
        (Rel, Rel, false) => next_release,
        (Rc, Dev | Rc, true) => next_rc,
        (Rel, _, true) => next_patch,
    };
    Some(transition)
}

fn on_major_boundary(version: &Version) -> bool {
    version.minor() == 0 && version.patch() == 0
}

/// The release the current prerelease leads to.
fn release_of(current: &Version, breaking: bool) -> Version {
    if breaking && !on_major_boundary(current) {
        current.next_major()
    } else {
        current.finalized()
    }
}

/// The release after the current one.
fn release_after(current: &Version, breaking: bool) -> Version {
    if breaking {
        current.next_major()
    } else {
        current.next_minor()
    }
}

fn sha_suffix(sha: &str) -> String {
    if sha.is_empty() {
        String::new()
    } else {
        format!(".{sha}")
    }
}

fn first_dev(base: Version, sha: &str) -> SdkVerResult<Version> {
    Ok(base.with_prerelease(format!("dev001{}", sha_suffix(sha)))?)
}

fn first_rc(base: Version) -> SdkVerResult<Version> {
    Ok(base.with_prerelease("rc01")?)
}

fn next_dev(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    if step.breaking && !on_major_boundary(current) {
        return first_dev(current.next_major(), step.sha);
    }

    if COUNTER_RE.is_match(current.prerelease()) {
        let options = PrereleaseOptions {
            prefix: Some("dev".to_string()),
            suffix: Some(sha_suffix(step.sha)),
            min_width: 3,
        };
        if let Some(next) = current.next_prerelease(&options) {
            return Ok(next);
        }
    }

    first_dev(release_after(current, step.breaking), step.sha)
}

fn promote_to_rc(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    first_rc(release_of(current, step.breaking))
}

fn start_next_rc(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    first_rc(release_after(current, step.breaking))
}

fn next_rc_or_major(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    if step.breaking && !on_major_boundary(current) {
        return first_rc(current.next_major());
    }
    next_rc(current, step)
}

fn next_rc(current: &Version, _: &Step<'_>) -> SdkVerResult<Version> {
    let options = PrereleaseOptions {
        prefix: Some("rc".to_string()),
        suffix: Some(String::new()),
        min_width: 2,
    };
    match current.next_prerelease(&options) {
        Some(next) => Ok(next),
        None => first_rc(current.finalized()),
    }
}

fn start_next_dev(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    first_dev(release_after(current, step.breaking), step.sha)
}

fn finalize(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    Ok(release_of(current, step.breaking))
}

fn next_release(current: &Version, step: &Step<'_>) -> SdkVerResult<Version> {
    Ok(release_after(current, step.breaking))
}

fn next_patch(current: &Version, _: &Step<'_>) -> SdkVerResult<Version> {
    Ok(current.next_patch())
}

fn level_between(from: &Version, to: &Version) -> BumpLevel {
    if to.major() != from.major() {
        BumpLevel::Major
    } else if to.minor() != from.minor() {
        BumpLevel::Minor
    } else if to.patch() != from.patch() {
        BumpLevel::Patch
    } else {
        BumpLevel::None
    }
}
