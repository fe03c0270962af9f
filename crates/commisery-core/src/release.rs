//! Bump orchestration.

use std::cmp::Ordering;
use std::collections::HashMap;

use commisery_commit::RawCommit;
use commisery_config::Config;
use commisery_git::{HostError, NewRelease, Release, ReleaseQuery, ReleaseUpdate, RepositoryHost};
use commisery_lint::ConventionalCommit;
use commisery_sdkver::{ReleaseType, SdkVerBumper, SdkVerRequest};
use commisery_semver::SemVerBumper;
use commisery_version::{BumpTransition, Version, latest};
use tracing::{debug, info, warn};

use crate::{BumpMetadata, BumpReport, CoreError, CoreResult, classify_commits};

/// The versioning policy to bump with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Strict semantic versioning driven by the commits.
    SemVer,
    /// SdkVer, moving towards the requested release type.
    SdkVer(ReleaseType),
}

/// Options of a single bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOptions {
    /// The versioning policy.
    pub strategy: Strategy,

    /// Decide the version without creating tags, branches or releases.
    pub dry_run: bool,

    /// Overrides the branch reported by the host.
    pub branch: Option<String>,
}

impl Default for BumpOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::SemVer,
            dry_run: false,
            branch: None,
        }
    }
}

/// A draft release and the version it names.
struct Draft {
    release: Release,
    version: Version,
}

/// Manages the release process on a repository host.
pub struct ReleaseManager<'a, H: RepositoryHost + ?Sized> {
    host: &'a H,
    config: &'a Config,
}

impl<'a, H: RepositoryHost + ?Sized> ReleaseManager<'a, H> {
    /// Creates a new release manager.
    #[must_use]
    pub fn new(host: &'a H, config: &'a Config) -> Self {
        Self { host, config }
    }

    /// Decides the next version and, unless `dry_run` is set, publishes it.
    ///
    /// Branches not matching `allowed-branches` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails, if the bump violates the
    /// versioning policy or if the tag or release branch to create already
    /// exists.
    pub fn bump(&self, options: &BumpOptions) -> CoreResult<BumpReport> {
        let branch = match &options.branch {
            Some(branch) => branch.clone(),
            None => self.host.current_branch()?,
        };

        if !self.config.is_branch_allowed(&branch)? {
            info!(
                %branch,
                allowed = %self.config.allowed_branches,
                "branch is not allowed to bump, skipping"
            );
            return Ok(BumpReport::skipped(
                branch,
                format!(
                    "branch does not match allowed-branches ({})",
                    self.config.allowed_branches
                ),
            ));
        }

        let release_branch = self.config.is_release_branch(&branch);
        info!(%branch, release_branch, "starting bump");

        let (tagged, commits) = self.find_current_version()?;
        let mut current = match &tagged {
            Some(version) => version.clone(),
            None => self.initial_version()?,
        };
        info!(
            %current,
            tagged = tagged.is_some(),
            commits = commits.len(),
            "found current version"
        );

        let classified = classify_commits(&commits, self.config);

        let (transition, release_type, draft) = match options.strategy {
            Strategy::SemVer => {
                let transition = SemVerBumper::from_config(self.config).bump(
                    &current,
                    &classified,
                    release_branch,
                )?;
                (transition, None, None)
            }
            Strategy::SdkVer(release_type) => {
                let draft = if release_branch {
                    None
                } else {
                    self.find_draft()?
                };

                let from_draft = draft
                    .as_ref()
                    .filter(|draft| draft.version.precedence(&current) == Ordering::Greater);
                if let Some(draft) = from_draft {
                    info!(draft = %draft.version, tag = %current, "continuing from draft release");
                    current = draft.version.clone();
                }

                let head_matches_tag = match &tagged {
                    Some(version) if from_draft.is_none() => {
                        self.host.current_head_matches_tag(&version.to_string())?
                    }
                    _ => false,
                };

                let transition = self.sdkver_bump(
                    &current,
                    release_type,
                    &classified,
                    &branch,
                    release_branch,
                    head_matches_tag,
                )?;
                (transition, Some(release_type), draft)
            }
        };

        if let Some(next) = &transition.to {
            info!(from = %current, to = %next, level = %transition.bump_level, "next version");
            if options.dry_run {
                info!("dry run, nothing published");
            } else {
                self.publish(next, release_type, release_branch, draft.as_ref(), &commits)?;
            }
        } else {
            info!(%current, "no version bump required");
        }

        Ok(BumpReport {
            branch,
            current_version: Some(current),
            next_version: transition.to.clone(),
            bump: BumpMetadata::from_transition(&transition),
            release_type,
            commits,
            skipped: None,
        })
    }

    fn sdkver_bump(
        &self,
        current: &Version,
        release_type: ReleaseType,
        commits: &[ConventionalCommit],
        branch: &str,
        release_branch: bool,
        head_matches_tag: bool,
    ) -> CoreResult<BumpTransition> {
        let head = self.host.head_sha()?;
        let short_sha = head.get(..7).unwrap_or(&head);
        let request = SdkVerRequest {
            current,
            release_type,
            breaking: commits.iter().any(|commit| commit.breaking_change),
            branch,
            release_branch,
            head_matches_tag,
            short_sha,
        };
        Ok(SdkVerBumper::from_config(self.config).bump(&request)?)
    }

    /// Walks back from HEAD to the nearest commit carrying a version tag.
    ///
    /// When several matching tags point at the same commit, the one with the
    /// highest precedence wins.
    fn find_current_version(&self) -> CoreResult<(Option<Version>, Vec<RawCommit>)> {
        let mut versions_by_sha: HashMap<String, Vec<Version>> = HashMap::new();
        for tag in self.host.list_all_tags()? {
            match Version::parse(&tag.name) {
                Some(version) if self.matches_prefix(&version) => {
                    versions_by_sha.entry(tag.sha).or_default().push(version);
                }
                _ => debug!(tag = %tag.name, "ignoring tag"),
            }
        }

        let mut matcher = |commit: &RawCommit| {
            versions_by_sha
                .get(&commit.hash)
                .and_then(|versions| latest(versions))
                .cloned()
        };
        Ok(self.host.match_commits_since(None, &mut matcher)?)
    }

    fn matches_prefix(&self, version: &Version) -> bool {
        self.config.accepts_any_prefix() || version.prefix() == self.config.version_prefix
    }

    fn initial_version(&self) -> CoreResult<Version> {
        let prefix = if self.config.accepts_any_prefix() {
            ""
        } else {
            &self.config.version_prefix
        };
        Ok(Version::new(0, 0, 0).with_prefix(prefix)?)
    }

    fn find_draft(&self) -> CoreResult<Option<Draft>> {
        let query = ReleaseQuery {
            prefix: &self.config.version_prefix,
            draft_only: true,
            ..ReleaseQuery::default()
        };
        let Some(release) = self.host.get_release_by_prefix(&query)? else {
            return Ok(None);
        };

        match Version::parse(&release.name) {
            Some(version) => Ok(Some(Draft { release, version })),
            None => {
                warn!(name = %release.name, "ignoring draft release without a version name");
                Ok(None)
            }
        }
    }

    fn publish(
        &self,
        next: &Version,
        release_type: Option<ReleaseType>,
        release_branch: bool,
        draft: Option<&Draft>,
        commits: &[RawCommit],
    ) -> CoreResult<()> {
        let sha = self.host.head_sha()?;
        let tag = next.to_string();
        let notes = release_notes(commits);

        match release_type {
            Some(ReleaseType::Dev) => {
                // Drafts carry no tag; fall back to one on hosts without releases.
                if !self.publish_release(draft, &tag, &sha, &notes, true, false)? {
                    self.create_tag(&tag, &sha)?;
                }
            }
            Some(ReleaseType::Rc) => {
                if !release_branch {
                    // The branch would outlive a tag conflict.
                    self.ensure_tag_free(&tag)?;
                    self.create_release_branch(next, &sha)?;
                }
                self.create_tag(&tag, &sha)?;
                self.publish_release(draft, &tag, &sha, &notes, false, true)?;
            }
            Some(ReleaseType::Rel) | None => {
                self.create_tag(&tag, &sha)?;
                self.publish_release(draft, &tag, &sha, &notes, false, false)?;
            }
        }
        Ok(())
    }

    /// Updates the open draft or creates a new release.
    ///
    /// Returns false if the host has no releases.
    fn publish_release(
        &self,
        draft: Option<&Draft>,
        tag: &str,
        sha: &str,
        body: &str,
        as_draft: bool,
        prerelease: bool,
    ) -> CoreResult<bool> {
        if let Some(draft) = draft {
            let update = ReleaseUpdate {
                name: tag,
                tag_name: tag,
                sha,
                body,
                draft: Some(as_draft),
                prerelease: Some(prerelease),
            };
            if self.host.update_draft_release(draft.release.id, &update)? {
                info!(id = draft.release.id, from = %draft.version, to = %tag, "updated draft release");
                return Ok(true);
            }
        }

        let release = NewRelease {
            tag_name: tag,
            sha,
            body,
            draft: as_draft,
            prerelease,
            discussion_category: None,
        };
        match self.host.create_release(&release)? {
            Some(created) => {
                info!(id = created.id, name = %created.name, draft = as_draft, "created release");
                Ok(true)
            }
            None => {
                debug!(%tag, "host does not support releases");
                Ok(false)
            }
        }
    }

    fn create_release_branch(&self, next: &Version, sha: &str) -> CoreResult<()> {
        let Some(prefix) = self.config.sdkver_create_release_branches.prefix() else {
            return Ok(());
        };
        let branch = format!(
            "{prefix}{}{}.{}",
            next.prefix(),
            next.major(),
            next.minor()
        );

        match self.host.create_branch(&branch, sha) {
            Ok(()) => {
                info!(%branch, %sha, "created release branch");
                Ok(())
            }
            Err(HostError::Conflict { sha, .. }) => Err(CoreError::BranchExists { branch, sha }),
            Err(err) => Err(err.into()),
        }
    }

    fn ensure_tag_free(&self, tag: &str) -> CoreResult<()> {
        match self.host.get_sha_for_tag(tag)? {
            Some(sha) => Err(CoreError::TagExists {
                tag: tag.to_string(),
                sha,
            }),
            None => Ok(()),
        }
    }

    fn create_tag(&self, tag: &str, sha: &str) -> CoreResult<()> {
        match self.host.create_tag(tag, sha) {
            Ok(()) => {
                info!(%tag, %sha, "created tag");
                Ok(())
            }
            Err(HostError::Conflict { sha, .. }) => Err(CoreError::TagExists {
                tag: tag.to_string(),
                sha,
            }),
            Err(err) => Err(err.into()),
        }
    }
}

fn release_notes(commits: &[RawCommit]) -> String {
    commits
        .iter()
        .map(|commit| commit.release_note() + "\n")
        .collect()
}
