//! The repository host interface.

use commisery_commit::RawCommit;
use commisery_version::Version;
use serde::{Deserialize, Serialize};

use crate::HostResult;

/// A tag and the commit it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag name.
    pub name: String,

    /// The commit hash.
    pub sha: String,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
        }
    }
}

/// A release on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Host-specific release id.
    pub id: u64,

    /// The release name, normally the version.
    pub name: String,

    /// Whether the release is an unpublished draft.
    pub draft: bool,

    /// Whether the release is a prerelease.
    pub prerelease: bool,
}

/// Filter for [`RepositoryHost::get_release_by_prefix`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseQuery<'a> {
    /// Version prefix of the release name; `*` matches any.
    pub prefix: &'a str,

    /// Only consider drafts.
    pub draft_only: bool,

    /// Only consider published full releases.
    pub full_releases_only: bool,

    /// Only consider releases of this `major.minor`.
    pub major_minor: Option<(u64, u64)>,
}

/// Arguments of [`RepositoryHost::create_release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRelease<'a> {
    /// Tag (and name) of the release.
    pub tag_name: &'a str,

    /// Commit to release.
    pub sha: &'a str,

    /// Release notes.
    pub body: &'a str,

    /// Create as draft.
    pub draft: bool,

    /// Mark as prerelease.
    pub prerelease: bool,

    /// Discussion category to announce the release in.
    pub discussion_category: Option<&'a str>,
}

/// Arguments of [`RepositoryHost::update_draft_release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseUpdate<'a> {
    /// New release name.
    pub name: &'a str,

    /// New tag name.
    pub tag_name: &'a str,

    /// Commit to point at.
    pub sha: &'a str,

    /// New release notes.
    pub body: &'a str,

    /// Change the draft flag.
    pub draft: Option<bool>,

    /// Change the prerelease flag.
    pub prerelease: Option<bool>,
}

/// What the bump orchestrator needs from a hosting platform.
///
/// Calls are issued sequentially. Retrying transport failures is left to
/// implementations.
pub trait RepositoryHost {
    /// Lists every tag with the commit it points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    fn list_all_tags(&self) -> HostResult<Vec<Tag>>;

    /// Walks history newest-first from `sha` (HEAD when `None`) and stops
    /// at the first commit for which `matcher` returns a version.
    ///
    /// Returns that version and the commits visited before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be walked.
    fn match_commits_since(
        &self,
        sha: Option<&str>,
        matcher: &mut dyn FnMut(&RawCommit) -> Option<Version>,
    ) -> HostResult<(Option<Version>, Vec<RawCommit>)>;

    /// Returns the latest release matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the releases cannot be listed.
    fn get_release_by_prefix(&self, query: &ReleaseQuery<'_>) -> HostResult<Option<Release>>;

    /// Creates a release; `None` if the host does not support releases.
    ///
    /// # Errors
    ///
    /// Returns an error if the release cannot be created.
    fn create_release(&self, release: &NewRelease<'_>) -> HostResult<Option<Release>>;

    /// Creates a tag on `sha`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HostError::Conflict`] if the tag already exists.
    fn create_tag(&self, tag_name: &str, sha: &str) -> HostResult<()>;

    /// Creates a branch on `sha`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HostError::Conflict`] if the branch already exists.
    fn create_branch(&self, name: &str, sha: &str) -> HostResult<()>;

    /// Updates a draft release; `false` if nothing was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn update_draft_release(&self, id: u64, update: &ReleaseUpdate<'_>) -> HostResult<bool>;

    /// Returns the commit a tag points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be resolved.
    fn get_sha_for_tag(&self, tag: &str) -> HostResult<Option<String>>;

    /// Returns true if HEAD is the commit `tag` points to.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD or the tag cannot be resolved.
    fn current_head_matches_tag(&self, tag: &str) -> HostResult<bool> {
        Ok(self.get_sha_for_tag(tag)? == Some(self.head_sha()?))
    }

    /// Returns the commit hash of HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved.
    fn head_sha(&self) -> HostResult<String>;

    /// Returns the name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved.
    fn current_branch(&self) -> HostResult<String>;
}
