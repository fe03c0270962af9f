//! Local Git repository host.

use std::path::Path;

use chrono::{TimeZone, Utc};
use commisery_commit::RawCommit;
use commisery_version::Version;
use git2::{ErrorCode, Oid, Repository as Git2Repo};
use tracing::debug;

use crate::{
    HostError, HostResult, NewRelease, Release, ReleaseQuery, ReleaseUpdate, RepositoryHost, Tag,
};

/// A Git repository wrapper.
///
/// Releases are a hosting-platform concept, so a plain repository never has
/// any: lookups return `None` and updates report that nothing changed.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| HostError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository from the given directory upwards.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let inner =
            Git2Repo::discover(path).map_err(|_| HostError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the commits reachable from HEAD but not from `since`.
    ///
    /// `since` is any revision (`main`, a tag, a hash). If it is `None`, all
    /// commits are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision cannot be resolved.
    pub fn commits_since(&self, since: Option<&str>) -> HostResult<Vec<RawCommit>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;

        if let Some(rev) = since {
            let oid = self
                .inner
                .revparse_single(rev)
                .and_then(|object| object.peel_to_commit())
                .map_err(|_| HostError::NotFound(rev.to_string()))?
                .id();
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            commits.push(self.raw_commit(oid?)?);
        }
        Ok(commits)
    }

    fn raw_commit(&self, oid: Oid) -> HostResult<RawCommit> {
        let commit = self.inner.find_commit(oid)?;
        let author = commit.author();
        let time = commit.time();

        Ok(RawCommit::new(
            oid.to_string(),
            commit.message().unwrap_or(""),
            author.name().unwrap_or("Unknown"),
            author.email().unwrap_or(""),
            Utc.timestamp_opt(time.seconds(), 0)
                .single()
                .unwrap_or_else(Utc::now),
        ))
    }

    fn resolve_commit(&self, sha: &str) -> HostResult<git2::Commit<'_>> {
        let oid = Oid::from_str(sha).map_err(|_| HostError::NotFound(sha.to_string()))?;
        self.inner
            .find_commit(oid)
            .map_err(|_| HostError::NotFound(sha.to_string()))
    }
}

impl RepositoryHost for Repository {
    fn list_all_tags(&self) -> HostResult<Vec<Tag>> {
        let names = self.inner.tag_names(None)?;
        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            if let Some(sha) = self.get_sha_for_tag(name)? {
                tags.push(Tag::new(name, sha));
            }
        }
        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    fn match_commits_since(
        &self,
        sha: Option<&str>,
        matcher: &mut dyn FnMut(&RawCommit) -> Option<Version>,
    ) -> HostResult<(Option<Version>, Vec<RawCommit>)> {
        let mut revwalk = self.inner.revwalk()?;
        match sha {
            Some(sha) => revwalk.push(self.resolve_commit(sha)?.id())?,
            None => revwalk.push_head()?,
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.raw_commit(oid?)?;
            if let Some(version) = matcher(&commit) {
                debug!(%version, sha = commit.short_hash(), "matched version");
                return Ok((Some(version), commits));
            }
            commits.push(commit);
        }
        Ok((None, commits))
    }

    fn get_release_by_prefix(&self, query: &ReleaseQuery<'_>) -> HostResult<Option<Release>> {
        debug!(prefix = query.prefix, "local repository has no releases");
        Ok(None)
    }

    fn create_release(&self, release: &NewRelease<'_>) -> HostResult<Option<Release>> {
        debug!(tag = release.tag_name, "local repository cannot create releases");
        Ok(None)
    }

    fn create_tag(&self, tag_name: &str, sha: &str) -> HostResult<()> {
        if let Some(existing) = self.get_sha_for_tag(tag_name)? {
            return Err(HostError::Conflict {
                reference: tag_name.to_string(),
                sha: existing,
            });
        }

        let commit = self.resolve_commit(sha)?;
        self.inner
            .tag_lightweight(tag_name, commit.as_object(), false)?;
        debug!(tag = tag_name, sha, "created tag");
        Ok(())
    }

    fn create_branch(&self, name: &str, sha: &str) -> HostResult<()> {
        let commit = self.resolve_commit(sha)?;
        match self.inner.branch(name, &commit, false) {
            Ok(_) => {
                debug!(branch = name, sha, "created branch");
                Ok(())
            }
            Err(err) if err.code() == ErrorCode::Exists => {
                let existing = self
                    .inner
                    .find_branch(name, git2::BranchType::Local)?
                    .get()
                    .peel_to_commit()?
                    .id()
                    .to_string();
                Err(HostError::Conflict {
                    reference: name.to_string(),
                    sha: existing,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_draft_release(&self, id: u64, update: &ReleaseUpdate<'_>) -> HostResult<bool> {
        debug!(id, name = update.name, "local repository has no draft releases");
        Ok(false)
    }

    fn get_sha_for_tag(&self, tag: &str) -> HostResult<Option<String>> {
        match self.inner.find_reference(&format!("refs/tags/{tag}")) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id().to_string())),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn head_sha(&self) -> HostResult<String> {
        Ok(self.inner.head()?.peel_to_commit()?.id().to_string())
    }

    fn current_branch(&self) -> HostResult<String> {
        let head = self.inner.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }
}
