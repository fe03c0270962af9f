//! Repository host abstraction for Commisery.
//!
//! This crate provides:
//! - [`RepositoryHost`]: The operations the bump orchestrator needs from a
//!   hosting platform (tags, history, releases, branches)
//! - [`Repository`]: A local Git implementation backed by `git2`

mod error;
mod host;
mod repository;

pub use error::{HostError, HostResult};
pub use host::{NewRelease, Release, ReleaseQuery, ReleaseUpdate, RepositoryHost, Tag};
pub use repository::Repository;
