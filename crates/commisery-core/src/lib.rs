//! Core library for Commisery.
//!
//! This crate provides the orchestration on top of the classifier and the
//! bump engines:
//! - [`ReleaseManager`]: finds the current version, decides the next one and
//!   publishes it through a [`commisery_git::RepositoryHost`]
//! - [`check_pull_request`]: the pull request gate

mod classify;
mod error;
mod gate;
mod release;
mod report;

pub use classify::classify_commits;
pub use error::{CoreError, CoreResult};
pub use gate::{GateFailure, GateReport, GateSource, check_pull_request, workflow_error};
pub use release::{BumpOptions, ReleaseManager, Strategy};
pub use report::{BumpMetadata, BumpReport};
