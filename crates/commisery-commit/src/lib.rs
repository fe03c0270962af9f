//! Commit types and the Conventional Commits grammar for Commisery.
//!
//! This crate provides:
//! - [`RawCommit`]: A commit as retrieved from Git
//! - [`strip_message`]: Editor-style message clean-up
//! - [`CommitMetadata`]: A message split into subject components, body and footers

mod error;
mod footer;
mod message;
mod metadata;
mod raw;

pub use error::{CommitError, CommitResult};
pub use footer::Footer;
pub use message::strip_message;
pub use metadata::{CommitMetadata, Span};
pub use raw::RawCommit;
