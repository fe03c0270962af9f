//! Version value type for Commisery.
//!
//! This crate provides:
//! - [`Version`]: a prefix-aware `major.minor.patch[-prerelease][+build]` value
//! - [`BumpLevel`]: the ordered bump levels used by both bump engines
//! - [`BumpTransition`]: the outcome of a bump decision
//! - Release precedence helpers used to rank tags and draft releases

mod bump;
mod error;
mod ordering;
mod version;

pub use bump::{BumpLevel, BumpTransition};
pub use error::{VersionError, VersionResult};
pub use ordering::{compare_version_strings, latest};
pub use version::{PrereleaseOptions, Version};
