//! SdkVer bump state machine for Commisery.
//!
//! SdkVer layers three release types on top of SemVer:
//! - `dev`: development builds, `1.2.0-dev003.1a2b3c4`
//! - `rc`: release candidates, `1.2.0-rc02`
//! - `rel`: releases, `1.2.0`
//!
//! The next version is looked up in a table keyed by the current release
//! type, the requested release type and whether the bump runs on a release
//! branch.

mod error;
mod machine;
mod release_type;

pub use error::{SdkVerError, SdkVerResult};
pub use machine::{SdkVerBumper, SdkVerRequest};
pub use release_type::ReleaseType;
