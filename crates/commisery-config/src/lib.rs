//! Configuration management for Commisery.
//!
//! This crate handles loading and validating the `.commisery.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_NAME, find_and_load_config, find_and_load_config_from, find_config_file_from,
    load_config,
};
pub use schema::{
    Config, DEFAULT_RELEASE_BRANCH_PREFIX, ReleaseBranches, TypeTag, default_tags,
};
