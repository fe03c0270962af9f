//! Subcommands.

pub mod bump;
pub mod check;
pub mod gate;
pub mod rules;

use std::path::Path;

use anyhow::{Context, Result};
use commisery_config::{Config, find_and_load_config, load_config as load_config_file};
use commisery_lint::unknown_rule_ids;
use tracing::warn;

/// Loads the configuration from `path` or the nearest `.commisery.toml`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => load_config_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => find_and_load_config().context("failed to load configuration")?,
    };

    for id in unknown_rule_ids(&config) {
        warn!(rule = id, "unknown rule id in configuration");
    }
    Ok(config)
}
