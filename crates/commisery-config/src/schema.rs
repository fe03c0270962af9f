//! Configuration schema.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{ConfigError, ConfigResult};

/// Release branch prefix used when none is configured.
pub const DEFAULT_RELEASE_BRANCH_PREFIX: &str = "release/";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Rule ids to disable.
    #[serde(default)]
    pub disable: Vec<String>,

    /// Rule ids to enable, including opt-in rules.
    #[serde(default)]
    pub enable: Vec<String>,

    /// Maximum subject length in characters.
    #[serde(default = "default_max_subject_length")]
    pub max_subject_length: usize,

    /// Regex of branches on which bumping is allowed.
    #[serde(default = "default_allowed_branches")]
    pub allowed_branches: String,

    /// Prefix of version tags; `*` accepts any prefix.
    #[serde(default)]
    pub version_prefix: String,

    /// Whether the project is still in initial development (`0.y.z`).
    #[serde(default = "default_true")]
    pub initial_development: bool,

    /// Highest major version SdkVer may reach; `0` means unlimited.
    #[serde(default)]
    pub sdkver_max_major: u64,

    /// Whether SdkVer creates release branches, optionally with a prefix.
    #[serde(default)]
    pub sdkver_create_release_branches: ReleaseBranches,

    /// Accepted type tags, merged over [`default_tags`].
    #[serde(default = "default_tags", deserialize_with = "merge_tags")]
    pub tags: BTreeMap<String, TypeTag>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disable: Vec::new(),
            enable: Vec::new(),
            max_subject_length: default_max_subject_length(),
            allowed_branches: default_allowed_branches(),
            version_prefix: String::new(),
            initial_development: true,
            sdkver_max_major: 0,
            sdkver_create_release_branches: ReleaseBranches::default(),
            tags: default_tags(),
        }
    }
}

impl Config {
    /// Checks values that deserialization cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if `allowed-branches` is not a valid regex or
    /// `max-subject-length` is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_subject_length == 0 {
            return Err(ConfigError::SubjectLength);
        }
        self.allowed_branches_regex()?;
        Ok(())
    }

    /// Returns true if bumping is allowed on `branch`.
    ///
    /// The pattern is anchored at the start of the branch name only.
    ///
    /// # Errors
    ///
    /// Returns an error if `allowed-branches` is not a valid regex.
    pub fn is_branch_allowed(&self, branch: &str) -> ConfigResult<bool> {
        Ok(self.allowed_branches_regex()?.is_match(branch))
    }

    fn allowed_branches_regex(&self) -> ConfigResult<Regex> {
        Regex::new(&format!("^(?:{})", self.allowed_branches)).map_err(|source| {
            ConfigError::AllowedBranches {
                pattern: self.allowed_branches.clone(),
                source,
            }
        })
    }

    /// Returns the prefix that marks release branches.
    #[must_use]
    pub fn release_branch_prefix(&self) -> &str {
        match &self.sdkver_create_release_branches {
            ReleaseBranches::Prefix(prefix) => prefix,
            ReleaseBranches::Enabled(_) => DEFAULT_RELEASE_BRANCH_PREFIX,
        }
    }

    /// Returns true if `branch` is a release branch.
    #[must_use]
    pub fn is_release_branch(&self, branch: &str) -> bool {
        branch.starts_with(self.release_branch_prefix())
    }

    /// Returns true if tags with any version prefix are accepted.
    #[must_use]
    pub fn accepts_any_prefix(&self) -> bool {
        self.version_prefix == "*"
    }

    /// Returns true if `type` is configured to bump the patch level.
    #[must_use]
    pub fn bumps_patch(&self, r#type: &str) -> bool {
        self.tags.get(r#type).is_some_and(|tag| tag.bump)
    }
}

/// An accepted commit type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag {
    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Whether commits of this type bump the patch level.
    #[serde(default)]
    pub bump: bool,
}

impl TypeTag {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            bump: false,
        }
    }
}

/// The `sdkver-create-release-branches` setting: a flag or a branch prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseBranches {
    /// Enabled with the default prefix, or disabled.
    Enabled(bool),

    /// Enabled with a custom prefix.
    Prefix(String),
}

impl Default for ReleaseBranches {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl ReleaseBranches {
    /// Returns the prefix of branches to create, or `None` when disabled.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Enabled(false) => None,
            Self::Enabled(true) => Some(DEFAULT_RELEASE_BRANCH_PREFIX),
            Self::Prefix(prefix) => Some(prefix),
        }
    }
}

/// The type tags accepted when nothing is configured.
#[must_use]
pub fn default_tags() -> BTreeMap<String, TypeTag> {
    [
        ("feat", "A new feature"),
        ("fix", "A bug fix"),
        (
            "build",
            "Changes that affect the build system or external dependencies",
        ),
        ("chore", "Other changes that do not modify source or test files"),
        ("ci", "Changes to CI configuration files and scripts"),
        ("docs", "Documentation only changes"),
        ("perf", "A code change that improves performance"),
        (
            "refactor",
            "A code change that neither fixes a bug nor adds a feature",
        ),
        ("revert", "Reverts a previous commit"),
        (
            "style",
            "Changes that do not affect the meaning of the code",
        ),
        ("test", "Adding missing tests or correcting existing tests"),
        ("improvement", "An improvement to a current feature"),
    ]
    .into_iter()
    .map(|(name, description)| (name.to_string(), TypeTag::new(description)))
    .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Description(String),
    Table {
        description: Option<String>,
        bump: Option<bool>,
    },
    Enabled(bool),
}

fn merge_tags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, TypeTag>, D::Error> {
    let entries = BTreeMap::<String, TagEntry>::deserialize(deserializer)?;
    let mut tags = default_tags();

    for (name, entry) in entries {
        match entry {
            TagEntry::Enabled(false) => {
                tags.remove(&name);
            }
            TagEntry::Enabled(true) => {
                tags.entry(name).or_default();
            }
            TagEntry::Description(description) => {
                tags.entry(name).or_default().description = description;
            }
            TagEntry::Table { description, bump } => {
                let tag = tags.entry(name).or_default();
                if let Some(description) = description {
                    tag.description = description;
                }
                if let Some(bump) = bump {
                    tag.bump = bump;
                }
            }
        }
    }

    Ok(tags)
}

fn default_max_subject_length() -> usize {
    80
}

fn default_allowed_branches() -> String {
    ".*".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_subject_length, 80);
        assert_eq!(config.allowed_branches, ".*");
        assert!(config.initial_development);
        assert_eq!(config.sdkver_max_major, 0);
        assert_eq!(config.sdkver_create_release_branches.prefix(), None);
        assert_eq!(config.tags.len(), 12);
        assert!(config.tags.contains_key("improvement"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            disable = ["C014", "C016"]
            enable = ["C022"]
            max-subject-length = 72
            allowed-branches = "^(main|release/.*)$"
            version-prefix = "v"
            initial-development = false
            sdkver-max-major = 3
            sdkver-create-release-branches = "rel-"

            [tags]
            hotfix = { description = "An urgent fix", bump = true }
            deps = "Dependency updates"
            style = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.disable, vec!["C014", "C016"]);
        assert_eq!(config.enable, vec!["C022"]);
        assert_eq!(config.max_subject_length, 72);
        assert_eq!(config.version_prefix, "v");
        assert!(!config.initial_development);
        assert_eq!(config.sdkver_max_major, 3);
        assert_eq!(
            config.sdkver_create_release_branches,
            ReleaseBranches::Prefix("rel-".to_string())
        );

        assert!(config.bumps_patch("hotfix"));
        assert!(!config.bumps_patch("deps"));
        assert_eq!(config.tags["deps"].description, "Dependency updates");
        assert!(!config.tags.contains_key("style"));
        assert!(config.tags.contains_key("feat"));
    }

    #[test]
    fn test_tag_override_keeps_description() {
        let config: Config = toml::from_str("[tags]\nchore = { bump = true }").unwrap();
        assert!(config.bumps_patch("chore"));
        assert!(config.tags["chore"].description.starts_with("Other changes"));
    }

    #[test]
    fn test_release_branches_flag() {
        let config: Config = toml::from_str("sdkver-create-release-branches = true").unwrap();
        assert_eq!(
            config.sdkver_create_release_branches.prefix(),
            Some(DEFAULT_RELEASE_BRANCH_PREFIX)
        );
        assert!(config.is_release_branch("release/1.2"));
        assert!(!config.is_release_branch("main"));

        let config: Config = toml::from_str("sdkver-create-release-branches = \"rel-\"").unwrap();
        assert!(config.is_release_branch("rel-2.0"));
        assert!(!config.is_release_branch("release/2.0"));
    }

    #[test]
    fn test_branch_allowed() {
        let config = Config {
            allowed_branches: "main|release/.*".to_string(),
            ..Config::default()
        };
        assert!(config.is_branch_allowed("main").unwrap());
        assert!(config.is_branch_allowed("release/1.0").unwrap());
        assert!(!config.is_branch_allowed("feature/x").unwrap());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            allowed_branches: "(".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AllowedBranches { .. })
        ));

        let config = Config {
            max_subject_length: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SubjectLength)));
    }

    #[test]
    fn test_any_prefix() {
        let config: Config = toml::from_str("version-prefix = \"*\"").unwrap();
        assert!(config.accepts_any_prefix());
        assert!(!Config::default().accepts_any_prefix());
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("max-subject-length = 80"));
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }
}
