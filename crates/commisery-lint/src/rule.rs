//! Rule registry.

use std::fmt;

use commisery_commit::CommitMetadata;
use commisery_config::Config;
use tracing::trace;

use crate::{Diagnostic, rules::REGISTRY};

/// Signature shared by every rule check.
pub(crate) type Check = fn(&CommitMetadata, &Config) -> Option<Diagnostic>;

/// A validation rule.
///
/// Rules share no state; each one inspects the metadata and reports at most
/// one diagnostic carrying its own id.
#[derive(Clone, Copy)]
pub struct RuleDescriptor {
    /// Stable rule id, e.g. `C001`.
    pub id: &'static str,

    /// What the rule enforces.
    pub description: &'static str,

    /// Whether the rule runs without being listed in `enable`.
    pub enabled_by_default: bool,

    check: Check,
}

impl RuleDescriptor {
    pub(crate) const fn new(
        id: &'static str,
        description: &'static str,
        enabled_by_default: bool,
        check: Check,
    ) -> Self {
        Self {
            id,
            description,
            enabled_by_default,
            check,
        }
    }

    /// Runs the rule.
    #[must_use]
    pub fn validate(&self, metadata: &CommitMetadata, config: &Config) -> Option<Diagnostic> {
        (self.check)(metadata, config)
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("enabled_by_default", &self.enabled_by_default)
            .finish_non_exhaustive()
    }
}

/// Returns every rule, ordered by id.
#[must_use]
pub fn rules() -> &'static [RuleDescriptor] {
    REGISTRY
}

/// Looks up a rule by id.
#[must_use]
pub fn find_rule(id: &str) -> Option<&'static RuleDescriptor> {
    REGISTRY.iter().find(|rule| rule.id == id)
}

/// Returns true if `rule` runs under `config`.
///
/// `enable` wins over `disable` and over the default.
#[must_use]
pub fn is_enabled(rule: &RuleDescriptor, config: &Config) -> bool {
    let listed = |ids: &[String]| ids.iter().any(|id| id == rule.id);
    listed(&config.enable) || (rule.enabled_by_default && !listed(&config.disable))
}

/// Returns ids in `enable` or `disable` that name no rule.
#[must_use]
pub fn unknown_rule_ids(config: &Config) -> Vec<&str> {
    config
        .enable
        .iter()
        .chain(&config.disable)
        .map(String::as_str)
        .filter(|id| find_rule(id).is_none())
        .collect()
}

/// Runs every enabled rule and collects all diagnostics.
#[must_use]
pub fn validate(metadata: &CommitMetadata, config: &Config) -> Vec<Diagnostic> {
    REGISTRY
        .iter()
        .filter(|rule| is_enabled(rule, config))
        .filter_map(|rule| {
            let diagnostic = rule.validate(metadata, config);
            if diagnostic.is_some() {
                trace!(rule = rule.id, subject = %metadata.subject, "rule violated");
            }
            diagnostic
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(enable: &[&str], disable: &[&str]) -> Config {
        Config {
            enable: enable.iter().map(ToString::to_string).collect(),
            disable: disable.iter().map(ToString::to_string).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn test_registry_ids_are_unique_and_sorted() {
        let ids: Vec<&str> = rules().iter().map(|rule| rule.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 22);
        assert_eq!(ids.first(), Some(&"C001"));
        assert_eq!(ids.last(), Some(&"C022"));
    }

    #[test]
    fn test_find_rule() {
        assert_eq!(find_rule("C004").unwrap().id, "C004");
        assert!(find_rule("C999").is_none());
    }

    #[test]
    fn test_is_enabled() {
        let c001 = find_rule("C001").unwrap();
        let c022 = find_rule("C022").unwrap();

        let config = Config::default();
        assert!(is_enabled(c001, &config));
        assert!(!is_enabled(c022, &config));

        let config = config_with(&["C022"], &["C001"]);
        assert!(!is_enabled(c001, &config));
        assert!(is_enabled(c022, &config));

        let config = config_with(&["C001"], &["C001"]);
        assert!(is_enabled(c001, &config));
    }

    #[test]
    fn test_unknown_rule_ids() {
        let config = config_with(&["C022", "X1"], &["C999"]);
        assert_eq!(unknown_rule_ids(&config), vec!["X1", "C999"]);
    }

    #[test]
    fn test_validate_collects_all() {
        let metadata = CommitMetadata::parse("Feat : Add thing.").unwrap();
        let ids: Vec<String> = validate(&metadata, &Config::default())
            .into_iter()
            .map(|d| d.rule_id)
            .collect();
        assert_eq!(ids, vec!["C001", "C003", "C005", "C011"]);
    }

    #[test]
    fn test_validate_respects_disable() {
        let metadata = CommitMetadata::parse("Feat : Add thing.").unwrap();
        let config = config_with(&[], &["C001", "C003", "C005", "C011"]);
        assert!(validate(&metadata, &config).is_empty());
    }

    #[test]
    fn test_validate_clean_message() {
        let metadata = CommitMetadata::parse(
            "feat(api): add endpoint\n\nLonger explanation.\n\nImplements: TICKET-1",
        )
        .unwrap();
        assert!(validate(&metadata, &Config::default()).is_empty());
    }
}
