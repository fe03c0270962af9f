//! Rules command.

use std::process::ExitCode;

use commisery_config::Config;
use commisery_lint::{is_enabled, rules};

/// Runs the rules command.
pub fn run(config: &Config) -> ExitCode {
    for rule in rules() {
        let state = if is_enabled(rule, config) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{}  {state:<8}  {}", rule.id, rule.description);
    }
    ExitCode::SUCCESS
}
