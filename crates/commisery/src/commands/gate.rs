//! Pull request gate command.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use commisery_config::Config;
use commisery_core::check_pull_request;
use commisery_git::Repository;
use tracing::info;

/// Arguments for the gate command.
#[derive(Debug, Args)]
pub struct GateArgs {
    /// The pull request title
    #[arg(short, long, env = "COMMISERY_PR_TITLE")]
    pub title: String,

    /// Only check commits not reachable from this revision (e.g. the base branch)
    #[arg(short, long)]
    pub since: Option<String>,
}

/// Runs the gate command.
pub fn run(args: &GateArgs, config: &Config) -> Result<ExitCode> {
    let repo = Repository::discover(".").context("failed to open git repository")?;
    let commits = repo
        .commits_since(args.since.as_deref())
        .context("failed to get commits")?;

    let report = check_pull_request(&args.title, &commits, config);
    for command in report.workflow_commands() {
        println!("{command}");
    }

    info!(
        checked = report.checked,
        failed = report.failures.len(),
        "pull request gate finished"
    );
    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
