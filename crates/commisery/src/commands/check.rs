//! Check command.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Args;
use commisery_commit::strip_message;
use commisery_config::Config;
use commisery_lint::ConventionalCommit;
use tracing::info;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// File containing the message, `-` for stdin (e.g. from a commit-msg hook)
    #[arg(conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// The message to check
    #[arg(short, long)]
    pub message: Option<String>,
}

fn read_message(args: &CheckArgs) -> Result<String> {
    if let Some(message) = &args.message {
        return Ok(message.clone());
    }

    match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut message = String::new();
            std::io::stdin()
                .read_to_string(&mut message)
                .context("failed to read message from stdin")?;
            Ok(message)
        }
    }
}

/// Runs the check command.
pub fn run(args: &CheckArgs, config: &Config) -> Result<ExitCode> {
    let message = strip_message(&read_message(args)?);
    if message.is_empty() {
        bail!("the commit message is empty");
    }

    match ConventionalCommit::parse(&message, config) {
        Ok(commit) => {
            info!(
                kind = %commit.r#type,
                bump = %commit.bump_level,
                "commit message is compliant"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            for diagnostic in err.diagnostics() {
                eprintln!("{diagnostic}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
