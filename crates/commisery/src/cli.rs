//! CLI definition.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Validate Conventional Commits and decide the next release version.
#[derive(Debug, Parser)]
#[command(name = "commisery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: nearest .commisery.toml)
    #[arg(short, long, global = true, env = "COMMISERY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a single commit message
    Check(commands::check::CheckArgs),

    /// Validate a pull request title and its commits
    Gate(commands::gate::GateArgs),

    /// Decide and publish the next version
    Bump(commands::bump::BumpArgs),

    /// List the validation rules
    Rules,
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<ExitCode> {
        let config = commands::load_config(self.config.as_deref())?;
        match self.command {
            Commands::Check(args) => commands::check::run(&args, &config),
            Commands::Gate(args) => commands::gate::run(&args, &config),
            Commands::Bump(args) => commands::bump::run(&args, &config),
            Commands::Rules => Ok(commands::rules::run(&config)),
        }
    }
}
