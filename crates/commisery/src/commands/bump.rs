//! Bump command.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use commisery_config::Config;
use commisery_core::{BumpOptions, BumpReport, ReleaseManager, Strategy};
use commisery_git::Repository;
use commisery_sdkver::ReleaseType;

/// Versioning strategy argument.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StrategyArg {
    /// Semantic versioning
    #[default]
    Semver,
    /// SdkVer (dev, rc and rel release types)
    Sdkver,
}

/// SdkVer release type argument.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReleaseTypeArg {
    /// Development build
    #[default]
    Dev,
    /// Release candidate
    Rc,
    /// Release
    Rel,
}

impl From<ReleaseTypeArg> for ReleaseType {
    fn from(arg: ReleaseTypeArg) -> Self {
        match arg {
            ReleaseTypeArg::Dev => Self::Dev,
            ReleaseTypeArg::Rc => Self::Rc,
            ReleaseTypeArg::Rel => Self::Rel,
        }
    }
}

/// Arguments for the bump command.
#[derive(Debug, Args)]
pub struct BumpArgs {
    /// Versioning strategy
    #[arg(short, long, value_enum, default_value_t)]
    pub strategy: StrategyArg,

    /// Release type to bump towards (sdkver only)
    #[arg(short, long, value_enum, default_value_t)]
    pub release_type: ReleaseTypeArg,

    /// Branch to bump for (default: the checked-out branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Decide the version without creating tags or branches
    #[arg(short, long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl BumpArgs {
    fn options(&self) -> BumpOptions {
        let strategy = match self.strategy {
            StrategyArg::Semver => Strategy::SemVer,
            StrategyArg::Sdkver => Strategy::SdkVer(self.release_type.into()),
        };
        BumpOptions {
            strategy,
            dry_run: self.dry_run,
            branch: self.branch.clone(),
        }
    }
}

fn print_report(report: &BumpReport, dry_run: bool) {
    if let Some(reason) = &report.skipped {
        println!("Skipped bump on {}: {reason}", report.branch);
        return;
    }

    let current = report
        .current_version
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    match (&report.next_version, &report.bump) {
        (Some(next), Some(bump)) if dry_run => {
            println!("Dry run: would bump version {current} -> {next} ({})", bump.bump_type);
        }
        (Some(next), Some(bump)) => {
            println!("Bumped version {current} -> {next} ({})", bump.bump_type);
        }
        _ => println!("No bump required, current version is {current}"),
    }
    println!("{} commit(s) since {current}", report.commits.len());
}

/// Runs the bump command.
pub fn run(args: &BumpArgs, config: &Config) -> Result<ExitCode> {
    let repo = Repository::discover(".").context("failed to open git repository")?;
    let manager = ReleaseManager::new(&repo, config);

    let report = match manager.bump(&args.options()) {
        Ok(report) => report,
        Err(err) if err.is_policy() => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("failed to bump version"),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        print_report(&report, args.dry_run);
    }
    Ok(ExitCode::SUCCESS)
}
