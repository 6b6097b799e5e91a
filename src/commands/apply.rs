//! Apply command implementation
//!
//! The apply command runs a full duplication pass over a reactor manifest:
//! 1. Resolving every project's duplication rules through its parent chain
//! 2. Scanning declared dependencies and collecting duplicates per target
//! 3. Appending the collected duplicates to their target projects
//! 4. Rebuilding the build ordering
//!
//! The report is printed as text or JSON, and the updated manifest can be
//! written out for inspection.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use dependency_duplicator::manifest;
use dependency_duplicator::output::{emoji, render_report, OutputConfig};
use dependency_duplicator::phases::Options;
use dependency_duplicator::suggestions;

/// Report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the reactor manifest
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEPENDENCY_DUPLICATOR_MANIFEST",
        default_value = "reactor.yaml"
    )]
    pub manifest: PathBuf,

    /// Write the updated manifest to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Fail on the first invalid duplicator configuration instead of skipping the project
    #[arg(long)]
    pub strict: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.manifest.exists() {
        return Err(suggestions::manifest_not_found(&args.manifest));
    }

    let manifest = manifest::from_file(&args.manifest).map_err(suggestions::explain)?;
    let mut reactor = manifest.into_reactor().map_err(suggestions::explain)?;
    let report = reactor
        .run(Options {
            strict: args.strict,
        })
        .map_err(suggestions::explain)?;

    match args.format {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text if !args.quiet => {
            println!(
                "{} Dependency duplication for {}",
                emoji(&out, "🔍", "[SCAN]"),
                args.manifest.display()
            );
            println!("{}", render_report(&report, &out));
        }
        ReportFormat::Text => {}
    }

    if let Some(output) = &args.output {
        let yaml = reactor.to_manifest().to_yaml()?;
        std::fs::write(output, yaml)
            .with_context(|| format!("Failed to write manifest to {}", output.display()))?;
        if !args.quiet && args.format == ReportFormat::Text {
            println!(
                "{} Updated manifest written to {}",
                emoji(&out, "💾", "[SAVE]"),
                output.display()
            );
        }
    }

    Ok(())
}
