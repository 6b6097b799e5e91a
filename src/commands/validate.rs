//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a reactor
//! manifest without running a duplication pass.
//!
//! ## Functionality
//!
//! - **Manifest Validation**: Parses the manifest and its project identities.
//! - **Rule Validation**: Resolves and compiles the duplication rules of every
//!   reactor project, reporting each invalid configuration.
//! - **Ordering Validation**: Checks that the declared reactor can be ordered
//!   (no duplicate projects, no cycles, filter names known projects).
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use dependency_duplicator::manifest;
use dependency_duplicator::output::{emoji, OutputConfig};
use dependency_duplicator::phases::phase1;
use dependency_duplicator::suggestions;

/// Validate a reactor manifest
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the reactor manifest to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEPENDENCY_DUPLICATOR_MANIFEST",
        default_value = "reactor.yaml"
    )]
    pub manifest: PathBuf,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let manifest_path = &args.manifest;
    println!(
        "{} Validating manifest: {}",
        emoji(&out, "🔍", "[SCAN]"),
        manifest_path.display()
    );

    if !manifest_path.exists() {
        return Err(suggestions::manifest_not_found(manifest_path));
    }

    let manifest = match manifest::from_file(manifest_path) {
        Ok(manifest) => {
            println!("{} Manifest parsed successfully", emoji(&out, "✅", "[OK]"));
            manifest
        }
        Err(e) => {
            println!(
                "{} Manifest parsing failed: {}",
                emoji(&out, "❌", "[ERR]"),
                e
            );
            return Err(anyhow::anyhow!("Manifest parsing failed: {}", e));
        }
    };

    let mut has_errors = false;

    println!("\n{} Reactor Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Reactor projects: {}", manifest.projects.len());
    println!("   Ancestor projects: {}", manifest.ancestors.len());
    if let Some(filter) = &manifest.filter {
        println!("   Selected projects: {}", filter.len());
    }

    println!(
        "\n{} Resolving duplication rules...",
        emoji(&out, "🔍", "[SCAN]")
    );
    let resolution = phase1::execute(&manifest.projects, &manifest.ancestors, false)?;
    let configured = resolution.rules.values().filter(|r| !r.is_empty()).count();
    let rule_count: usize = resolution.rules.values().map(|r| r.rules.len()).sum();
    for failure in &resolution.failures {
        println!("{} {}", emoji(&out, "❌", "[ERR]"), failure.message);
        has_errors = true;
    }
    if resolution.failures.is_empty() {
        println!(
            "{} {} projects run with {} duplication rules",
            emoji(&out, "✅", "[OK]"),
            configured,
            rule_count
        );
    }

    println!(
        "\n{} Checking project ordering...",
        emoji(&out, "🔄", "[CHECK]")
    );
    match manifest.into_reactor() {
        Ok(reactor) => {
            println!(
                "{} Reactor orders cleanly ({} graph)",
                emoji(&out, "✅", "[OK]"),
                reactor.graph().kind()
            );
        }
        Err(e) => {
            println!("{} {}", emoji(&out, "❌", "[ERR]"), e);
            has_errors = true;
        }
    }

    println!();
    if has_errors {
        println!("{} Validation failed", emoji(&out, "❌", "[ERR]"));
        anyhow::bail!("Validation failed");
    }
    println!("{} Manifest is valid", emoji(&out, "✅", "[OK]"));
    Ok(())
}
