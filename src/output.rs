//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance,
//! including color and emoji support based on terminal capabilities and
//! user preferences, and the text rendering of a propagation report.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dependency_duplicator::output::{OutputConfig, emoji, render_report};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! println!("{} Loading reactor...", emoji(&config, "🔍", "[SCAN]"));
//! println!("{}", render_report(&report, &config));
//! ```

use std::env;

use crate::phases::{PropagationReport, ResequenceOutcome};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if `NO_COLOR` is set, `CLICOLOR=0`,
    /// `TERM=dumb`, or stdout is not a TTY (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn styled(config: &OutputConfig, text: &str, style: console::Style) -> String {
    if config.use_color {
        style.apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Renders a propagation report as human readable text.
pub fn render_report(report: &PropagationReport, out: &OutputConfig) -> String {
    let mut lines = Vec::new();

    if report.skipped {
        lines.push(format!(
            "{} No project graph available, nothing was duplicated",
            emoji(out, "⚠️", "[WARN]")
        ));
        return lines.join("\n");
    }

    for failure in &report.config_failures {
        lines.push(format!(
            "{} [{}] {}",
            emoji(out, "❌", "[ERR]"),
            failure.project,
            failure.message
        ));
    }

    if report.matches.is_empty() {
        lines.push(format!(
            "{} No dependency matched a duplication rule",
            emoji(out, "ℹ️", "[INFO]")
        ));
    }
    for record in &report.matches {
        lines.push(format!(
            "{} [{}] {} -> {} (rule #{}, pattern {}, {} targets)",
            emoji(out, "🔁", "[MATCH]"),
            record.project,
            record.dependency,
            styled(out, &record.duplicate, console::Style::new().green()),
            record.rule_index,
            record.pattern,
            record.targets.len()
        ));
    }

    for addition in &report.additions {
        lines.push(format!(
            "{} [{}] adding dependencies:",
            emoji(out, "➕", "[ADD]"),
            addition.project
        ));
        for dependency in &addition.dependencies {
            lines.push(format!("    {}", dependency));
        }
    }

    match &report.resequence {
        ResequenceOutcome::Rebuilt { order } => {
            let order: Vec<String> = order.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "{} build order: {}",
                emoji(out, "🔗", "[ORDER]"),
                order.join(", ")
            ));
        }
        ResequenceOutcome::Failed { reason } => {
            lines.push(format!(
                "{} build order not rebuilt: {}",
                emoji(out, "⚠️", "[WARN]"),
                styled(out, reason, console::Style::new().yellow())
            ));
        }
        ResequenceOutcome::NotRun => {}
    }

    lines.push(format!(
        "{} {} dependencies added to {} projects",
        emoji(out, "✅", "[DONE]"),
        report.total_added(),
        report.additions.len()
    ));

    lines.join("\n")
}
