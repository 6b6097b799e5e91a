//! # Error Suggestions
//!
//! Helper functions for error messages with hints. Errors should tell users
//! what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dependency_duplicator::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Manifest not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::manifest_not_found(path));
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for when the reactor manifest is not found.
pub fn manifest_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Reactor manifest not found: {path}\n\n\
         hint: Use -m/--manifest to specify the manifest path\n\
         hint: Set DEPENDENCY_DUPLICATOR_MANIFEST environment variable",
        path = path.display()
    )
}

/// Generate an error for an invalid dependency key pattern.
///
/// Includes hints about common regex mistakes.
pub fn invalid_regex(pattern: &str, error: &regex::Error) -> anyhow::Error {
    let hint = match error {
        regex::Error::Syntax(msg) if msg.contains("unclosed") => {
            "hint: Check for unclosed brackets, parentheses, or braces"
        }
        regex::Error::Syntax(msg) if msg.contains("repetition") => {
            "hint: Repetition operators (+, *, ?) must follow a pattern"
        }
        _ => "hint: Run 'dependency-duplicator validate' to check your configuration",
    };

    anyhow::anyhow!(
        "Invalid dependency key pattern: {pattern}\n\
         error: {error}\n\n\
         {hint}\n\
         hint: Patterns match the whole key groupId:artifactId:type[:classifier]\n\
         hint: Escape dots in group ids (org\\.example) to match them literally"
    )
}

/// Generate an error for a cycle in the project dependencies.
pub fn cycle_detected(cycle: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Cycle detected in project dependencies: {cycle}\n\n\
         hint: Remove one of the dependencies between these projects to break the cycle\n\
         hint: A duplication with add-downstream can introduce the back edge; \
         set add-downstream: false for that duplication"
    )
}

/// Turns a library error into a user facing error, adding hints where known.
pub fn explain(error: Error) -> anyhow::Error {
    match error {
        Error::InvalidPattern { pattern, source } => invalid_regex(&pattern, &source),
        Error::CycleDetected { cycle } => cycle_detected(&cycle),
        Error::ProjectConfig { project, source } => {
            explain(*source).context(format!("Configuration error in {}", project))
        }
        other => anyhow::Error::new(other),
    }
}
