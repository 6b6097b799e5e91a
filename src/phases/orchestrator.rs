//! Orchestrator for a complete duplication pass.
//!
//! Wires the phases together: rules are resolved for every project in the
//! reactor, then the scan, commit and resequencing phases run against the
//! graph. Only configuration errors in strict mode stop a pass; everything
//! else ends up in the returned [`PropagationReport`].

use std::time::Instant;

use log::{info, warn};

use super::{commit, propagation, resequence, resolution};
use super::{PropagationReport, ResolvedRules};
use crate::error::Result;
use crate::graph::ProjectGraph;
use crate::project::Project;

/// Settings of one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Abort on the first configuration error instead of skipping the project.
    pub strict: bool,
}

/// Runs the scan, commit and resequencing phases with already resolved rules.
pub fn propagate(graph: &mut dyn ProjectGraph, rules: &ResolvedRules) -> PropagationReport {
    let started = Instant::now();
    info!("duplicating dependencies to projects in reactor");

    let scan = propagation::execute(&*graph, rules);
    let additions = commit::execute(graph, &scan.pending);
    let resequence = resequence::execute(graph);

    info!("finished after {}ms", started.elapsed().as_millis());

    PropagationReport {
        skipped: false,
        config_failures: Vec::new(),
        matches: scan.matches,
        additions,
        resequence,
    }
}

/// Like [`propagate`], for hosts that may not have built a graph.
pub fn propagate_session(
    graph: Option<&mut dyn ProjectGraph>,
    rules: &ResolvedRules,
) -> PropagationReport {
    match graph {
        Some(graph) => propagate(graph, rules),
        None => {
            warn!("no project dependency graph available, skipping dependency duplication");
            PropagationReport::skipped()
        }
    }
}

/// Executes a full pass: rule resolution followed by propagation.
///
/// `ancestors` are parent projects outside the reactor, consulted only while
/// resolving configuration.
pub fn execute(
    graph: &mut dyn ProjectGraph,
    ancestors: &[Project],
    options: Options,
) -> Result<PropagationReport> {
    let resolution = resolution::execute(graph.all_projects(), ancestors, options.strict)?;
    let mut report = propagate(graph, &resolution.rules);
    report.config_failures = resolution.failures;
    Ok(report)
}

/// Like [`execute`], for hosts that may not have built a graph.
pub fn execute_session(
    graph: Option<&mut dyn ProjectGraph>,
    ancestors: &[Project],
    options: Options,
) -> Result<PropagationReport> {
    match graph {
        Some(graph) => execute(graph, ancestors, options),
        None => {
            warn!("no project dependency graph available, skipping dependency duplication");
            Ok(PropagationReport::skipped())
        }
    }
}
