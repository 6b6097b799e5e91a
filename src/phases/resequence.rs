//! Phase 4: Resequencing
//!
//! Builds a new [`ProjectSorter`] from the updated declarations and asks the
//! graph to adopt it. Failures are logged and reported, never raised: the
//! graph keeps its previous ordering and the committed dependencies stay.

use log::{error, info, warn};

use super::ResequenceOutcome;
use crate::graph::{ProjectGraph, ProjectSorter};

/// Executes Phase 4.
pub fn execute(graph: &mut dyn ProjectGraph) -> ResequenceOutcome {
    info!("rebuilding project dependency graph");

    let sorter = match ProjectSorter::new(graph.all_projects()) {
        Ok(sorter) => sorter,
        Err(e) => {
            error!("unable to rebuild project dependency graph: {}", e);
            return ResequenceOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    let order = sorter.sorted_projects().to_vec();
    match graph.replace_sorter(sorter) {
        Ok(()) => ResequenceOutcome::Rebuilt { order },
        Err(e) => {
            warn!(
                "cannot rebuild project dependency graph of type {}: {}",
                graph.kind(),
                e
            );
            ResequenceOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
