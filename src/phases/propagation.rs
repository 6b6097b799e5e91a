//! Phase 2: Propagation Scan
//!
//! Walks every project in enumeration order and applies its rules to the
//! dependencies it declared before the pass. For each match, the duplicate
//! plus the rule's additional dependencies are proposed to the project itself
//! and, when the rule adds downstream, to every project depending on it
//! (transitively).
//!
//! Proposals are collected in [`PendingDependencies`], one deduplicating set
//! per target project shared by all matches of the pass. The graph is only
//! borrowed immutably here, so a proposal can never be seen by the scan of
//! another project.

use std::collections::HashSet;

use log::debug;

use super::{MatchRecord, PendingDependencies, ResolvedRules};
use crate::graph::ProjectGraph;
use crate::project::ProjectId;
use crate::rule::find_first_match;

/// Output of the scan.
#[derive(Debug, Default)]
pub struct Scan {
    pub pending: PendingDependencies,
    pub matches: Vec<MatchRecord>,
}

/// Executes Phase 2.
pub fn execute(graph: &dyn ProjectGraph, rules: &ResolvedRules) -> Scan {
    let known: HashSet<&ProjectId> = graph.all_projects().iter().map(|p| &p.id).collect();
    let mut scan = Scan::default();

    for project in graph.all_projects() {
        let Some(rule_set) = rules.get(&project.id) else {
            continue;
        };
        if rule_set.is_empty() {
            continue;
        }

        for dependency in &project.dependencies {
            let Some(found) = find_first_match(dependency, &rule_set.rules) else {
                continue;
            };

            let candidates = found.rule.candidates(dependency);
            debug!(
                "[{}] duplicating dependency {} because of {} (pattern {})",
                project.id, dependency, found.rule, found.pattern
            );
            let additional: Vec<String> = found
                .rule
                .additional_dependencies()
                .iter()
                .map(ToString::to_string)
                .collect();
            if !additional.is_empty() {
                debug!(
                    "[{}] adding additional dependencies {:?}",
                    project.id, additional
                );
            }

            let mut targets = vec![project.id.clone()];
            if found.rule.add_downstream() {
                targets.extend(graph.downstream_projects(&project.id, true));
            }

            for target in &targets {
                if !known.contains(target) {
                    debug!("[{}] skipping unknown target project {}", project.id, target);
                    continue;
                }
                scan.pending.entry(target).add_all(candidates.iter().cloned());
            }

            scan.matches.push(MatchRecord {
                project: project.id.clone(),
                dependency: dependency.to_string(),
                duplicate: candidates[0].to_string(),
                rule_index: found.index,
                pattern: found.pattern.to_string(),
                additional,
                targets,
            });
        }
    }

    scan
}
