//! Implementation of the phases of a duplication pass.
//!
//! ## Overview
//!
//! A pass over the reactor runs these phases in order:
//! 1. Resolution - Find each project's rules by walking its parent chain
//! 2. Propagation - Scan every project's declared dependencies and collect
//!    the duplicates per target project, without touching any project
//! 3. Commit - Append the collected dependencies to their target projects
//! 4. Resequencing - Rebuild the reactor ordering from the updated declarations
//!
//! Phase 2 only reads the graph and phase 3 only writes it, so nothing added in
//! a pass can be matched again in the same pass. A failed resequencing never
//! rolls back the committed dependencies.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::dependency::Dependency;
use crate::dependency_set::DependencySet;
use crate::project::ProjectId;
use crate::rule::DuplicationRule;

pub mod commit;
pub mod orchestrator;
pub mod propagation;
pub mod resequence;
pub mod resolution;

pub use commit as phase3;
pub use propagation as phase2;
pub use resequence as phase4;
pub use resolution as phase1;

pub use orchestrator::{execute, execute_session, propagate, propagate_session, Options};

/// The rules a project runs with, and the project that configured them.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// The project (self or ancestor) whose configuration was found, if any.
    pub origin: Option<ProjectId>,
    pub rules: Vec<DuplicationRule>,
}

impl RuleSet {
    pub fn new(origin: ProjectId, rules: Vec<DuplicationRule>) -> Self {
        Self {
            origin: Some(origin),
            rules,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolved rule sets keyed by project.
pub type ResolvedRules = HashMap<ProjectId, RuleSet>;

/// Dependencies waiting to be appended, one set per target project.
///
/// Targets keep the order in which they were first proposed.
#[derive(Debug, Clone, Default)]
pub struct PendingDependencies {
    targets: IndexMap<ProjectId, DependencySet>,
}

impl PendingDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set for `target`, created on first use.
    pub fn entry(&mut self, target: &ProjectId) -> &mut DependencySet {
        self.targets.entry(target.clone()).or_default()
    }

    pub fn get(&self, target: &ProjectId) -> Option<&DependencySet> {
        self.targets.get(target)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, ProjectId, DependencySet> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// One dependency matched by a rule during the scan.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub project: ProjectId,
    /// The matched dependency, `key[:scope]`.
    pub dependency: String,
    /// The duplicate that was proposed, `key[:scope]`.
    pub duplicate: String,
    pub rule_index: usize,
    pub pattern: String,
    pub additional: Vec<String>,
    pub targets: Vec<ProjectId>,
}

/// Dependencies appended to one project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAdditions {
    pub project: ProjectId,
    pub dependencies: Vec<Dependency>,
}

/// A project whose rules could not be resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigFailure {
    pub project: ProjectId,
    pub message: String,
}

/// Result of rebuilding the reactor ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResequenceOutcome {
    /// The graph now uses this order.
    Rebuilt { order: Vec<ProjectId> },
    /// The previous ordering is still in effect.
    Failed { reason: String },
    NotRun,
}

/// Diagnostics of one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PropagationReport {
    /// Set when no graph was available and nothing ran.
    pub skipped: bool,
    pub config_failures: Vec<ConfigFailure>,
    pub matches: Vec<MatchRecord>,
    pub additions: Vec<ProjectAdditions>,
    pub resequence: ResequenceOutcome,
}

impl PropagationReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            config_failures: Vec::new(),
            matches: Vec::new(),
            additions: Vec::new(),
            resequence: ResequenceOutcome::NotRun,
        }
    }

    /// Dependencies appended to `project` in this pass.
    pub fn added_to(&self, project: &ProjectId) -> &[Dependency] {
        self.additions
            .iter()
            .find(|a| &a.project == project)
            .map(|a| a.dependencies.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_added(&self) -> usize {
        self.additions.iter().map(|a| a.dependencies.len()).sum()
    }

    pub fn resequenced(&self) -> bool {
        matches!(self.resequence, ResequenceOutcome::Rebuilt { .. })
    }

    /// Whether the pass left the graph with a stale ordering.
    pub fn ordering_is_stale(&self) -> bool {
        !self.skipped && matches!(self.resequence, ResequenceOutcome::Failed { .. })
    }
}
