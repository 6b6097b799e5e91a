//! Phase 1: Rule Resolution
//!
//! Finds the duplication rules each project runs with. A project uses the
//! configuration of the first project in its parent chain (itself first) that
//! declares one, either as a structured `duplicator` block or as `ddp.*`
//! properties. The structured block wins when a project has both.
//!
//! ## Process
//!
//! 1.  **Hierarchy**: Reactor projects and non-reactor ancestors are indexed
//!     by identity. Reactor projects win when both define the same identity.
//!
//! 2.  **Parent Walk**: From the project outward, following `parent` links
//!     until a configuration is found, a parent is unknown, or the chain loops.
//!
//! 3.  **Compilation**: The found configuration is compiled into rules. A bad
//!     pattern is reported against the project being resolved.
//!
//! Projects without any configuration in their chain get an empty rule set.

use std::collections::{HashMap, HashSet};

use log::{debug, error};

use super::{ConfigFailure, ResolvedRules, RuleSet};
use crate::config;
use crate::error::{Error, Result};
use crate::project::{Project, ProjectId};

/// Projects indexed by identity, for parent lookups.
#[derive(Debug)]
pub struct Hierarchy<'a> {
    models: HashMap<&'a ProjectId, &'a Project>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(reactor: &'a [Project], ancestors: &'a [Project]) -> Self {
        let mut models = HashMap::new();
        for project in ancestors.iter().chain(reactor) {
            models.insert(&project.id, project);
        }
        Self { models }
    }

    pub fn get(&self, id: &ProjectId) -> Option<&'a Project> {
        self.models.get(id).copied()
    }

    /// Resolves the rules of `project` from the nearest configured ancestor.
    pub fn resolve_rules(&self, project: &Project) -> Result<RuleSet> {
        self.find_rules(project)
            .map_err(|e| e.in_project(&project.id))
    }

    fn find_rules(&self, project: &Project) -> Result<RuleSet> {
        let mut visited: Vec<&ProjectId> = Vec::new();
        let mut seen: HashSet<&ProjectId> = HashSet::new();
        let mut cursor = Some(project);

        while let Some(current) = cursor {
            if !seen.insert(&current.id) {
                let mut chain: Vec<String> = visited.iter().map(|id| id.to_string()).collect();
                chain.push(current.id.to_string());
                return Err(Error::CycleDetected {
                    cycle: chain.join(" -> "),
                });
            }
            visited.push(&current.id);

            if let Some(duplicator) = &current.duplicator {
                debug!(
                    "[{}] using duplicator configuration of {}",
                    project.id, current.id
                );
                return Ok(RuleSet::new(current.id.clone(), duplicator.compile()?));
            }
            if config::has_property_config(&current.properties) {
                debug!(
                    "[{}] using duplicator properties of {}",
                    project.id, current.id
                );
                let rule = config::from_properties(&current.properties).compile()?;
                return Ok(RuleSet::new(current.id.clone(), vec![rule]));
            }

            cursor = current.parent.as_ref().and_then(|parent| self.get(parent));
        }

        debug!(
            "[{}] no duplicator configuration found in project or parent projects",
            project.id
        );
        Ok(RuleSet::default())
    }
}

/// Resolved rules plus the projects whose configuration was rejected.
#[derive(Debug, Default)]
pub struct Resolution {
    pub rules: ResolvedRules,
    pub failures: Vec<ConfigFailure>,
}

/// Executes Phase 1 for every reactor project.
///
/// With `fail_fast`, the first configuration error is returned. Otherwise the
/// offending project is recorded in `failures` and runs without rules.
pub fn execute(reactor: &[Project], ancestors: &[Project], fail_fast: bool) -> Result<Resolution> {
    let hierarchy = Hierarchy::new(reactor, ancestors);
    let mut resolution = Resolution::default();

    for project in reactor {
        match hierarchy.resolve_rules(project) {
            Ok(rule_set) => {
                resolution.rules.insert(project.id.clone(), rule_set);
            }
            Err(e) if fail_fast => return Err(e),
            Err(e) => {
                error!("{}", e);
                resolution.failures.push(ConfigFailure {
                    project: project.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(resolution)
}
