//! Phase 3: Commit
//!
//! Appends each pending set to the declared dependencies of its target
//! project, after every existing declaration. Only this phase mutates the
//! projects of the graph.

use log::{info, warn};

use super::{PendingDependencies, ProjectAdditions};
use crate::graph::ProjectGraph;

/// Executes Phase 3.
pub fn execute(graph: &mut dyn ProjectGraph, pending: &PendingDependencies) -> Vec<ProjectAdditions> {
    let mut additions = Vec::new();

    for (target, dependencies) in pending.iter() {
        if dependencies.is_empty() {
            continue;
        }
        let Some(project) = graph.project_mut(target) else {
            warn!("[{}] project disappeared from the reactor, dropping its dependencies", target);
            continue;
        };

        let names: Vec<String> = dependencies.iter().map(ToString::to_string).collect();
        info!("[{}] adding dependencies: [{}]", target, names.join(", "));
        project.dependencies.extend(dependencies.iter().cloned());

        additions.push(ProjectAdditions {
            project: target.clone(),
            dependencies: dependencies.iter().cloned().collect(),
        });
    }

    additions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::Dependency;
    use crate::graph::tests::{id, module};
    use crate::graph::ReactorGraph;

    #[test]
    fn test_appends_after_existing_declarations() {
        let existing = Dependency::new("org.slf4j", "slf4j-api").with_version("2.0.9");
        let mut graph = ReactorGraph::new(vec![module("a", &[]).with_dependency(existing.clone())]).unwrap();

        let added = Dependency::new("org.slf4j", "slf4j-api")
            .with_version("2.0.9")
            .with_scope("test");
        let mut pending = PendingDependencies::new();
        pending.entry(&id("a")).add(added.clone());

        let additions = execute(&mut graph, &pending);
        assert_eq!(additions.len(), 1);
        assert_eq!(graph.all_projects()[0].dependencies, vec![existing, added]);
    }

    #[test]
    fn test_unknown_target_is_dropped() {
        let mut graph = ReactorGraph::new(vec![module("a", &[])]).unwrap();
        let mut pending = PendingDependencies::new();
        pending.entry(&id("gone")).add(Dependency::new("g", "x"));

        assert!(execute(&mut graph, &pending).is_empty());
        assert!(graph.all_projects()[0].dependencies.is_empty());
    }

    #[test]
    fn test_empty_sets_are_skipped() {
        let mut graph = ReactorGraph::new(vec![module("a", &[])]).unwrap();
        let mut pending = PendingDependencies::new();
        pending.entry(&id("a"));
        assert!(execute(&mut graph, &pending).is_empty());
    }
}
