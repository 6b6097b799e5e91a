//! # Reactor Manifest
//!
//! A YAML description of a multi-module build, standing in for the build
//! tool's own session. It lists the reactor projects in enumeration order,
//! the non-reactor ancestors that only contribute configuration, and an
//! optional filter selecting the projects of a partial build.
//!
//! ```yaml
//! projects:
//!   - id: com.example:core:1.0.0
//!     parent: com.example:parent:1.0.0
//!     dependencies:
//!       - group: org.apache.commons
//!         artifact: commons-lang3
//!         version: 3.12.0
//!   - id: com.example:app:1.0.0
//!     dependencies:
//!       - { group: com.example, artifact: core, version: 1.0.0 }
//! ancestors:
//!   - id: com.example:parent:1.0.0
//!     duplicator:
//!       duplications:
//!         - dependency-keys: ["org\\.apache\\.commons:.*"]
//!           target-scope: test
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{FilteredGraph, ProjectGraph, ReactorGraph};
use crate::phases::{orchestrator, PropagationReport};
use crate::project::{Project, ProjectId};

/// The parsed manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Project>,
    /// Projects selected for a partial build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<ProjectId>>,
}

impl Manifest {
    /// Builds the project graph. Fails when the declared reactor cannot be ordered.
    pub fn into_reactor(self) -> Result<Reactor> {
        let reactor = ReactorGraph::new(self.projects)?;
        let graph: Box<dyn ProjectGraph> = match &self.filter {
            Some(selected) => Box::new(FilteredGraph::new(reactor, selected.iter().cloned())?),
            None => Box::new(reactor),
        };
        Ok(Reactor {
            graph,
            ancestors: self.ancestors,
            filter: self.filter,
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parses a manifest from YAML.
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: format!("invalid reactor manifest: {}", e),
        hint: Some(
            "A manifest needs a 'projects' list; each project needs an 'id' of the form group:artifact:version"
                .to_string(),
        ),
    })
}

pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// A loaded build: its graph plus the projects outside of it.
pub struct Reactor {
    graph: Box<dyn ProjectGraph>,
    ancestors: Vec<Project>,
    filter: Option<Vec<ProjectId>>,
}

impl Reactor {
    pub fn graph(&self) -> &dyn ProjectGraph {
        &*self.graph
    }

    pub fn graph_mut(&mut self) -> &mut dyn ProjectGraph {
        &mut *self.graph
    }

    pub fn ancestors(&self) -> &[Project] {
        &self.ancestors
    }

    /// Runs a full duplication pass over the graph.
    pub fn run(&mut self, options: orchestrator::Options) -> Result<PropagationReport> {
        orchestrator::execute(&mut *self.graph, &self.ancestors, options)
    }

    /// The manifest describing the current state of the graph.
    pub fn to_manifest(&self) -> Manifest {
        Manifest {
            projects: self.graph.all_projects().to_vec(),
            ancestors: self.ancestors.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl std::fmt::Debug for Reactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("graph", &self.graph.kind())
            .field("projects", &self.graph.all_projects().len())
            .field("ancestors", &self.ancestors.len())
            .finish()
    }
}
