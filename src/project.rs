//! Projects of a multi-module build.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DuplicatorConfig;
use crate::dependency::Dependency;
use crate::error::{Error, Result};

/// Identity of a project: `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ProjectId {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Whether `dependency` refers to this project.
    ///
    /// Group and artifact must be equal. A dependency without a version refers
    /// to whatever version the reactor builds.
    pub fn is_referenced_by(&self, dependency: &Dependency) -> bool {
        dependency.group() == self.group
            && dependency.artifact() == self.artifact
            && dependency.version().is_none_or(|v| v == self.version)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(ProjectId::new(*group, *artifact, *version))
            }
            _ => Err(Error::InvalidProjectId {
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ProjectId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.to_string()
    }
}

/// A module in the build graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: ProjectId,
    /// The project this one inherits configuration from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicator: Option<DuplicatorConfig>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Project {
    pub fn new(id: ProjectId) -> Self {
        Self {
            id,
            parent: None,
            properties: BTreeMap::new(),
            duplicator: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: ProjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_duplicator(mut self, duplicator: DuplicatorConfig) -> Self {
        self.duplicator = Some(duplicator);
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }
}
