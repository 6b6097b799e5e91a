//! # Dependency Declarations
//!
//! A [`Dependency`] is a declaration in a project's dependency list: identity
//! fields (group, artifact, version, type, classifier), a scope, an optional
//! flag and a set of exclusions.
//!
//! ## Management key
//!
//! Every dependency derives a canonical key of the form
//! `group:artifact:type[:classifier]`. The classifier segment is only present
//! when the classifier is non-empty. The key is used for rule matching and for
//! log output, and is cached on first use. Every setter that touches a field
//! of the key drops the cached value, so a clone whose type or classifier was
//! overridden never reports the key of its source.
//!
//! ## Equality
//!
//! Two dependencies are equal when every declared field is equal. Exclusions
//! are compared as an unordered set of `group:artifact` pairs. The cached key
//! never takes part in the comparison, nor in the hash.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Type used when a declaration does not name one.
pub const DEFAULT_TYPE: &str = "jar";

/// An excluded transitive dependency, identified by group and artifact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Exclusion {
    pub group: String,
    pub artifact: String,
}

impl Exclusion {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl TryFrom<String> for Exclusion {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.split_once(':') {
            Some((group, artifact)) if !group.is_empty() && !artifact.is_empty() => {
                Ok(Exclusion::new(group.trim(), artifact.trim()))
            }
            _ => Err(format!(
                "invalid exclusion '{}', expected group:artifact",
                value
            )),
        }
    }
}

impl From<Exclusion> for String {
    fn from(exclusion: Exclusion) -> Self {
        exclusion.to_string()
    }
}

/// A single dependency declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "DependencySpec", into = "DependencySpec")]
pub struct Dependency {
    group: String,
    artifact: String,
    version: Option<String>,
    type_: String,
    classifier: Option<String>,
    scope: Option<String>,
    optional: bool,
    exclusions: Vec<Exclusion>,
    management_key: OnceLock<String>,
}

impl Dependency {
    /// Creates a `jar` dependency without version, classifier or scope.
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: None,
            type_: DEFAULT_TYPE.to_string(),
            classifier: None,
            scope: None,
            optional: false,
            exclusions: Vec::new(),
            management_key: OnceLock::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.set_type(type_);
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.set_classifier(Some(classifier.into()));
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.set_scope(Some(scope.into()));
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_exclusion(mut self, group: impl Into<String>, artifact: impl Into<String>) -> Self {
        self.exclusions.push(Exclusion::new(group, artifact));
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The classifier, if one is set and non-empty.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub fn set_type(&mut self, type_: impl Into<String>) {
        self.type_ = type_.into();
        self.management_key.take();
    }

    pub fn set_classifier(&mut self, classifier: Option<String>) {
        self.classifier = classifier;
        self.management_key.take();
    }

    pub fn set_scope(&mut self, scope: Option<String>) {
        self.scope = scope;
        // scope is not part of the key, but a stale key is never acceptable
        self.management_key.take();
    }

    /// The canonical `group:artifact:type[:classifier]` key.
    pub fn management_key(&self) -> &str {
        self.management_key.get_or_init(|| {
            let mut key = format!("{}:{}:{}", self.group, self.artifact, self.type_);
            if let Some(classifier) = self.classifier() {
                key.push(':');
                key.push_str(classifier);
            }
            key
        })
    }

    /// Whether the key has been computed and cached.
    #[cfg(test)]
    pub(crate) fn has_cached_key(&self) -> bool {
        self.management_key.get().is_some()
    }

    fn exclusion_set(&self) -> BTreeSet<&Exclusion> {
        self.exclusions.iter().collect()
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.artifact == other.artifact
            && self.version == other.version
            && self.classifier == other.classifier
            && self.scope == other.scope
            && self.type_ == other.type_
            && self.optional == other.optional
            && self.exclusion_set() == other.exclusion_set()
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.artifact.hash(state);
        self.version.hash(state);
        self.classifier.hash(state);
        self.scope.hash(state);
        self.type_.hash(state);
        self.optional.hash(state);
        self.exclusion_set().hash(state);
    }
}

/// Formats as the management key followed by the scope, if any.
impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope() {
            Some(scope) => write!(f, "{}:{}", self.management_key(), scope),
            None => write!(f, "{}", self.management_key()),
        }
    }
}

/// Serialized form of a dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencySpec {
    group: String,
    artifact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    exclusions: Vec<Exclusion>,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

impl From<DependencySpec> for Dependency {
    fn from(spec: DependencySpec) -> Self {
        Self {
            group: spec.group,
            artifact: spec.artifact,
            version: spec.version,
            type_: spec.type_,
            classifier: spec.classifier.filter(|c| !c.is_empty()),
            scope: spec.scope.filter(|s| !s.is_empty()),
            optional: spec.optional,
            exclusions: spec.exclusions,
            management_key: OnceLock::new(),
        }
    }
}

impl From<Dependency> for DependencySpec {
    fn from(dependency: Dependency) -> Self {
        Self {
            group: dependency.group,
            artifact: dependency.artifact,
            version: dependency.version,
            type_: dependency.type_,
            classifier: dependency.classifier,
            scope: dependency.scope,
            optional: dependency.optional,
            exclusions: dependency.exclusions,
        }
    }
}
