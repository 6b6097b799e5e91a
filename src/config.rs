//! # Duplicator Configuration
//!
//! This module defines how a project declares duplication rules and how those
//! declarations are compiled into [`DuplicationRule`]s.
//!
//! ## Formats
//!
//! Two forms are supported:
//!
//! 1.  **Structured form**: a `duplicator` block holding an ordered list of
//!     duplications. This is the recommended form.
//!
//!     ```yaml
//!     duplicator:
//!       duplications:
//!         - dependency-keys: ["org\\.apache\\.commons:commons-lang3:jar"]
//!           target-scope: test
//!           add-downstream: true
//!           additional-dependencies:
//!             - group: org.junit.jupiter
//!               artifact: junit-jupiter
//!               scope: test
//!     ```
//!
//!     `dependency-keys` accepts a list or a single comma-joined string.
//!
//! 2.  **Property form**: flat `ddp.*` project properties describing a single
//!     rule. Kept for projects configured before the structured form existed.
//!
//! Compilation happens when a project's rules are resolved, so an invalid
//! regex is reported against the project that is being configured.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::matcher::DependencyMatcher;
use crate::rule::DuplicationRule;

/// Comma-joined source patterns.
pub const PROPERTY_SOURCE_DEPENDENCIES: &str = "ddp.sourceDependencies";
pub const PROPERTY_TARGET_SCOPE: &str = "ddp.targetScope";
pub const PROPERTY_TARGET_TYPE: &str = "ddp.targetType";
pub const PROPERTY_TARGET_CLASSIFIER: &str = "ddp.targetClassifier";
pub const PROPERTY_ADD_DEPENDENCIES_DOWNSTREAM: &str = "ddp.addDependenciesDownstream";

/// Dependency key patterns, either listed or comma-joined.
///
/// A list entry is one pattern and may itself contain commas; only the
/// joined form is split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DependencyKeys {
    List(Vec<String>),
    Joined(String),
}

impl DependencyKeys {
    /// The trimmed, non-empty patterns in configured order.
    pub fn patterns(&self) -> Vec<String> {
        match self {
            DependencyKeys::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            DependencyKeys::Joined(joined) => split_patterns(joined),
        }
    }
}

impl Default for DependencyKeys {
    fn default() -> Self {
        DependencyKeys::List(Vec::new())
    }
}

fn split_patterns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// One configured duplication, before compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DuplicationConfig {
    /// Regexes in the form `groupId:artifactId:type[:classifier]`.
    pub dependency_keys: DependencyKeys,
    /// New scope for the duplicate. Leave empty to copy the source scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_scope: Option<String>,
    /// New type for the duplicate. Leave empty to copy the source type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// New classifier for the duplicate. Leave empty to copy the source classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_classifier: Option<String>,
    /// Set to `false` to keep duplicates out of dependent projects.
    #[serde(default = "default_add_downstream")]
    pub add_downstream: bool,
    /// Dependencies to add whenever `dependency_keys` matched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_dependencies: Vec<Dependency>,
}

fn default_add_downstream() -> bool {
    true
}

impl DuplicationConfig {
    pub fn compile(&self) -> Result<DuplicationRule> {
        let matchers = self
            .dependency_keys
            .patterns()
            .iter()
            .map(|p| DependencyMatcher::new(p))
            .collect::<Result<Vec<_>>>()?;

        let mut rule = DuplicationRule::new(matchers)
            .with_add_downstream(self.add_downstream)
            .with_additional_dependencies(self.additional_dependencies.clone());
        if let Some(scope) = non_blank(&self.target_scope) {
            rule = rule.with_target_scope(scope);
        }
        if let Some(type_) = non_blank(&self.target_type) {
            rule = rule.with_target_type(type_);
        }
        if let Some(classifier) = non_blank(&self.target_classifier) {
            rule = rule.with_target_classifier(classifier);
        }
        Ok(rule)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// The structured `duplicator` block of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuplicatorConfig {
    /// Duplications to match against existing dependencies. First match wins.
    #[serde(default)]
    pub duplications: Vec<DuplicationConfig>,
}

impl DuplicatorConfig {
    pub fn has_defined_duplications(&self) -> bool {
        !self.duplications.is_empty()
    }

    pub fn compile(&self) -> Result<Vec<DuplicationRule>> {
        self.duplications.iter().map(DuplicationConfig::compile).collect()
    }
}

/// Whether `properties` carry a property-form configuration.
pub fn has_property_config(properties: &BTreeMap<String, String>) -> bool {
    properties.contains_key(PROPERTY_SOURCE_DEPENDENCIES)
}

/// Reads the single property-form duplication from `properties`.
pub fn from_properties(properties: &BTreeMap<String, String>) -> DuplicationConfig {
    let source = properties
        .get(PROPERTY_SOURCE_DEPENDENCIES)
        .cloned()
        .unwrap_or_default();
    let add_downstream = properties
        .get(PROPERTY_ADD_DEPENDENCIES_DOWNSTREAM)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(true);

    DuplicationConfig {
        dependency_keys: DependencyKeys::Joined(source),
        target_scope: properties.get(PROPERTY_TARGET_SCOPE).cloned(),
        target_type: properties.get(PROPERTY_TARGET_TYPE).cloned(),
        target_classifier: properties.get(PROPERTY_TARGET_CLASSIFIER).cloned(),
        add_downstream,
        additional_dependencies: Vec::new(),
    }
}

/// Parses a standalone `duplicator` block.
pub fn parse(yaml_content: &str) -> Result<DuplicatorConfig> {
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("Each duplication needs 'dependency-keys'".to_string()),
    })
}
