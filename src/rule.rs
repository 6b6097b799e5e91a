//! # Duplication Rules
//!
//! A [`DuplicationRule`] decides which existing dependencies of a project get
//! duplicated and how the duplicate differs from its source.
//!
//! - The rule's patterns are OR-ed: one matching pattern is enough.
//! - Among a project's rules, the first matching rule wins and rules are never
//!   merged ([`find_first_match`]).
//! - [`DuplicationRule::duplicate`] copies the source and applies the target
//!   scope, type and classifier overrides that are set. The copy's management
//!   key is recomputed from the overridden fields.
//! - Additional dependencies are injected verbatim alongside the duplicate.
//!   They are never matched or overridden.

use std::fmt;

use crate::dependency::Dependency;
use crate::matcher::DependencyMatcher;

#[derive(Debug, Clone)]
pub struct DuplicationRule {
    matchers: Vec<DependencyMatcher>,
    target_scope: Option<String>,
    target_type: Option<String>,
    target_classifier: Option<String>,
    add_downstream: bool,
    additional_dependencies: Vec<Dependency>,
}

impl DuplicationRule {
    /// A rule that duplicates matches unchanged and propagates downstream.
    pub fn new(matchers: Vec<DependencyMatcher>) -> Self {
        Self {
            matchers,
            target_scope: None,
            target_type: None,
            target_classifier: None,
            add_downstream: true,
            additional_dependencies: Vec::new(),
        }
    }

    pub fn with_target_scope(mut self, scope: impl Into<String>) -> Self {
        self.target_scope = Some(scope.into());
        self
    }

    pub fn with_target_type(mut self, type_: impl Into<String>) -> Self {
        self.target_type = Some(type_.into());
        self
    }

    pub fn with_target_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.target_classifier = Some(classifier.into());
        self
    }

    pub fn with_add_downstream(mut self, add_downstream: bool) -> Self {
        self.add_downstream = add_downstream;
        self
    }

    pub fn with_additional_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.additional_dependencies = dependencies;
        self
    }

    pub fn matchers(&self) -> &[DependencyMatcher] {
        &self.matchers
    }

    pub fn target_scope(&self) -> Option<&str> {
        self.target_scope.as_deref()
    }

    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    pub fn target_classifier(&self) -> Option<&str> {
        self.target_classifier.as_deref()
    }

    pub fn add_downstream(&self) -> bool {
        self.add_downstream
    }

    pub fn additional_dependencies(&self) -> &[Dependency] {
        &self.additional_dependencies
    }

    /// The first of this rule's patterns that matches `dependency`.
    pub fn matching_pattern(&self, dependency: &Dependency) -> Option<&DependencyMatcher> {
        self.matchers.iter().find(|m| m.matches(dependency))
    }

    pub fn matches(&self, dependency: &Dependency) -> bool {
        self.matching_pattern(dependency).is_some()
    }

    /// Copies `source`, applying this rule's target overrides.
    pub fn duplicate(&self, source: &Dependency) -> Dependency {
        let mut clone = source.clone();
        if let Some(classifier) = &self.target_classifier {
            clone.set_classifier(Some(classifier.clone()));
        }
        if let Some(scope) = &self.target_scope {
            clone.set_scope(Some(scope.clone()));
        }
        if let Some(type_) = &self.target_type {
            clone.set_type(type_.clone());
        }
        clone
    }

    /// The duplicate of `source` followed by the additional dependencies.
    pub fn candidates(&self, source: &Dependency) -> Vec<Dependency> {
        let mut candidates = Vec::with_capacity(1 + self.additional_dependencies.len());
        candidates.push(self.duplicate(source));
        candidates.extend(self.additional_dependencies.iter().cloned());
        candidates
    }
}

impl fmt::Display for DuplicationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<&str> = self.matchers.iter().map(|m| m.pattern()).collect();
        write!(f, "{{dependencyKeys=[{}]", patterns.join(", "))?;
        if let Some(scope) = &self.target_scope {
            write!(f, ", targetScope={}", scope)?;
        }
        if let Some(type_) = &self.target_type {
            write!(f, ", targetType={}", type_)?;
        }
        if let Some(classifier) = &self.target_classifier {
            write!(f, ", targetClassifier={}", classifier)?;
        }
        write!(f, ", addDownstream={}}}", self.add_downstream)
    }
}

/// The rule (and pattern) that matched a dependency.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'r> {
    /// Position of the rule in the configured order.
    pub index: usize,
    pub rule: &'r DuplicationRule,
    pub pattern: &'r DependencyMatcher,
}

/// Finds the first rule, in configured order, with a pattern matching `dependency`.
pub fn find_first_match<'r>(
    dependency: &Dependency,
    rules: &'r [DuplicationRule],
) -> Option<RuleMatch<'r>> {
    rules.iter().enumerate().find_map(|(index, rule)| {
        rule.matching_pattern(dependency)
            .map(|pattern| RuleMatch {
                index,
                rule,
                pattern,
            })
    })
}
