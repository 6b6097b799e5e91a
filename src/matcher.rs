//! Matches a dependency's management key against a configured regex.
//!
//! Patterns are matched against the whole key `group:artifact:type[:classifier]`,
//! never as a substring search. `g:a` does not match `g:a:jar`, and `g:a:jar`
//! does not match a dependency carrying a classifier. Append `:.*` to accept
//! any trailing segments.

use std::fmt;

use regex::Regex;

use crate::dependency::Dependency;
use crate::error::{Error, Result};

/// A compiled dependency key pattern.
#[derive(Debug, Clone)]
pub struct DependencyMatcher {
    pattern: String,
    regex: Regex,
}

impl DependencyMatcher {
    /// Compiles `pattern`. The pattern is anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, dependency: &Dependency) -> bool {
        self.matches_key(dependency.management_key())
    }

    pub fn matches_key(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The pattern as configured, without anchors.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for DependencyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_artifact() -> Dependency {
        Dependency::new("com.example", "someartifact")
    }

    fn other_artifact() -> Dependency {
        Dependency::new("com.example", "otherartifact")
    }

    fn with_classifier() -> Dependency {
        Dependency::new("com.example", "someartifact").with_classifier("testclassifier")
    }

    fn matcher(pattern: &str) -> DependencyMatcher {
        DependencyMatcher::new(pattern).unwrap()
    }

    #[test]
    fn test_group_only() {
        assert!(!matcher("com.example").matches(&some_artifact()));
        assert!(!matcher("com.example").matches(&other_artifact()));
        assert!(!matcher("com.example").matches(&with_classifier()));
    }

    #[test]
    fn test_group_with_match_any() {
        assert!(matcher("com.example:.*").matches(&some_artifact()));
        assert!(matcher("com.example:.*").matches(&other_artifact()));
        assert!(matcher("com.example:.*").matches(&with_classifier()));
    }

    #[test]
    fn test_group_artifact_only() {
        assert!(!matcher("com.example:someartifact").matches(&some_artifact()));
        assert!(!matcher("com.example:someartifact").matches(&with_classifier()));
    }

    #[test]
    fn test_group_artifact_with_match_any() {
        assert!(matcher("com.example:someartifact:.*").matches(&some_artifact()));
        assert!(!matcher("com.example:someartifact:.*").matches(&other_artifact()));
        assert!(matcher("com.example:someartifact:.*").matches(&with_classifier()));
    }

    #[test]
    fn test_group_artifact_type() {
        assert!(matcher("com.example:someartifact:jar").matches(&some_artifact()));
        assert!(!matcher("com.example:someartifact:jar").matches(&other_artifact()));
    }

    #[test]
    fn test_classifier_segment_is_required_by_exact_pattern() {
        assert!(!matcher("com.example:someartifact:jar").matches(&with_classifier()));
        assert!(matcher("com.example:someartifact:jar:.*").matches(&with_classifier()));
        assert!(matcher("com.example:someartifact:jar:testclassifier").matches(&with_classifier()));
    }

    #[test]
    fn test_catch_all_classifier_needs_a_classifier() {
        // the key of a dependency without classifier has no trailing ':'
        assert!(!matcher("com.example:someartifact:jar:.*").matches(&some_artifact()));
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let m = matcher("com.example:someartifact:jar|com.example");
        assert!(m.matches(&some_artifact()));
        assert!(!m.matches_key("com.example:otherartifact:jar"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = DependencyMatcher::new("[invalid(regex").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "[invalid(regex"));
    }

    #[test]
    fn test_display_is_raw_pattern() {
        assert_eq!(matcher("com.example:.*").to_string(), "com.example:.*");
    }
}
