//! Property-based tests for dependency keys and matching.
//!
//! These tests use proptest to generate random coordinates and verify that
//! matching is always a whole-key match and that keys follow overrides.

#[cfg(test)]
mod proptest_tests {
    use crate::dependency::Dependency;
    use crate::matcher::DependencyMatcher;
    use crate::rule::DuplicationRule;
    use proptest::prelude::*;

    const COORDINATE: &str = "[a-z][a-z0-9.-]{0,12}";

    fn dependency(group: &str, artifact: &str, classifier: Option<&str>) -> Dependency {
        let dependency = Dependency::new(group, artifact);
        match classifier {
            Some(classifier) => dependency.with_classifier(classifier),
            None => dependency,
        }
    }

    // ============================================================================
    // management key property tests
    // ============================================================================

    proptest! {
        /// Property: the key is group:artifact:type with the classifier appended when present
        #[test]
        fn key_has_expected_shape(
            group in COORDINATE,
            artifact in COORDINATE,
            classifier in proptest::option::of(COORDINATE),
        ) {
            let dep = dependency(&group, &artifact, classifier.as_deref());
            let expected = match &classifier {
                Some(c) => format!("{}:{}:jar:{}", group, artifact, c),
                None => format!("{}:{}:jar", group, artifact),
            };
            prop_assert_eq!(dep.management_key(), expected.as_str());
        }

        /// Property: a duplicate's key always reflects the overridden type and classifier
        #[test]
        fn duplicate_key_follows_overrides(
            group in COORDINATE,
            artifact in COORDINATE,
            target_type in COORDINATE,
            target_classifier in COORDINATE,
        ) {
            let source = Dependency::new(&group, &artifact);
            // warm the cache on the source
            let _ = source.management_key();

            let rule = DuplicationRule::new(vec![DependencyMatcher::new(".*").unwrap()])
                .with_target_type(target_type.clone())
                .with_target_classifier(target_classifier.clone());
            let duplicate = rule.duplicate(&source);

            let expected = format!("{}:{}:{}:{}", group, artifact, target_type, target_classifier);
            prop_assert_eq!(duplicate.management_key(), expected.as_str());
            prop_assert_eq!(source.management_key(), format!("{}:{}:jar", group, artifact));
        }
    }

    // ============================================================================
    // matcher property tests
    // ============================================================================

    proptest! {
        /// Property: the escaped key of a dependency always matches it
        #[test]
        fn escaped_key_matches_itself(
            group in COORDINATE,
            artifact in COORDINATE,
            classifier in proptest::option::of(COORDINATE),
        ) {
            let dep = dependency(&group, &artifact, classifier.as_deref());
            let matcher = DependencyMatcher::new(&regex::escape(dep.management_key())).unwrap();
            prop_assert!(matcher.matches(&dep));
        }

        /// Property: a literal key never matches a key with extra trailing segments
        #[test]
        fn literal_key_does_not_match_longer_key(
            group in COORDINATE,
            artifact in COORDINATE,
            classifier in COORDINATE,
        ) {
            let plain = Dependency::new(&group, &artifact);
            let classified = plain.clone().with_classifier(classifier);
            let matcher = DependencyMatcher::new(&regex::escape(plain.management_key())).unwrap();
            prop_assert!(matcher.matches(&plain));
            prop_assert!(!matcher.matches(&classified));
        }

        /// Property: a strict prefix of the key never matches
        #[test]
        fn prefix_never_matches(
            group in COORDINATE,
            artifact in COORDINATE,
            cut in 1usize..8,
        ) {
            let dep = Dependency::new(&group, &artifact);
            let key = dep.management_key();
            let prefix = &key[..key.len().saturating_sub(cut).max(1)];
            prop_assume!(prefix.len() < key.len());
            let matcher = DependencyMatcher::new(&regex::escape(prefix)).unwrap();
            prop_assert!(!matcher.matches(&dep));
        }

        /// Property: group:artifact:.* matches regardless of type and classifier
        #[test]
        fn wildcard_suffix_matches_any_type(
            group in COORDINATE,
            artifact in COORDINATE,
            type_ in COORDINATE,
            classifier in proptest::option::of(COORDINATE),
        ) {
            let dep = dependency(&group, &artifact, classifier.as_deref()).with_type(type_);
            let pattern = format!("{}:{}:.*", regex::escape(&group), regex::escape(&artifact));
            let matcher = DependencyMatcher::new(&pattern).unwrap();
            prop_assert!(matcher.matches(&dep));
        }
    }
}
