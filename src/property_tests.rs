//! Property-based tests for pattern compilation and matching.

use crate::pattern::{HttpMethod, PathPattern};
use proptest::prelude::*;

/// Generate literal path segments with no wildcard characters.
fn segment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_-]{1,12}").unwrap()
}

/// Generate literal paths of 1 to 5 segments.
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=5).prop_map(|segments| {
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.push_str(&segment);
        }
        path
    })
}

proptest! {
    /// A wildcard-free pattern matches exactly itself.
    #[test]
    fn literal_pattern_matches_only_itself(path in path_strategy(), other in path_strategy()) {
        let pattern = PathPattern::compile(&path, None).unwrap();
        prop_assert!(pattern.matches(&path, HttpMethod::Get));
        prop_assert_eq!(pattern.matches(&other, HttpMethod::Get), path == other);
    }

    /// Compilation is deterministic: two compiles of the same input agree on
    /// every probe.
    #[test]
    fn compilation_is_deterministic(pattern in path_strategy(), probe in path_strategy()) {
        let glob = format!("{pattern}/**");
        let first = PathPattern::compile(&glob, Some(HttpMethod::Post)).unwrap();
        let second = PathPattern::compile(&glob, Some(HttpMethod::Post)).unwrap();
        prop_assert_eq!(
            first.matches(&probe, HttpMethod::Post),
            second.matches(&probe, HttpMethod::Post)
        );
    }

    /// Whatever a single-segment wildcard accepts, the cross-segment wildcard
    /// accepts too.
    #[test]
    fn double_star_subsumes_single_star(prefix in segment_strategy(), probe in path_strategy()) {
        let single = PathPattern::compile(&format!("/{prefix}/*"), None).unwrap();
        let double = PathPattern::compile(&format!("/{prefix}/**"), None).unwrap();
        if single.matches(&probe, HttpMethod::Get) {
            prop_assert!(double.matches(&probe, HttpMethod::Get));
        }
    }

    /// A method-restricted pattern never matches a different method.
    #[test]
    fn method_restriction_is_exact(path in path_strategy()) {
        let pattern = PathPattern::compile(&path, Some(HttpMethod::Get)).unwrap();
        prop_assert!(!pattern.matches(&path, HttpMethod::Post));
        prop_assert!(pattern.matches(&path, HttpMethod::Get));
    }
}
