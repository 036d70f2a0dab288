//! Property tests for lexical path comparison.

use std::path::PathBuf;

use proptest::prelude::*;

use depsync::infrastructure::fs::{normalize_lexically, same_directory};

fn segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[A-Za-z0-9_-]{1,10}").unwrap();
    proptest::collection::vec(segment, 1..=5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Lexical normalization never panics and is idempotent.
    #[test]
    fn property_normalize_is_idempotent(
        s in "[A-Za-z0-9./_-]{0,64}"
    ) {
        let once = normalize_lexically(std::path::Path::new(&s));
        let twice = normalize_lexically(&once);
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: `.` and `x/..` detours do not change which directory is named.
    #[test]
    fn property_detours_name_the_same_directory(
        parts in segments(),
        detour in "[a-z]{1,6}",
    ) {
        let plain = PathBuf::from("/nonexistent-root").join(parts.join("/"));
        let dotted = PathBuf::from("/nonexistent-root")
            .join(".")
            .join(&detour)
            .join("..")
            .join(parts.join("/./"));

        prop_assert!(same_directory(&plain, &dotted));
        prop_assert!(same_directory(&plain, &plain));
    }

    /// PROPERTY: Distinct sibling directories are never the same directory.
    #[test]
    fn property_siblings_differ(
        parts in segments(),
        a in "[a-m]{1,6}",
        b in "[n-z]{1,6}",
    ) {
        let base = PathBuf::from("/nonexistent-root").join(parts.join("/"));
        prop_assert!(!same_directory(&base.join(a), &base.join(b)));
    }
}
