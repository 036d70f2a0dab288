//! Property tests for `files` entry normalization.

use std::path::{Component, PathBuf};

use proptest::prelude::*;

use depsync::domain::services::normalize_files_entry;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn segments() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization never panics on arbitrary input.
    #[test]
    fn property_normalize_never_panics(
        s in "(?s).{0,128}"
    ) {
        let _ = normalize_files_entry(&s);
    }

    /// PROPERTY: Accepted entries stay inside the package and hold no glob syntax.
    #[test]
    fn property_accepted_entries_are_literal_relative_paths(
        s in "[A-Za-z0-9./*?_{}\\[\\]-]{0,48}"
    ) {
        if let Ok(Some(path)) = normalize_files_entry(&s) {
            for component in path.components() {
                prop_assert!(matches!(component, Component::Normal(_)), "{:?}", path);
            }
            let text = path.to_string_lossy();
            prop_assert!(!text.contains(['*', '?', '[', ']', '{', '}']), "{}", text);
        }
    }

    /// PROPERTY: `./a/b/` and `a/b` name the same directory.
    #[test]
    fn property_literal_paths_normalize_to_themselves(
        parts in segments(),
        leading_dot in any::<bool>(),
        trailing_slash in any::<bool>(),
    ) {
        let joined = parts.join("/");
        let mut entry = joined.clone();
        if leading_dot {
            entry = format!("./{entry}");
        }
        if trailing_slash {
            entry.push('/');
        }

        prop_assert_eq!(normalize_files_entry(&entry), Ok(Some(PathBuf::from(&joined))));
    }

    /// PROPERTY: A glob suffix reduces to its literal directory prefix.
    #[test]
    fn property_glob_reduces_to_literal_prefix(
        parts in segments(),
        glob in prop_oneof![Just("**"), Just("*.js"), Just("{a,b}"), Just("file?.d.ts")],
    ) {
        let prefix = parts.join("/");
        let entry = format!("{prefix}/{glob}");

        prop_assert_eq!(normalize_files_entry(&entry), Ok(Some(PathBuf::from(&prefix))));
    }

    /// PROPERTY: Entries that climb out of the package are rejected.
    #[test]
    fn property_parent_escape_is_rejected(
        parts in segments(),
    ) {
        let entry = format!("../{}", parts.join("/"));
        prop_assert!(normalize_files_entry(&entry).is_err());
    }
}
