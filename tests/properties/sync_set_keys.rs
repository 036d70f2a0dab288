//! Property tests for sync-set keying and change routing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use proptest::prelude::*;

use depsync::domain::entities::{SyncMapping, SyncSet};

fn source_dir() -> impl Strategy<Value = PathBuf> {
    let segment = proptest::string::string_regex("[a-c]{1,2}").unwrap();
    proptest::collection::vec(segment, 1..=3)
        .prop_map(|segments| PathBuf::from("/ws").join(segments.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: One mapping per source directory; the last insert wins.
    #[test]
    fn property_sources_are_unique_keys(
        sources in proptest::collection::vec(source_dir(), 0..=12)
    ) {
        let mut set = SyncSet::new();
        let mut expected: BTreeMap<PathBuf, String> = BTreeMap::new();

        for (i, source) in sources.iter().enumerate() {
            let package = format!("pkg-{i}");
            set.insert(SyncMapping::new(&package, source, PathBuf::from("/nm").join(&package)));
            expected.insert(source.clone(), package);
        }

        prop_assert_eq!(set.len(), expected.len());
        for (source, package) in &expected {
            let mapping = set.get(source).expect("mapping for inserted source");
            prop_assert_eq!(&mapping.package, package);
        }
    }

    /// PROPERTY: A changed path routes to the deepest source root containing it.
    #[test]
    fn property_changes_route_to_deepest_root(
        sources in proptest::collection::vec(source_dir(), 1..=8),
        pick in any::<prop::sample::Index>(),
        suffix in proptest::collection::vec("[x-z]{1,3}", 0..=3),
    ) {
        let set: SyncSet = sources
            .iter()
            .map(|s| SyncMapping::new("p", s, "/nm/p"))
            .collect();

        let base = pick.get(&sources);
        let changed = suffix.iter().fold(base.clone(), |p, s| p.join(s));

        let routed = set.root_for(&changed).expect("path under a root must route");
        prop_assert!(changed.starts_with(&routed.source));

        let depth = routed.source.components().count();
        for source in set.sources() {
            if changed.starts_with(source) {
                prop_assert!(source.components().count() <= depth);
            }
        }
    }

    /// PROPERTY: Paths outside every root are never routed.
    #[test]
    fn property_outside_paths_are_dropped(
        sources in proptest::collection::vec(source_dir(), 0..=8),
        name in "[x-z]{1,6}",
    ) {
        let set: SyncSet = sources
            .iter()
            .map(|s| SyncMapping::new("p", s, "/nm/p"))
            .collect();

        let outside = PathBuf::from("/elsewhere").join(name);
        prop_assert!(set.root_for(&outside).is_none());
    }
}
