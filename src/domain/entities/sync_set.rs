//! Sync mappings
//!
//! A `SyncSet` holds every (source → destination) pair for one run, keyed by
//! source directory. Inserting a second mapping for the same source replaces
//! the first.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One source directory kept mirrored at one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncMapping {
    /// Package that owns the source directory
    pub package: String,
    /// Build output inside the workspace package
    pub source: PathBuf,
    /// Installed copy that gets replaced
    pub destination: PathBuf,
}

impl SyncMapping {
    pub fn new(
        package: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package: package.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// The set of mappings for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSet {
    mappings: BTreeMap<PathBuf, SyncMapping>,
}

impl SyncSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping, returning the one it replaced (if any).
    pub fn insert(&mut self, mapping: SyncMapping) -> Option<SyncMapping> {
        self.mappings.insert(mapping.source.clone(), mapping)
    }

    pub fn get(&self, source: &Path) -> Option<&SyncMapping> {
        self.mappings.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncMapping> {
        self.mappings.values()
    }

    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.mappings.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Number of distinct packages contributing mappings.
    pub fn package_count(&self) -> usize {
        let mut names: Vec<&str> = self.mappings.values().map(|m| m.package.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// Find the mapping whose source directory contains `path`.
    ///
    /// Matching is per path component; the deepest source root wins when
    /// roots are nested.
    pub fn root_for(&self, path: &Path) -> Option<&SyncMapping> {
        self.mappings
            .iter()
            .filter(|(source, _)| path.starts_with(source))
            .max_by_key(|(source, _)| source.components().count())
            .map(|(_, mapping)| mapping)
    }
}

impl<'a> IntoIterator for &'a SyncSet {
    type Item = &'a SyncMapping;
    type IntoIter = std::collections::btree_map::Values<'a, PathBuf, SyncMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.values()
    }
}

impl FromIterator<SyncMapping> for SyncSet {
    fn from_iter<T: IntoIterator<Item = SyncMapping>>(iter: T) -> Self {
        let mut set = SyncSet::new();
        for mapping in iter {
            set.insert(mapping);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_insert_wins_for_same_source() {
        let mut set = SyncSet::new();
        assert!(set.insert(SyncMapping::new("a", "/ws/a/dist", "/nm/a/dist")).is_none());
        let replaced = set.insert(SyncMapping::new("b", "/ws/a/dist", "/nm/b/dist"));

        assert_eq!(replaced.unwrap().package, "a");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(Path::new("/ws/a/dist")).unwrap().destination,
            PathBuf::from("/nm/b/dist")
        );
    }

    #[test]
    fn root_for_matches_whole_components() {
        let set: SyncSet = [
            SyncMapping::new("a", "/ws/a/dist", "/nm/a/dist"),
            SyncMapping::new("a", "/ws/a/dist-types", "/nm/a/dist-types"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.root_for(Path::new("/ws/a/dist-types/index.d.ts"))
                .unwrap()
                .source,
            PathBuf::from("/ws/a/dist-types")
        );
        assert_eq!(
            set.root_for(Path::new("/ws/a/dist/index.js")).unwrap().source,
            PathBuf::from("/ws/a/dist")
        );
        assert!(set.root_for(Path::new("/ws/a/src/index.ts")).is_none());
    }

    #[test]
    fn root_for_prefers_deepest_root() {
        let set: SyncSet = [
            SyncMapping::new("a", "/ws/a", "/nm/a"),
            SyncMapping::new("b", "/ws/a/nested", "/nm/b"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.root_for(Path::new("/ws/a/nested/x.js")).unwrap().package,
            "b"
        );
        assert_eq!(set.root_for(Path::new("/ws/a/x.js")).unwrap().package, "a");
    }

    #[test]
    fn package_count_dedups() {
        let set: SyncSet = [
            SyncMapping::new("a", "/ws/a/dist", "/nm/a/dist"),
            SyncMapping::new("a", "/ws/a/lib", "/nm/a/lib"),
            SyncMapping::new("b", "/ws/b/dist", "/nm/b/dist"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.package_count(), 2);
        assert_eq!(set.len(), 3);
    }
}
