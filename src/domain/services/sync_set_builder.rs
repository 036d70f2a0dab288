//! Sync-set builder
//!
//! Turns the owning project's manifest plus the workspace members into the
//! (source → destination) mappings that must be kept mirrored.

use std::path::{Component, Path, PathBuf};

use crate::domain::entities::{Package, SyncMapping, SyncSet};
use crate::domain::policies::policy_for;
use crate::domain::ports::PackageLocator;
use crate::domain::value_objects::SelectionMode;
use crate::error::{DepsyncError, DepsyncResult};

const GLOB_CHARS: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Reduce a `files` entry to the literal directory it names.
///
/// - `./dist/` → `dist`
/// - `dist/**` → `dist` (leading literal components of a glob)
/// - `*.js`, `!dist/test` → `None` (nothing literal to mirror)
///
/// Entries that leave the package (`..`, absolute paths) are rejected.
pub fn normalize_files_entry(entry: &str) -> Result<Option<PathBuf>, String> {
    let entry = entry.trim();
    if entry.is_empty() || entry.starts_with('!') {
        return Ok(None);
    }

    let mut normalized = PathBuf::new();
    for component in Path::new(entry).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => {
                if part.to_string_lossy().contains(GLOB_CHARS) {
                    break;
                }
                normalized.push(part);
            }
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(format!("'files' entry '{entry}' points outside the package"));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}

/// Builds the sync set for one project.
pub struct SyncSetBuilder<'a> {
    locator: &'a dyn PackageLocator,
}

impl<'a> SyncSetBuilder<'a> {
    pub fn new(locator: &'a dyn PackageLocator) -> Self {
        Self { locator }
    }

    /// Compute the mappings `own` needs from `workspace` under `mode`.
    ///
    /// An empty result is a legitimate no-op, not an error.
    pub fn build(
        &self,
        own: &Package,
        workspace: &[Package],
        mode: SelectionMode,
    ) -> DepsyncResult<SyncSet> {
        let policy = policy_for(mode);
        let mut set = SyncSet::new();

        for pkg in workspace {
            let Some(name) = pkg.name() else {
                tracing::debug!(root = %pkg.root().display(), "skipping workspace package without a name");
                continue;
            };

            if pkg.root() == own.root() || !policy.selects(own.manifest(), name) {
                continue;
            }

            let manifest = pkg.manifest();
            let Some(files) = manifest.files.as_ref() else {
                if manifest.has_exports() {
                    return Err(DepsyncError::MissingFilesDeclaration {
                        package: name.to_string(),
                    });
                }
                tracing::debug!(package = name, "no 'files' or 'exports' entry, nothing to sync");
                continue;
            };

            let mut sub_paths = Vec::with_capacity(files.len());
            for entry in files {
                match normalize_files_entry(entry) {
                    Ok(Some(sub_path)) => sub_paths.push(sub_path),
                    Ok(None) => {
                        tracing::debug!(package = name, entry = %entry, "'files' entry has no literal directory");
                    }
                    Err(message) => {
                        return Err(DepsyncError::InvalidManifest {
                            path: pkg.root().join("package.json"),
                            message,
                        });
                    }
                }
            }

            if sub_paths.is_empty() {
                continue;
            }

            let installed = self.locator.resolve_installed_path(name, own.root())?;
            for sub_path in sub_paths {
                let mapping =
                    SyncMapping::new(name, pkg.root().join(&sub_path), installed.join(&sub_path));
                if let Some(previous) = set.insert(mapping) {
                    tracing::warn!(
                        source = %previous.source.display(),
                        package = %previous.package,
                        "duplicate source directory, keeping the last declaration"
                    );
                }
            }
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Manifest;
    use std::collections::BTreeMap;

    /// Locator that maps every package to `/install/<name>`.
    struct FakeLocator {
        missing: Vec<&'static str>,
    }

    impl PackageLocator for FakeLocator {
        fn resolve_installed_path(&self, name: &str, from: &Path) -> DepsyncResult<PathBuf> {
            if self.missing.contains(&name) {
                return Err(DepsyncError::PackageNotFound {
                    name: name.to_string(),
                    from: from.to_path_buf(),
                });
            }
            Ok(PathBuf::from("/install").join(name))
        }
    }

    fn locator() -> FakeLocator {
        FakeLocator { missing: vec![] }
    }

    fn package(root: &str, json: &str) -> Package {
        Package::new(root, Manifest::from_json(json).unwrap())
    }

    fn workspace() -> Vec<Package> {
        vec![
            package("/ws/a", r#"{ "name": "a", "files": ["dist"] }"#),
            package("/ws/b", r#"{ "name": "b", "files": ["dist", "types"] }"#),
            package("/ws/c", r#"{ "name": "c", "files": ["dist"] }"#),
        ]
    }

    fn packages_of(set: &SyncSet) -> Vec<&str> {
        let mut names: Vec<&str> = set.iter().map(|m| m.package.as_str()).collect();
        names.dedup();
        names
    }

    #[test]
    fn injected_mode_selects_only_marked_packages() {
        let own = package(
            "/ws/app",
            r#"{
                "name": "app",
                "dependencies": { "a": "workspace:*", "b": "workspace:*", "c": "workspace:*" },
                "dependenciesMeta": { "a": { "injected": true }, "b": { "injected": false } }
            }"#,
        );

        let locator = locator();
        let set = SyncSetBuilder::new(&locator)
            .build(&own, &workspace(), SelectionMode::Injected)
            .unwrap();

        assert_eq!(packages_of(&set), vec!["a"]);
        let mapping = set.get(Path::new("/ws/a/dist")).unwrap();
        assert_eq!(mapping.destination, PathBuf::from("/install/a/dist"));
    }

    #[test]
    fn injected_mode_without_meta_is_empty() {
        let own = package("/ws/app", r#"{ "name": "app", "dependencies": { "a": "*" } }"#);
        let locator = locator();
        let set = SyncSetBuilder::new(&locator)
            .build(&own, &workspace(), SelectionMode::Injected)
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn blanket_mode_selects_declared_workspace_dependencies() {
        let own = package(
            "/ws/app",
            r#"{ "name": "app", "dependencies": { "a": "*" }, "devDependencies": { "b": "*" } }"#,
        );

        let locator = locator();
        let set = SyncSetBuilder::new(&locator)
            .build(&own, &workspace(), SelectionMode::Workspace)
            .unwrap();

        assert_eq!(packages_of(&set), vec!["a", "b"]);
        assert_eq!(set.len(), 3);
        assert!(set.get(Path::new("/ws/b/types")).is_some());
    }

    #[test]
    fn missing_files_without_exports_is_skipped() {
        let own = package("/ws/app", r#"{ "name": "app", "dependencies": { "d": "*" } }"#);
        let ws = vec![package("/ws/d", r#"{ "name": "d", "main": "index.js" }"#)];

        let locator = locator();
        let set = SyncSetBuilder::new(&locator)
            .build(&own, &ws, SelectionMode::Workspace)
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn missing_files_with_exports_fails_loud() {
        let own = package("/ws/app", r#"{ "name": "app", "dependencies": { "e": "*" } }"#);
        let ws = vec![package(
            "/ws/e",
            r#"{ "name": "e", "exports": { ".": "./dist/index.js" } }"#,
        )];

        let locator = locator();
        let err = SyncSetBuilder::new(&locator)
            .build(&own, &ws, SelectionMode::Workspace)
            .unwrap_err();
        assert!(matches!(err, DepsyncError::MissingFilesDeclaration { package } if package == "e"));
    }

    #[test]
    fn unnamed_packages_are_skipped() {
        let own = package("/ws/app", r#"{ "name": "app", "dependencies": { "": "*" } }"#);
        let ws = vec![package("/ws/anon", r#"{ "files": ["dist"] }"#)];

        let locator = locator();
        let set = SyncSetBuilder::new(&locator)
            .build(&own, &ws, SelectionMode::Workspace)
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn unresolvable_package_is_a_hard_stop() {
        let own = package("/ws/app", r#"{ "name": "app", "dependencies": { "a": "*" } }"#);
        let locator = FakeLocator { missing: vec!["a"] };

        let err = SyncSetBuilder::new(&locator)
            .build(&own, &workspace(), SelectionMode::Workspace)
            .unwrap_err();
        assert!(matches!(err, DepsyncError::PackageNotFound { name, .. } if name == "a"));
    }

    #[test]
    fn own_package_is_never_selected() {
        let mut deps = BTreeMap::new();
        deps.insert("app".to_string(), "*".to_string());
        let own = Package::new(
            "/ws/app",
            Manifest {
                name: Some("app".to_string()),
                dependencies: deps,
                files: Some(vec!["dist".to_string()]),
                ..Manifest::default()
            },
        );
        let ws = vec![own.clone()];

        let locator = locator();
        let set = SyncSetBuilder::new(&locator)
            .build(&own, &ws, SelectionMode::Workspace)
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn files_entries_are_normalized() {
        assert_eq!(normalize_files_entry("./dist/"), Ok(Some(PathBuf::from("dist"))));
        assert_eq!(normalize_files_entry("dist/**"), Ok(Some(PathBuf::from("dist"))));
        assert_eq!(
            normalize_files_entry("lib/esm/*.js"),
            Ok(Some(PathBuf::from("lib/esm")))
        );
        assert_eq!(normalize_files_entry("*.d.ts"), Ok(None));
        assert_eq!(normalize_files_entry("!dist/test"), Ok(None));
        assert!(normalize_files_entry("../other").is_err());
        assert!(normalize_files_entry("/etc").is_err());
    }

    #[test]
    fn escaping_files_entry_is_invalid_manifest() {
        let own = package("/ws/app", r#"{ "name": "app", "dependencies": { "x": "*" } }"#);
        let ws = vec![package("/ws/x", r#"{ "name": "x", "files": ["../../etc"] }"#)];

        let locator = locator();
        let err = SyncSetBuilder::new(&locator)
            .build(&own, &ws, SelectionMode::Workspace)
            .unwrap_err();
        assert!(matches!(err, DepsyncError::InvalidManifest { .. }));
    }
}
