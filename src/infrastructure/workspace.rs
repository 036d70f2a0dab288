//! pnpm workspace repository
//!
//! Finds the workspace root (`pnpm-workspace.yaml`), reads `package.json`
//! manifests and enumerates the members matched by the `packages` globs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use serde::Deserialize;

use crate::domain::entities::{Manifest, Package};
use crate::domain::ports::Workspace;
use crate::error::{DepsyncError, DepsyncResult};

/// Workspace definition file
pub const WORKSPACE_MANIFEST: &str = "pnpm-workspace.yaml";

/// Package manifest file
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Environment variables that pin the workspace root
pub const WORKSPACE_DIR_ENV: &[&str] = &["NPM_CONFIG_WORKSPACE_DIR", "npm_config_workspace_dir"];

/// Directories never searched for workspace members.
const EXCLUDED_DIRS: &[&str] = &["node_modules", "bower_components", "test", "tests", ".git"];

#[derive(Debug, Default, Deserialize)]
struct WorkspaceManifest {
    #[serde(default)]
    packages: Vec<String>,
}

/// `Workspace` port backed by a pnpm workspace on disk.
#[derive(Debug, Clone, Default)]
pub struct PnpmWorkspace {
    pinned_root: Option<PathBuf>,
}

impl PnpmWorkspace {
    /// Workspace reader honouring `NPM_CONFIG_WORKSPACE_DIR`.
    pub fn new() -> Self {
        let pinned_root = WORKSPACE_DIR_ENV
            .iter()
            .find_map(|key| std::env::var_os(key))
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { pinned_root }
    }

    /// Workspace reader that only searches the file system.
    pub fn unpinned() -> Self {
        Self { pinned_root: None }
    }

    fn load_workspace_manifest(&self, root: &Path) -> DepsyncResult<WorkspaceManifest> {
        let path = root.join(WORKSPACE_MANIFEST);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(WorkspaceManifest::default())
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(WorkspaceManifest::default());
        }

        serde_yaml_ng::from_str(&content).map_err(|e| DepsyncError::InvalidWorkspaceConfig {
            path,
            message: e.to_string(),
        })
    }
}

/// Build a matcher where a hit means "is a workspace member".
///
/// Patterns are anchored at the workspace root; `!pattern` excludes.
fn member_matcher(root: &Path, patterns: &[String]) -> DepsyncResult<Gitignore> {
    let invalid = |message: String| DepsyncError::InvalidWorkspaceConfig {
        path: root.join(WORKSPACE_MANIFEST),
        message,
    };

    let mut builder = GitignoreBuilder::new(root);
    for pattern in patterns {
        let (negated, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern.as_str()),
        };
        let body = body.trim_start_matches("./").trim_start_matches('/');
        let body = body.trim_end_matches('/');
        if body.is_empty() {
            continue;
        }

        let line = if negated {
            format!("!/{body}")
        } else {
            format!("/{body}")
        };
        builder
            .add_line(None, &line)
            .map_err(|e| invalid(format!("bad package pattern '{pattern}': {e}")))?;
    }

    builder.build().map_err(|e| invalid(e.to_string()))
}

impl Workspace for PnpmWorkspace {
    fn find_root(&self, start: &Path) -> DepsyncResult<PathBuf> {
        if let Some(root) = &self.pinned_root {
            return Ok(root.clone());
        }

        start
            .ancestors()
            .find(|dir| dir.join(WORKSPACE_MANIFEST).is_file())
            .map(Path::to_path_buf)
            .ok_or_else(|| DepsyncError::WorkspaceRootNotFound {
                start: start.to_path_buf(),
            })
    }

    fn read_manifest(&self, package_dir: &Path) -> DepsyncResult<Manifest> {
        let path = package_dir.join(PACKAGE_MANIFEST);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DepsyncError::ManifestNotFound { path: path.clone() },
            _ => DepsyncError::Io(e),
        })?;

        Manifest::from_json(&content).map_err(|e| DepsyncError::InvalidManifest {
            path,
            message: e.to_string(),
        })
    }

    fn list_packages(&self, root: &Path) -> DepsyncResult<Vec<Package>> {
        let workspace = self.load_workspace_manifest(root)?;
        let matcher = member_matcher(root, &workspace.packages)?;

        let mut packages = Vec::new();
        if root.join(PACKAGE_MANIFEST).is_file() {
            packages.push(Package::new(root, self.read_manifest(root)?));
        }

        if workspace.packages.is_empty() {
            return Ok(packages);
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
            })
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| {
                DepsyncError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| io::Error::other("failed to walk workspace")),
                )
            })?;

            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }

            let dir = entry.path();
            let Ok(relative) = dir.strip_prefix(root) else {
                continue;
            };
            if !matcher.matched(relative, true).is_ignore() {
                continue;
            }
            if !dir.join(PACKAGE_MANIFEST).is_file() {
                continue;
            }

            packages.push(Package::new(dir, self.read_manifest(dir)?));
        }

        packages.sort_by(|a, b| a.root().cmp(b.root()));
        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(packages: &[Package]) -> Vec<&str> {
        packages.iter().filter_map(Package::name).collect()
    }

    #[test]
    fn find_root_walks_up() {
        let dir = tempdir().unwrap();
        write(&dir.path().join(WORKSPACE_MANIFEST), "packages: []\n");
        let nested = dir.path().join("apps/web");
        fs::create_dir_all(&nested).unwrap();

        let root = PnpmWorkspace::unpinned().find_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn find_root_reports_missing_workspace() {
        let dir = tempdir().unwrap();
        let err = PnpmWorkspace::unpinned().find_root(dir.path());
        // A stray pnpm-workspace.yaml above the temp dir would make this pass trivially.
        if let Err(e) = err {
            assert!(matches!(e, DepsyncError::WorkspaceRootNotFound { .. }));
        }
    }

    #[test]
    fn read_manifest_errors() {
        let dir = tempdir().unwrap();
        let ws = PnpmWorkspace::unpinned();

        let missing = ws.read_manifest(dir.path()).unwrap_err();
        assert!(matches!(missing, DepsyncError::ManifestNotFound { .. }));

        write(&dir.path().join(PACKAGE_MANIFEST), "{ not json");
        let invalid = ws.read_manifest(dir.path()).unwrap_err();
        assert!(matches!(invalid, DepsyncError::InvalidManifest { .. }));
    }

    #[test]
    fn lists_members_matching_globs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(
            &root.join(WORKSPACE_MANIFEST),
            "packages:\n  - 'packages/*'\n  - 'apps/**'\n  - '!apps/legacy'\n",
        );
        write(&root.join(PACKAGE_MANIFEST), r#"{ "name": "root" }"#);
        write(&root.join("packages/a/package.json"), r#"{ "name": "a" }"#);
        write(&root.join("packages/b/package.json"), r#"{ "name": "b" }"#);
        write(&root.join("packages/a/nested/package.json"), r#"{ "name": "nested" }"#);
        write(&root.join("apps/web/package.json"), r#"{ "name": "web" }"#);
        write(&root.join("apps/legacy/package.json"), r#"{ "name": "legacy" }"#);
        write(
            &root.join("packages/a/node_modules/dep/package.json"),
            r#"{ "name": "dep" }"#,
        );
        write(&root.join("tools/x/package.json"), r#"{ "name": "x" }"#);

        let packages = PnpmWorkspace::unpinned().list_packages(root).unwrap();

        assert_eq!(names(&packages), vec!["root", "web", "a", "b"]);
    }

    #[test]
    fn workspace_without_patterns_is_just_root() {
        let dir = tempdir().unwrap();
        write(&dir.path().join(WORKSPACE_MANIFEST), "");
        write(&dir.path().join(PACKAGE_MANIFEST), r#"{ "name": "solo" }"#);

        let packages = PnpmWorkspace::unpinned().list_packages(dir.path()).unwrap();
        assert_eq!(names(&packages), vec!["solo"]);
    }

    #[test]
    fn invalid_workspace_yaml_is_reported() {
        let dir = tempdir().unwrap();
        write(&dir.path().join(WORKSPACE_MANIFEST), "packages: [unclosed\n");

        let err = PnpmWorkspace::unpinned().list_packages(dir.path()).unwrap_err();
        assert!(matches!(err, DepsyncError::InvalidWorkspaceConfig { .. }));
    }
}
