//! Installed package resolution
//!
//! Follows the Node module search order: `node_modules/<name>` in the
//! starting directory, then in each ancestor.

use std::path::{Component, Path, PathBuf};

use crate::domain::ports::PackageLocator;
use crate::error::{DepsyncError, DepsyncResult};

const NODE_MODULES: &str = "node_modules";

/// Resolves packages through `node_modules` directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeModulesLocator;

impl NodeModulesLocator {
    pub fn new() -> Self {
        Self
    }
}

/// `name` or `@scope/name`, with no path tricks.
fn is_valid_package_name(name: &str) -> bool {
    let components: Vec<Component<'_>> = Path::new(name).components().collect();
    let all_normal = components.iter().all(|c| matches!(c, Component::Normal(_)));
    match components.len() {
        1 => all_normal && !name.starts_with('@'),
        2 => all_normal && name.starts_with('@'),
        _ => false,
    }
}

impl PackageLocator for NodeModulesLocator {
    fn resolve_installed_path(&self, name: &str, from: &Path) -> DepsyncResult<PathBuf> {
        let not_found = || DepsyncError::PackageNotFound {
            name: name.to_string(),
            from: from.to_path_buf(),
        };

        if !is_valid_package_name(name) {
            return Err(not_found());
        }

        for dir in from.ancestors() {
            if dir.file_name().is_some_and(|n| n == NODE_MODULES) {
                continue;
            }

            let candidate = dir.join(NODE_MODULES).join(name);
            if candidate.join("package.json").is_file() {
                let resolved = candidate.canonicalize()?;
                tracing::debug!(package = name, path = %resolved.display(), "resolved installed package");
                return Ok(resolved);
            }
        }

        Err(not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn install(dir: &Path, name: &str) -> PathBuf {
        let pkg = dir.join(NODE_MODULES).join(name);
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), format!(r#"{{"name":"{name}"}}"#)).unwrap();
        pkg
    }

    #[test]
    fn resolves_from_starting_directory() {
        let dir = tempdir().unwrap();
        let pkg = install(dir.path(), "lib");

        let resolved = NodeModulesLocator
            .resolve_installed_path("lib", dir.path())
            .unwrap();
        assert_eq!(resolved, pkg.canonicalize().unwrap());
    }

    #[test]
    fn walks_up_to_ancestors() {
        let dir = tempdir().unwrap();
        let pkg = install(dir.path(), "@acme/ui");
        let nested = dir.path().join("apps/web/src");
        fs::create_dir_all(&nested).unwrap();

        let resolved = NodeModulesLocator
            .resolve_installed_path("@acme/ui", &nested)
            .unwrap();
        assert_eq!(resolved, pkg.canonicalize().unwrap());
    }

    #[test]
    fn nearest_installation_wins() {
        let dir = tempdir().unwrap();
        install(dir.path(), "lib");
        let app = dir.path().join("app");
        let near = install(&app, "lib");

        let resolved = NodeModulesLocator.resolve_installed_path("lib", &app).unwrap();
        assert_eq!(resolved, near.canonicalize().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn resolves_symlinks_to_store_location() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("node_modules/.pnpm/lib@file+lib/node_modules/lib");
        fs::create_dir_all(&store).unwrap();
        fs::write(store.join("package.json"), "{}").unwrap();
        std::os::unix::fs::symlink(&store, dir.path().join("node_modules/lib")).unwrap();

        let resolved = NodeModulesLocator
            .resolve_installed_path("lib", dir.path())
            .unwrap();
        assert_eq!(resolved, store.canonicalize().unwrap());
    }

    #[test]
    fn missing_package_is_not_found() {
        let dir = tempdir().unwrap();
        let err = NodeModulesLocator
            .resolve_installed_path("ghost", dir.path())
            .unwrap_err();
        assert!(matches!(err, DepsyncError::PackageNotFound { name, .. } if name == "ghost"));
    }

    #[test]
    fn rejects_path_like_names() {
        assert!(is_valid_package_name("lib"));
        assert!(is_valid_package_name("@scope/lib"));
        assert!(!is_valid_package_name("../lib"));
        assert!(!is_valid_package_name("a/b"));
        assert!(!is_valid_package_name("@scope/../x"));
        assert!(!is_valid_package_name(""));
    }
}
