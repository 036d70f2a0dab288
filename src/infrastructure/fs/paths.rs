//! Path comparison helpers

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the file system.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// True when `a` and `b` name the same directory.
///
/// Compares lexically first, then by canonical path when both exist, so a
/// symlinked destination pointing back at its source is caught too.
pub fn same_directory(a: &Path, b: &Path) -> bool {
    if normalize_lexically(a) == normalize_lexically(b) {
        return true;
    }

    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Deepest ancestor of `path` (or `path` itself) that is an existing directory.
pub fn nearest_existing_dir(path: &Path) -> Option<&Path> {
    path.ancestors().find(|dir| dir.is_dir())
}

/// Canonical spelling of `path`, resolving the part that exists today.
///
/// Change notifications may report resolved paths (`/private/var/...` for
/// `/var/...` on macOS); this gives the key they will arrive under.
pub fn canonical_alias(path: &Path) -> Option<PathBuf> {
    let existing = path.ancestors().find(|dir| dir.exists())?;
    let rest = path.strip_prefix(existing).ok()?;
    let resolved = existing.canonicalize().ok()?.join(rest);
    (resolved != path).then_some(resolved)
}
