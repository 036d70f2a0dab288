//! Watch subscriptions for source roots
//!
//! Existing roots are watched recursively. A root that does not exist yet is
//! covered by a non-recursive watch on its nearest existing ancestor, which
//! reports the directory being created; the next refresh then moves the
//! subscription onto the root itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use notify::{RecursiveMode, Watcher};

use crate::error::DepsyncResult;
use crate::infrastructure::nearest_existing_dir;

/// Identity of a watched directory, so a root deleted and recreated between
/// refreshes is re-subscribed.
#[cfg(unix)]
fn dir_identity(path: &Path) -> Option<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path).ok().map(|m| (m.dev(), m.ino()))
}

#[cfg(not(unix))]
fn dir_identity(path: &Path) -> Option<(u64, u64)> {
    path.is_dir().then_some((0, 0))
}

#[derive(Debug, Default)]
pub struct Subscriptions {
    roots: BTreeMap<PathBuf, (u64, u64)>,
    ancestors: BTreeSet<PathBuf>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots currently watched recursively.
    pub fn watched_roots(&self) -> impl Iterator<Item = &Path> {
        self.roots.keys().map(PathBuf::as_path)
    }

    /// Ancestors watched on behalf of missing roots.
    pub fn watched_ancestors(&self) -> impl Iterator<Item = &Path> {
        self.ancestors.iter().map(PathBuf::as_path)
    }

    /// Bring watches in line with what exists on disk now.
    pub fn refresh<'a, W, I>(&mut self, watcher: &mut W, sources: I) -> DepsyncResult<()>
    where
        W: Watcher,
        I: IntoIterator<Item = &'a Path>,
    {
        let mut wanted_ancestors = BTreeSet::new();

        for source in sources {
            let current = dir_identity(source).filter(|_| source.is_dir());

            match (current, self.roots.get(source).copied()) {
                (Some(now), Some(before)) if now == before => continue,
                (Some(now), previous) => {
                    if previous.is_some() {
                        let _ = watcher.unwatch(source);
                    }
                    watcher.watch(source, RecursiveMode::Recursive)?;
                    tracing::debug!(root = %source.display(), "watching source root");
                    self.roots.insert(source.to_path_buf(), now);
                }
                (None, previous) => {
                    if previous.is_some() {
                        let _ = watcher.unwatch(source);
                        self.roots.remove(source);
                    }
                    if let Some(parent) = source.parent().and_then(nearest_existing_dir) {
                        wanted_ancestors.insert(parent.to_path_buf());
                    }
                }
            }
        }

        for stale in self.ancestors.difference(&wanted_ancestors) {
            let _ = watcher.unwatch(stale);
        }
        for fresh in wanted_ancestors.difference(&self.ancestors) {
            watcher.watch(fresh, RecursiveMode::NonRecursive)?;
            tracing::debug!(dir = %fresh.display(), "watching for a source root to appear");
        }
        self.ancestors = wanted_ancestors;

        Ok(())
    }
}
