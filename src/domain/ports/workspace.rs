//! Workspace Port
//!
//! Workspace-root discovery, manifest reading and member enumeration.
//! The sync engine treats these as black boxes.

use std::path::{Path, PathBuf};

use crate::domain::entities::{Manifest, Package};
use crate::error::DepsyncResult;

pub trait Workspace: Send + Sync {
    /// Directory holding the workspace definition, searching upward from `start`.
    ///
    /// Fails with `WorkspaceRootNotFound` when there is none.
    fn find_root(&self, start: &Path) -> DepsyncResult<PathBuf>;

    /// Read the manifest of the package rooted at `package_dir`.
    fn read_manifest(&self, package_dir: &Path) -> DepsyncResult<Manifest>;

    /// Every member package of the workspace rooted at `root`.
    fn list_packages(&self, root: &Path) -> DepsyncResult<Vec<Package>>;
}
