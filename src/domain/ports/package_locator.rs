//! Package Locator Port
//!
//! Resolves where an installed package lives on disk.

use std::path::{Path, PathBuf};

use crate::error::DepsyncResult;

pub trait PackageLocator: Send + Sync {
    /// Directory containing the installed manifest of `name`, resolved from `from`.
    ///
    /// Fails with `PackageNotFound`; callers must not retry.
    fn resolve_installed_path(&self, name: &str, from: &Path) -> DepsyncResult<PathBuf>;
}
