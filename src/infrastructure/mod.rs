//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Hard-link mirroring and path helpers
//! - `lock` - `fs2`-backed destination locks
//! - `locator` - Node-style installed package resolution
//! - `workspace` - pnpm workspace discovery and manifest reading

pub mod fs;
pub mod locator;
pub mod lock;
pub mod workspace;

// Re-export for convenience
pub use fs::{canonical_alias, hard_link_dir, nearest_existing_dir, same_directory};
pub use locator::NodeModulesLocator;
pub use lock::FileSyncLock;
pub use workspace::PnpmWorkspace;
