//! depsync - keeps injected pnpm workspace dependencies in sync with their
//! source packages.
//!
//! pnpm installs an injected workspace dependency as a copy rather than a
//! symlink, so rebuilding the source package leaves the installed copy
//! stale. depsync resolves where each copy lives and replaces the published
//! directories with hard-linked mirrors of the source build output, once or
//! continuously in watch mode.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    plan_sync, DirectoryMirror, Mirror, SyncPlan, SyncReport, SyncUseCase, WatchOptions,
    WatchUseCase,
};
pub use config::Config;
pub use domain::entities::{SyncMapping, SyncSet};
pub use domain::value_objects::{MirrorOutcome, SelectionMode};
pub use error::{DepsyncError, DepsyncResult};
