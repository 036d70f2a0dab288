//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `plan_sync` - Reads the workspace and builds the sync set
//! - `SyncUseCase` - Mirrors every mapping once
//! - `WatchUseCase` - Re-mirrors mappings as their sources change
//!
//! ## Services
//!
//! - `DirectoryMirror` - Lock-guarded hard-link mirror of one directory

pub mod mirror;
pub mod plan;
pub mod sync;
pub mod watch;

pub use mirror::{mirror_mapping, DirectoryMirror, Mirror};
pub use plan::{plan_sync, SyncPlan};
pub use sync::{SyncReport, SyncUseCase};
pub use watch::{
    Debouncer, DirtySet, PassSummary, SchedulerState, Subscriptions, WatchOptions,
    WatchScheduler, WatchUseCase, DEBOUNCE_MS,
};
