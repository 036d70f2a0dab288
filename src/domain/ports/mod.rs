//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod package_locator;
pub mod sync_events;
pub mod sync_lock;
pub mod workspace;

pub use package_locator::PackageLocator;
pub use sync_events::{NoopEventSink, SyncEvent, SyncEventSink};
pub use sync_lock::{LockAttempt, LockHandle, SyncLock};
pub use workspace::Workspace;
