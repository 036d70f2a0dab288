//! Sync Lock Port
//!
//! Cooperative, cross-process exclusion scoped to one destination directory.
//! Acquisition never blocks: callers either get the lock or learn that
//! someone else has it.

use std::fmt;
use std::io;
use std::path::Path;

/// A held lock. Dropping the handle releases it.
pub trait LockHandle: Send {
    /// Release explicitly, reporting any cleanup failure.
    fn release(self: Box<Self>) -> io::Result<()>;
}

/// Result of a non-blocking acquisition.
pub enum LockAttempt {
    Acquired(Box<dyn LockHandle>),
    Busy,
}

impl LockAttempt {
    pub fn is_acquired(&self) -> bool {
        matches!(self, LockAttempt::Acquired(_))
    }
}

impl fmt::Debug for LockAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockAttempt::Acquired(_) => f.write_str("Acquired"),
            LockAttempt::Busy => f.write_str("Busy"),
        }
    }
}

/// Advisory lock provider (`tryAcquire(resourceKey) -> Lock | Busy`).
pub trait SyncLock: Send + Sync {
    fn try_acquire(&self, resource: &Path) -> io::Result<LockAttempt>;
}
