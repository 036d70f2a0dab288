//! Watch Use Case
//!
//! Keeps mirrors current while sources are rebuilt:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (50ms default) on a fixed cadence
//! - Drain passes with bounded concurrency, never overlapping
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Sets up the watcher and owns the scheduler
//! - `WatchScheduler` - Routes changes, runs passes
//! - `Debouncer` - Idle / Debouncing state machine over the dirty set
//! - `Subscriptions` - Which directories are watched, and how
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(sync_set, mirror, WatchOptions::default());
//! use_case.start(running)?;
//! ```

mod scheduler;
mod state;
mod subscriptions;
mod use_case;


pub use scheduler::{PassSummary, WatchScheduler};
pub use state::{Debouncer, DirtySet, SchedulerState, DEBOUNCE_MS};
pub use subscriptions::Subscriptions;
pub use use_case::{WatchOptions, WatchUseCase};
