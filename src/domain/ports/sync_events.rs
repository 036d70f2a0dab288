//! Sync Event Port
//!
//! Components report progress through an injected sink instead of writing
//! to the console themselves.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{SelectionMode, SkipReason};

/// Event emitted while planning, mirroring or watching
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// Sync set computed
    PlanBuilt {
        mode: SelectionMode,
        packages: usize,
        mappings: usize,
    },

    /// Destination replaced with a fresh hard-linked mirror
    MirrorCompleted {
        package: String,
        source: PathBuf,
        destination: PathBuf,
        files_linked: usize,
        files_copied: usize,
    },

    /// Mirror did not run
    MirrorSkipped {
        package: String,
        source: PathBuf,
        destination: PathBuf,
        reason: SkipReason,
    },

    /// Delete or link failed
    MirrorFailed {
        package: String,
        source: PathBuf,
        destination: PathBuf,
        error: String,
    },

    /// Watch mode subscribed to its source roots
    WatchStarted { roots: Vec<PathBuf> },

    /// Change notification outside every source root
    ChangeDropped { path: PathBuf },

    /// Drain pass started
    PassStarted { dirty: usize },

    /// Drain pass finished
    PassCompleted {
        completed: usize,
        skipped: usize,
        failed: usize,
    },
}

impl SyncEvent {
    /// True for events only shown at verbose level.
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            SyncEvent::MirrorSkipped { .. }
                | SyncEvent::ChangeDropped { .. }
                | SyncEvent::PassStarted { .. }
        )
    }

    /// NDJSON line for this event.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving sync events
///
/// Implementations can be:
/// - ConsoleEventSink: human-readable lines
/// - JSON sink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait SyncEventSink: Send + Sync {
    /// Handle a sync event
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}
}
