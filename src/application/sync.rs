//! One-shot sync
//!
//! Mirrors every mapping once, in order. The first fatal error aborts the run.

use std::sync::Arc;

use crate::domain::entities::{SyncMapping, SyncSet};
use crate::domain::ports::{NoopEventSink, SyncEventSink};
use crate::domain::value_objects::{MirrorOutcome, SkipReason};
use crate::error::DepsyncResult;

use super::mirror::{mirror_mapping, Mirror};

/// Result of a one-shot sync
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Mappings mirrored
    pub completed: Vec<SyncMapping>,
    /// Mappings not mirrored, with the reason
    pub skipped: Vec<(SyncMapping, SkipReason)>,
    /// Files hard-linked across all mappings
    pub files_linked: usize,
    /// Files copied because linking failed
    pub files_copied: usize,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mapping: &SyncMapping, outcome: MirrorOutcome) {
        match outcome {
            MirrorOutcome::Completed(stats) => {
                self.files_linked += stats.files_linked;
                self.files_copied += stats.files_copied;
                self.completed.push(mapping.clone());
            }
            other => {
                if let Some(reason) = other.skip_reason() {
                    self.skipped.push((mapping.clone(), reason));
                }
            }
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.completed.is_empty()
    }

    /// Skip count for one reason.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|(_, r)| *r == reason).count()
    }
}

/// Sync use case - mirrors a sync set once
pub struct SyncUseCase<M: Mirror> {
    mirror: M,
    events: Arc<dyn SyncEventSink>,
}

impl<M: Mirror> SyncUseCase<M> {
    pub fn new(mirror: M) -> Self {
        Self {
            mirror,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SyncEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Mirror each mapping in order.
    pub fn execute(&self, sync_set: &SyncSet) -> DepsyncResult<SyncReport> {
        let mut report = SyncReport::new();
        for mapping in sync_set {
            let outcome = mirror_mapping(&self.mirror, mapping, self.events.as_ref())?;
            report.record(mapping, outcome);
        }
        Ok(report)
    }
}
