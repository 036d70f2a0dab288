//! Watch Scheduler
//!
//! Routes change notifications to source roots, debounces them and drains
//! the dirty set in passes. Passes run one at a time on the calling thread,
//! so a key is never mirrored by two passes at once; within a pass, distinct
//! keys are mirrored on a bounded number of worker threads.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::application::mirror::{mirror_mapping, Mirror};
use crate::domain::entities::{SyncMapping, SyncSet};
use crate::domain::ports::{NoopEventSink, SyncEvent, SyncEventSink};
use crate::domain::value_objects::MirrorOutcome;
use crate::error::{DepsyncError, DepsyncResult};
use crate::infrastructure::canonical_alias;

use super::state::Debouncer;

/// Upper bound on one wait, so a cleared running flag is noticed promptly.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Counts for one drain pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PassSummary {
    fn record(&mut self, result: &DepsyncResult<MirrorOutcome>) {
        match result {
            Ok(MirrorOutcome::Completed(_)) => self.completed += 1,
            Ok(_) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}

pub struct WatchScheduler<M: Mirror> {
    sync_set: SyncSet,
    mirror: M,
    events: Arc<dyn SyncEventSink>,
    interval: Duration,
    concurrency: usize,
    /// (canonical spelling, registered source) for roots whose path resolves elsewhere
    aliases: Vec<(PathBuf, PathBuf)>,
}

impl<M: Mirror> WatchScheduler<M> {
    pub fn new(sync_set: SyncSet, mirror: M, interval: Duration) -> Self {
        let aliases = sync_set
            .sources()
            .filter_map(|source| canonical_alias(source).map(|alias| (alias, source.to_path_buf())))
            .collect();

        Self {
            sync_set,
            mirror,
            events: Arc::new(NoopEventSink),
            interval,
            concurrency: 1,
            aliases,
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SyncEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Mirrors allowed to run at once within a pass (at least one).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn sync_set(&self) -> &SyncSet {
        &self.sync_set
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    /// Source root a changed path belongs to.
    pub fn route(&self, path: &Path) -> Option<&Path> {
        if let Some(mapping) = self.sync_set.root_for(path) {
            return Some(&mapping.source);
        }

        self.aliases
            .iter()
            .filter(|(alias, _)| path.starts_with(alias))
            .max_by_key(|(alias, _)| alias.components().count())
            .map(|(_, source)| source.as_path())
    }

    /// Mirror every key once; failures are reported, not returned.
    pub fn run_pass(&self, keys: Vec<PathBuf>) -> PassSummary {
        self.events.on_event(SyncEvent::PassStarted { dirty: keys.len() });

        let mappings: Vec<&SyncMapping> = keys
            .iter()
            .filter_map(|key| self.sync_set.get(key))
            .collect();
        let workers = self.concurrency.min(mappings.len());
        let queue = Mutex::new(mappings.into_iter());
        let summary = Mutex::new(PassSummary::default());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let next = match queue.lock() {
                        Ok(mut queue) => queue.next(),
                        Err(_) => None,
                    };
                    let Some(mapping) = next else { break };

                    let result = mirror_mapping(&self.mirror, mapping, self.events.as_ref());
                    if let Err(e) = &result {
                        tracing::warn!(package = %mapping.package, error = %e, "mirror failed");
                    }
                    if let Ok(mut summary) = summary.lock() {
                        summary.record(&result);
                    }
                });
            }
        });

        let summary = summary
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.events.on_event(SyncEvent::PassCompleted {
            completed: summary.completed,
            skipped: summary.skipped,
            failed: summary.failed,
        });
        summary
    }

    fn observe(&self, path: PathBuf, debouncer: &mut Debouncer) {
        match self.route(&path) {
            Some(root) => debouncer.mark_dirty(root.to_path_buf(), Instant::now()),
            None => {
                tracing::debug!(path = %path.display(), "path not under a watched root");
                self.events.on_event(SyncEvent::ChangeDropped { path });
            }
        }
    }

    /// Run until `running` is cleared.
    ///
    /// Starts with a full pass over every mapping, then drains changed
    /// roots at the debounce cadence. `on_activity` runs after each batch of
    /// notifications, before it is routed.
    pub fn run<F>(
        &self,
        rx: &Receiver<PathBuf>,
        running: &AtomicBool,
        mut on_activity: F,
    ) -> DepsyncResult<()>
    where
        F: FnMut(),
    {
        let all: Vec<PathBuf> = self.sync_set.sources().map(Path::to_path_buf).collect();
        self.run_pass(all);

        let mut debouncer = Debouncer::new(self.interval, Instant::now());

        while running.load(Ordering::SeqCst) {
            let wait = debouncer.time_until_due(Instant::now()).min(MAX_POLL);
            match rx.recv_timeout(wait) {
                Ok(first) => {
                    let mut batch = vec![first];
                    batch.extend(rx.try_iter());
                    on_activity();
                    for path in batch {
                        self.observe(path, &mut debouncer);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(DepsyncError::Watch {
                        message: "change notifications stopped".to_string(),
                    });
                }
            }

            if let Some(keys) = debouncer.take_due(Instant::now()) {
                self.run_pass(keys);
            }
        }

        Ok(())
    }
}
