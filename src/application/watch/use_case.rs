//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, Watcher};

use crate::application::mirror::Mirror;
use crate::domain::entities::SyncSet;
use crate::domain::ports::{NoopEventSink, SyncEvent, SyncEventSink};
use crate::error::DepsyncResult;

use super::scheduler::WatchScheduler;
use super::state::DEBOUNCE_MS;
use super::subscriptions::Subscriptions;

/// Watch options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Quiet period before a pass, and the cadence of the drain loop
    pub debounce: Duration,
    /// Mirrors running at once within a pass
    pub concurrency: usize,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            concurrency: 4,
        }
    }
}

impl WatchOptions {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Events worth a resync.
///
/// Reads and metadata-only changes are dropped: hard-linking a source file
/// bumps its link count, which would otherwise feed every pass back into
/// the next one.
pub(crate) fn is_content_change(kind: &EventKind) -> bool {
    !matches!(
        kind,
        EventKind::Access(_) | EventKind::Modify(ModifyKind::Metadata(_))
    )
}

/// Watch use case - keeps every mapping mirrored as sources change
pub struct WatchUseCase<M: Mirror> {
    scheduler: WatchScheduler<M>,
    events: Arc<dyn SyncEventSink>,
}

impl<M: Mirror> WatchUseCase<M> {
    pub fn new(sync_set: SyncSet, mirror: M, options: WatchOptions) -> Self {
        Self {
            scheduler: WatchScheduler::new(sync_set, mirror, options.debounce)
                .with_concurrency(options.concurrency),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SyncEventSink>) -> Self {
        self.scheduler = self.scheduler.with_events(Arc::clone(&events));
        self.events = events;
        self
    }

    /// Start watching (blocking)
    ///
    /// Returns once `running` is cleared, or with an error if the file
    /// watcher cannot be set up or stops delivering events.
    pub fn start(&self, running: Arc<AtomicBool>) -> DepsyncResult<()> {
        let roots: Vec<PathBuf> = self
            .scheduler
            .sync_set()
            .sources()
            .map(Path::to_path_buf)
            .collect();

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if is_content_change(&event.kind) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            },
            Config::default(),
        )?;

        let mut subscriptions = Subscriptions::new();
        subscriptions.refresh(&mut watcher, roots.iter().map(PathBuf::as_path))?;

        self.events.on_event(SyncEvent::WatchStarted {
            roots: roots.clone(),
        });

        self.scheduler.run(&rx, &running, || {
            let sources = roots.iter().map(PathBuf::as_path);
            if let Err(e) = subscriptions.refresh(&mut watcher, sources) {
                tracing::warn!(error = %e, "failed to update watches");
            }
        })
    }
}
