//! Console event sink
//!
//! Renders `SyncEvent`s as human-readable lines, or as NDJSON on stdout
//! when `--json` is set. Failures go to stderr.

use depsync::domain::ports::{SyncEvent, SyncEventSink};

use crate::ui::context::UiContext;
use crate::ui::views::{sync::render_event, watch};

#[derive(Debug, Clone, Copy)]
pub struct ConsoleEventSink {
    ui: UiContext,
    timestamps: bool,
    failures_are_fatal: bool,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self {
            ui,
            timestamps: false,
            failures_are_fatal: false,
        }
    }

    /// Prefix each line with the wall-clock time (watch mode).
    pub fn with_timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    /// A failed mirror aborts the run and is reported once by the caller's
    /// error block, so the console line is left out (one-shot mode).
    pub fn with_fatal_failures(mut self) -> Self {
        self.failures_are_fatal = true;
        self
    }

    fn should_show(&self, event: &SyncEvent) -> bool {
        if matches!(event, SyncEvent::MirrorFailed { .. }) {
            return !self.failures_are_fatal;
        }
        if self.ui.is_quiet() {
            return false;
        }
        !event.is_detail() || self.ui.shows_detail()
    }

    fn render(&self, event: &SyncEvent) -> String {
        if self.timestamps {
            watch::render_watch_event(
                &watch::clock_timestamp(),
                event,
                self.ui.color,
                self.ui.unicode,
            )
        } else {
            render_event(event, self.ui.color, self.ui.unicode)
        }
    }
}

impl SyncEventSink for ConsoleEventSink {
    fn on_event(&self, event: SyncEvent) {
        if self.ui.json {
            if let Err(e) = crate::ui::json::emit(&event) {
                tracing::debug!(error = %e, "failed to write event");
            }
            return;
        }

        if !self.should_show(&event) {
            return;
        }

        let rendered = self.render(&event);
        match event {
            SyncEvent::MirrorFailed { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    }
}
