use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use depsync::application::{plan_sync, DirectoryMirror, WatchOptions, WatchUseCase};
use depsync::domain::ports::SyncEventSink;
use depsync::infrastructure::{NodeModulesLocator, PnpmWorkspace};

use super::Invocation;
use crate::ui::sink::ConsoleEventSink;
use crate::ui::views::watch::render_watch_header;

pub fn cmd_watch(inv: &Invocation) -> Result<()> {
    let ui = inv.ui;
    let sink: Arc<dyn SyncEventSink> = Arc::new(ConsoleEventSink::new(ui).with_timestamps());

    // Set up Ctrl+C handler; the scheduler drops its locks on the way out.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    if !ui.json && !ui.is_quiet() {
        print!(
            "{}",
            render_watch_header(
                &inv.project,
                inv.config.sync.mode,
                inv.config.debounce(),
                ui.color,
                ui.unicode
            )
        );
    }

    let plan = plan_sync(
        &inv.project,
        inv.config.sync.mode,
        &PnpmWorkspace::new(),
        &NodeModulesLocator::new(),
        sink.as_ref(),
    )?;

    if let Some(hint) = plan.empty_hint() {
        if !ui.json && !ui.is_quiet() {
            println!("{hint}");
        }
    }

    let options = WatchOptions::default()
        .with_debounce(inv.config.debounce())
        .with_concurrency(inv.config.sync.concurrency);

    WatchUseCase::new(plan.sync_set, DirectoryMirror::with_file_locks(), options)
        .with_events(sink)
        .start(running)?;

    Ok(())
}
