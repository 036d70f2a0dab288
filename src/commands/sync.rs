use std::sync::Arc;

use anyhow::Result;
use depsync::application::{plan_sync, DirectoryMirror, SyncPlan, SyncReport, SyncUseCase};
use depsync::domain::ports::SyncEventSink;
use depsync::infrastructure::{NodeModulesLocator, PnpmWorkspace};

use super::Invocation;
use crate::ui::sink::ConsoleEventSink;
use crate::ui::views::sync::{render_plan, render_sync_header, render_sync_summary};

pub fn cmd_sync(inv: &Invocation, dry_run: bool) -> Result<()> {
    let ui = inv.ui;
    let sink: Arc<dyn SyncEventSink> =
        Arc::new(ConsoleEventSink::new(ui).with_fatal_failures());

    if !ui.json && !ui.is_quiet() {
        print!(
            "{}",
            render_sync_header(&inv.project, inv.config.sync.mode, ui.color, ui.unicode)
        );
    }

    let plan = plan_sync(
        &inv.project,
        inv.config.sync.mode,
        &PnpmWorkspace::new(),
        &NodeModulesLocator::new(),
        sink.as_ref(),
    )?;

    if dry_run {
        if ui.json {
            emit_plan_json(&plan)?;
        } else {
            print!("{}", render_plan(&plan, ui.color, ui.unicode));
        }
        return Ok(());
    }

    if plan.is_empty() {
        if let Some(hint) = plan.empty_hint() {
            if !ui.json && !ui.is_quiet() {
                println!("{hint}");
            }
        }
        return Ok(());
    }

    let report = SyncUseCase::new(DirectoryMirror::with_file_locks())
        .with_events(Arc::clone(&sink))
        .execute(&plan.sync_set)?;

    if ui.json {
        emit_report_json(&report)?;
    } else if !ui.is_quiet() {
        print!("{}", render_sync_summary(&report, ui.color, ui.unicode));
    }

    Ok(())
}

fn emit_plan_json(plan: &SyncPlan) -> Result<()> {
    for mapping in &plan.sync_set {
        crate::ui::json::emit(&serde_json::json!({
            "event": "planned",
            "package": mapping.package,
            "source": mapping.source,
            "destination": mapping.destination,
        }))?;
    }
    Ok(())
}

fn emit_report_json(report: &SyncReport) -> Result<()> {
    crate::ui::json::emit(&serde_json::json!({
        "event": "summary",
        "completed": report.completed.len(),
        "skipped": report.skipped.len(),
        "files_linked": report.files_linked,
        "files_copied": report.files_copied,
    }))?;
    Ok(())
}
