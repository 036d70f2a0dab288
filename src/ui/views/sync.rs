use std::path::Path;

use depsync::application::{SyncPlan, SyncReport};
use depsync::domain::ports::SyncEvent;
use depsync::domain::value_objects::{SelectionMode, SkipReason};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// `path` relative to `root` when it lives underneath it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

pub fn render_sync_header(
    project: &Path,
    mode: SelectionMode,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Sync, "depsync");
    header.add("Project", project.display().to_string());
    header.add("Mode", mode.as_str());
    header.render(supports_color, supports_unicode)
}

/// Mapping table printed by `--dry-run`.
pub fn render_plan(plan: &SyncPlan, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Plan.colored(supports_color, supports_unicode),
        ColoredText::info("Sync Plan (dry run)")
            .bold()
            .render(supports_color)
    );

    let root = plan.workspace_root.as_path();
    let mut current: Option<&str> = None;
    for mapping in &plan.sync_set {
        if current != Some(mapping.package.as_str()) {
            out.push_str(&format!("  {}\n", mapping.package));
            current = Some(mapping.package.as_str());
        }
        out.push_str(&format!(
            "    {} {} {}\n",
            display_path(&mapping.source, root),
            Icon::Arrow.colored(supports_color, supports_unicode),
            display_path(&mapping.destination, root)
        ));
    }

    if let Some(hint) = plan.empty_hint() {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            hint
        ));
    }

    out
}

/// One console line for a sync event.
pub fn render_event(event: &SyncEvent, supports_color: bool, supports_unicode: bool) -> String {
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);
    let arrow = icon(Icon::Arrow);

    match event {
        SyncEvent::PlanBuilt {
            mode,
            packages,
            mappings,
        } => format!(
            "{} Found {} {} to sync ({} {}, {} mode)\n",
            icon(Icon::Progress),
            packages,
            plural(*packages, "package", "packages"),
            mappings,
            plural(*mappings, "directory", "directories"),
            mode
        ),
        SyncEvent::MirrorCompleted {
            package,
            source,
            destination,
            files_linked,
            files_copied,
        } => {
            let files = if *files_copied > 0 {
                format!("{files_linked} linked, {files_copied} copied")
            } else {
                format!("{} {}", files_linked, plural(*files_linked, "file", "files"))
            };
            format!(
                "{} {}: {} {} {} {}\n",
                icon(Icon::Success),
                package,
                source.display(),
                arrow,
                destination.display(),
                ColoredText::dim(format!("({files})")).render(supports_color)
            )
        }
        SyncEvent::MirrorSkipped {
            package,
            source,
            reason,
            ..
        } => format!(
            "{} {}: skipped {} {}\n",
            icon(Icon::Skipped),
            package,
            source.display(),
            ColoredText::dim(format!("({})", reason.describe())).render(supports_color)
        ),
        SyncEvent::MirrorFailed {
            package,
            source,
            destination,
            error,
        } => format!(
            "{} {}: {} {} {}: {}\n",
            icon(Icon::Error),
            package,
            source.display(),
            arrow,
            destination.display(),
            ColoredText::error(error.as_str()).render(supports_color)
        ),
        SyncEvent::WatchStarted { roots } => format!(
            "{} Watching {} source {}\n",
            icon(Icon::Watch),
            roots.len(),
            plural(roots.len(), "directory", "directories")
        ),
        SyncEvent::ChangeDropped { path } => format!(
            "{} Ignored change outside source directories: {}\n",
            icon(Icon::Skipped),
            path.display()
        ),
        SyncEvent::PassStarted { dirty } => format!(
            "{} Syncing {} changed {}...\n",
            icon(Icon::Progress),
            dirty,
            plural(*dirty, "directory", "directories")
        ),
        SyncEvent::PassCompleted {
            completed,
            skipped,
            failed,
        } => {
            let status = if *failed > 0 {
                Icon::Warning
            } else {
                Icon::Success
            };
            let mut line = format!("{} Synced {}", icon(status), completed);
            if *skipped > 0 {
                line.push_str(&format!(", {skipped} skipped"));
            }
            if *failed > 0 {
                line.push_str(&format!(", {failed} failed"));
            }
            line.push('\n');
            line
        }
    }
}

pub fn render_sync_summary(
    report: &SyncReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.skipped.is_empty() {
        ResultSummary::success("Sync Complete")
    } else {
        ResultSummary::partial("Sync Complete (with skips)")
    };

    let mirrored = report.completed.len();
    summary.add_stat(plural(mirrored, "directory mirrored", "directories mirrored"), mirrored);
    summary.add_stat(
        plural(report.files_linked, "file hard-linked", "files hard-linked"),
        report.files_linked,
    );
    if report.files_copied > 0 {
        summary.add_stat(
            plural(report.files_copied, "file copied", "files copied"),
            report.files_copied,
        );
    }

    for reason in [
        SkipReason::SourceMissing,
        SkipReason::SourceIsFile,
        SkipReason::LockHeldElsewhere,
    ] {
        let count = report.skipped_for(reason);
        if count > 0 {
            summary.add_warning(format!("{count} skipped: {}", reason.describe()));
        }
    }

    if report.skipped_for(SkipReason::SourceMissing) > 0 {
        summary.with_next_step("build the skipped packages, then run depsync again");
    }

    summary.render(supports_color, supports_unicode)
}
