use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use depsync::domain::ports::SyncEvent;
use depsync::domain::value_objects::SelectionMode;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;

pub fn render_watch_header(
    project: &Path,
    mode: SelectionMode,
    debounce: Duration,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "depsync watch");
    header.add("Project", project.display().to_string());
    header.add("Mode", mode.as_str());
    header.add("Debounce", format!("{}ms", debounce.as_millis()));
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &SyncEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "[{}] {}",
        timestamp,
        super::sync::render_event(event, supports_color, supports_unicode)
    )
}

/// Wall-clock `HH:MM:SS` (UTC).
pub fn clock_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| format_clock(d.as_secs()))
        .unwrap_or_else(|_| "00:00:00".to_string())
}

fn format_clock(epoch_secs: u64) -> String {
    let secs = epoch_secs % 86_400;
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
