//! Configuration loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::SelectionMode;
use crate::error::{DepsyncError, DepsyncResult};

use super::types::{Config, Verbosity};

/// Project config file name
pub const CONFIG_FILE: &str = "depsync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DepsyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DepsyncError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config if present, defaults otherwise; env overrides on top.
///
/// A config file that exists but does not parse is an error.
pub fn load_for_project(project_dir: &Path) -> DepsyncResult<(Config, Vec<ConfigWarning>)> {
    let path = project_dir.join(CONFIG_FILE);
    let (config, warnings) = match load_with_warnings(&path) {
        Ok(loaded) => loaded,
        Err(DepsyncError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            (Config::default(), Vec::new())
        }
        Err(e) => return Err(e),
    };

    Ok((config.with_env_overrides(), warnings))
}

/// Apply environment variable overrides (DEPSYNC_* prefix)
///
/// Unparseable values are ignored with a warning.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // DEPSYNC_MODE
    if let Some(value) = lookup("DEPSYNC_MODE") {
        match value.parse::<SelectionMode>() {
            Ok(mode) => config.sync.mode = mode,
            Err(e) => tracing::warn!(variable = "DEPSYNC_MODE", error = %e, "ignoring"),
        }
    }

    // DEPSYNC_DEBOUNCE_MS
    if let Some(value) = lookup("DEPSYNC_DEBOUNCE_MS") {
        match value.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => config.watch.debounce_ms = ms,
            _ => tracing::warn!(variable = "DEPSYNC_DEBOUNCE_MS", value = %value, "ignoring"),
        }
    }

    // DEPSYNC_CONCURRENCY
    if let Some(value) = lookup("DEPSYNC_CONCURRENCY") {
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => config.sync.concurrency = n,
            _ => tracing::warn!(variable = "DEPSYNC_CONCURRENCY", value = %value, "ignoring"),
        }
    }

    // DEPSYNC_VERBOSITY
    if let Some(value) = lookup("DEPSYNC_VERBOSITY") {
        match value.parse::<Verbosity>() {
            Ok(verbosity) => config.output.verbosity = verbosity,
            Err(e) => tracing::warn!(variable = "DEPSYNC_VERBOSITY", error = %e, "ignoring"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "sync",
        "mode",
        "concurrency",
        "watch",
        "debounce_ms",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
