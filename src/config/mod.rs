//! Configuration module for depsync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DEPSYNC_*)
//! 3. Project config (`depsync.toml` next to package.json)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{with_env_overrides, ConfigWarning, CONFIG_FILE};
pub use types::{ColorMode, Config, OutputConfig, SyncConfig, Verbosity, WatchConfig};
