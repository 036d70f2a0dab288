//! Command handlers for the depsync binary.

pub mod sync;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use depsync::config::{Config, Verbosity};

use crate::cli::Cli;
use crate::ui::context::UiContext;

/// Resolved inputs shared by one-shot and watch mode.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub project: PathBuf,
    pub config: Config,
    pub ui: UiContext,
}

impl Invocation {
    /// Resolve the project directory, load `depsync.toml` and apply CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project = cli.directory.canonicalize().with_context(|| {
            format!("cannot open project directory {}", cli.directory.display())
        })?;

        let (config, warnings) = Config::load_for_project(&project)?;
        let config = apply_cli_overrides(config, cli);
        let ui = UiContext::new(cli.json, cli.color, &config);

        if !warnings.is_empty() && !ui.json {
            crate::ui::output::print_config_warnings(&warnings, ui.color, ui.unicode);
        }

        Ok(Self {
            project,
            config,
            ui,
        })
    }
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(mode) = cli.mode {
        config.sync.mode = mode;
    }
    if let Some(concurrency) = cli.concurrency {
        config.sync.concurrency = concurrency as usize;
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.watch.debounce_ms = debounce_ms;
    }
    if let Some(verbosity) = Verbosity::from_flag_count(cli.verbose) {
        config.output.verbosity = verbosity;
    }
    config
}
