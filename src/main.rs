//! depsync CLI - mirrors injected workspace dependencies as hard-linked copies
//!
//! Usage: depsync [--watch] [--directory <DIR>]

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use depsync::config::Verbosity;

use cli::Cli;
use commands::Invocation;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(&cli) {
        tracing::debug!(error = ?err, "depsync failed");
        ui::error::print_error(&err, cli.json);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let inv = Invocation::from_cli(cli)?;

    if cli.watch {
        commands::watch::cmd_watch(&inv)
    } else {
        commands::sync::cmd_sync(&inv, cli.dry_run)
    }
}

/// Initialize logging on stderr.
///
/// `RUST_LOG` wins; otherwise `-v` count, then `DEPSYNC_VERBOSITY`, pick the level.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let verbosity = Verbosity::from_flag_count(cli.verbose)
        .or_else(|| {
            std::env::var("DEPSYNC_VERBOSITY")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .unwrap_or_default();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depsync={}", verbosity.filter_directive())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
