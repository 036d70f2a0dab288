use std::path::PathBuf;

use clap::Parser;
use depsync::config::ColorMode;
use depsync::domain::value_objects::SelectionMode;

/// depsync - keep injected workspace dependencies hard-linked to their build output
#[derive(Parser, Debug)]
#[command(name = "depsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keep watching source directories and resync on change
    #[arg(short, long)]
    pub watch: bool,

    /// Project whose dependencies should be synced
    #[arg(short = 'C', long, default_value = ".")]
    pub directory: PathBuf,

    /// Which workspace dependencies are mirrored
    #[arg(long, value_enum)]
    pub mode: Option<SelectionMode>,

    /// Mirrors running at once within a watch pass
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub concurrency: Option<u32>,

    /// Quiet period before a watch pass, in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub debounce_ms: Option<u64>,

    /// Print the sync plan without touching any files
    #[arg(long, conflicts_with = "watch")]
    pub dry_run: bool,

    /// Output format for CI (NDJSON events on stdout)
    #[arg(long)]
    pub json: bool,

    /// Color output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
