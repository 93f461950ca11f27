//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Interactive shop backend: users, catalog, interactions and recommendations.
#[derive(Parser, Debug)]
#[command(name = "shopgraph", version, about)]
pub struct Cli {
    /// Configuration file layered over the defaults.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print outcomes as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Read one JSON command per line from stdin, without prompts.
    #[arg(long)]
    pub batch: bool,

    /// Log filter used when RUST_LOG is unset (overrides logging.level).
    #[arg(long)]
    pub log_level: Option<String>,
}
