//! `shopgraph` binary: loads configuration, installs logging and runs the
//! command loop over stdin/stdout.

mod cli;
mod render;
mod repl;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use shopgraph_core::config::AppConfig;
use shopgraph_sdk::Session;
use tracing::info;

use crate::cli::Cli;
use crate::render::OutputFormat;
use crate::repl::{run_batch, Repl};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    shopgraph_core::init_tracing(level, config.logging.json);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut session = Session::new(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();

    if cli.batch {
        run_batch(&mut session, stdin.lock(), stdout.lock(), format)?;
    } else {
        Repl::new(stdin.lock(), stdout.lock(), format).run(&mut session)?;
    }

    info!(
        users = session.users().len(),
        products = session.catalog().len(),
        edges = session.graph().edge_count(),
        "session closed"
    );
    Ok(())
}
