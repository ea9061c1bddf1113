//! cachetree - a hierarchical filesystem-backed cache for CSV and JSON artifacts
//!
//! cachetree provides:
//! - Directory-backed cache nodes with nested subcaches
//! - Append-or-replace CSV artifact storage
//! - Whole-document JSON artifact storage
//! - Non-fatal lookups for files and subcaches

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod connections;
mod core;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli)
}
