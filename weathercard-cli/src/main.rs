//! Binary crate for the `weathercard` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Printing rendered weather cards

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

/// Log filter for a `-v` count, unless `RUST_LOG` is set.
fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cmd.verbose))
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}
