//! storefind CLI entry point.
//!
//! Binary name: `storefind`
//!
//! Parses CLI arguments, initializes the embedding provider and vector
//! store, then dispatches to the ingest or search handler.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,storefind=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init().await?;

    match cli.command {
        Commands::Ingest { file } => {
            cli::ingest::run_ingest(&state, file, cli.json, cli.quiet).await?;
        }
        Commands::Search { query, top_k } => {
            cli::search::run_search(&state, &query, top_k, cli.json, cli.quiet).await?;
        }
    }

    Ok(())
}
