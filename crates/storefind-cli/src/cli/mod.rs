//! CLI command definitions and dispatch for the `storefind` binary.
//!
//! Uses clap derive macros for argument parsing. Two commands mirror the
//! two pipelines: `ingest` and `search`.

pub mod ingest;
pub mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storefind_core::store::DEFAULT_TOP_K;

/// Semantic product search over an embedded vector store.
#[derive(Parser)]
#[command(name = "storefind", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Embed the product catalog and (re)build the vector table.
    ///
    /// Destructive: the existing table is dropped and recreated.
    Ingest {
        /// Catalog CSV to ingest (defaults to the configured path).
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Rank stored products against a natural-language query.
    Search {
        /// The search query text.
        query: String,

        /// Number of results to return.
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_requires_query() {
        let result = Cli::try_parse_from(["storefind", "search"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_defaults_to_top_5() {
        let cli = Cli::try_parse_from(["storefind", "search", "warm hat"]).unwrap();
        match cli.command {
            Commands::Search { top_k, query } => {
                assert_eq!(top_k, 5);
                assert_eq!(query, "warm hat");
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_quiet_is_global() {
        let cli = Cli::try_parse_from(["storefind", "search", "warm hat", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.json);

        let cli = Cli::try_parse_from(["storefind", "--quiet", "ingest"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_ingest_accepts_file_override() {
        let cli = Cli::try_parse_from(["storefind", "ingest", "--file", "custom.csv"]).unwrap();
        match cli.command {
            Commands::Ingest { file } => {
                assert_eq!(file, Some(PathBuf::from("custom.csv")));
            }
            _ => panic!("expected ingest command"),
        }
    }
}
