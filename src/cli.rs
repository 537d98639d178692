//! CLI mode implementation
//!
//! Provides the command-line interface for direct searches and for starting
//! the HTTP server

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// destinos CLI
#[derive(Parser)]
#[command(name = "destinos")]
#[command(about = "Colombia tourism destination search assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the tourism dataset CSV
    #[arg(long, global = true, env = "DESTINOS_DATA", default_value = "data/tourism_data.csv")]
    pub data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search destinations through the cascade
    Search(SearchArgs),
    /// Show a random selection of featured destinations
    Featured(FeaturedArgs),
    /// Run the HTTP API server
    Serve(ServeArgs),
}

/// Search command arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms (case-insensitive)
    #[arg(short = 'q', long)]
    pub query: String,

    /// Maximum number of results
    #[arg(short = 'l', long, default_value_t = 8)]
    pub limit: usize,
}

/// Featured command arguments
#[derive(Parser, Clone, Debug)]
pub struct FeaturedArgs {
    /// How many destinations to show
    #[arg(short = 'n', long, default_value_t = 6)]
    pub count: usize,
}

/// Serve command arguments
#[derive(Parser, Clone, Debug)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 5000, env = "DESTINOS_PORT")]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from(["destinos", "search", "-q", "cartagena", "-l", "4"]);
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "cartagena");
                assert_eq!(args.limit, 4);
            }
            _ => panic!("expected search subcommand"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["destinos", "featured"]);
        assert_eq!(cli.data, PathBuf::from("data/tourism_data.csv"));
        match cli.command {
            Some(Commands::Featured(args)) => assert_eq!(args.count, 6),
            _ => panic!("expected featured subcommand"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["destinos", "serve"]);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.host, "0.0.0.0");
                assert_eq!(args.port, 5000);
            }
            _ => panic!("expected serve subcommand"),
        }
    }
}
