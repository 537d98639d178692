//! destinos — Colombia tourism destination search assistant
//!
//! Dual-mode application:
//! - Server mode (default, or `serve`): HTTP API for greet/chat/search
//! - CLI mode: one-shot `search` and `featured` commands against the dataset

mod cli;
mod dataset;
mod error;
mod reply;
mod search;
mod server;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use dataset::{DestinationStore, DestinationView};
use reply::ReplyChain;
use search::SearchCascade;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Log to stderr to keep stdout clean for command output
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<Option<String>> {
    let store = DestinationStore::load(&cli.data)
        .with_context(|| format!("loading dataset from {}", cli.data.display()))?;
    let cascade = SearchCascade::new(store);

    match cli.command {
        Some(Commands::Search(args)) => {
            let outcome = cascade.search(&args.query, args.limit)?;
            Ok(Some(render_results(&outcome.label, &outcome.destinations)))
        }
        Some(Commands::Featured(args)) => {
            let destinations = cascade.featured(args.count);
            Ok(Some(render_results(
                "Destinos destacados de Colombia",
                &destinations,
            )))
        }
        Some(Commands::Serve(args)) => {
            serve(cascade, &args.host, args.port).await?;
            Ok(None)
        }
        None => {
            // Server mode is the default behavior
            let args = cli::ServeArgs::parse_from(["destinos"]);
            serve(cascade, &args.host, args.port).await?;
            Ok(None)
        }
    }
}

async fn serve(cascade: SearchCascade, host: &str, port: u16) -> Result<()> {
    info!(
        "Starting destinos server with {} destinos",
        cascade.destination_count()
    );
    let state = Arc::new(server::AppState::new(cascade, ReplyChain::from_env()));
    server::serve(state, host, port).await
}

/// Render search output as markdown for the terminal
fn render_results(label: &str, destinations: &[DestinationView]) -> String {
    let mut output = format!("## {}\n\n", label);
    for destination in destinations {
        let price = destination
            .price
            .map(|p| format!("aprox ${}", p))
            .unwrap_or_else(|| "precio por consultar".to_string());
        output.push_str(&format!(
            "- **{}** ({}, {}) — {}, clima {}\n",
            destination.name, destination.department, destination.category, price, destination.climate
        ));
        if !destination.description.is_empty() {
            output.push_str(&format!("  {}\n", destination.description));
        }
    }
    output
}

/// Map errors to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid") || err_str.contains("usage") {
        1 // Invalid arguments or usage error
    } else if err_str.contains("load") || err_str.contains("dataset") {
        2 // Dataset error
    } else if err_str.contains("not found") {
        3 // Not found error
    } else {
        5 // Other application errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DestinationRecord;

    #[test]
    fn test_render_results() {
        let record = DestinationRecord {
            name: "Cartagena".to_string(),
            department: "Bolívar".to_string(),
            category: "playa".to_string(),
            estimated_price: Some(850000.0),
            description: "Ciudad amurallada".to_string(),
            activities: String::new(),
            climate: "cálido".to_string(),
            ideal_season: String::new(),
        };
        let output = render_results("Resultados", &[DestinationView::from(&record)]);
        assert!(output.starts_with("## Resultados"));
        assert!(output.contains("**Cartagena** (Bolívar, playa)"));
        assert!(output.contains("aprox $850000"));
        assert!(output.contains("  Ciudad amurallada"));
    }

    #[test]
    fn test_render_results_without_price() {
        let record = DestinationRecord {
            name: "Salento".to_string(),
            department: "Quindío".to_string(),
            category: "ecoturismo".to_string(),
            estimated_price: None,
            description: String::new(),
            activities: String::new(),
            climate: "templado".to_string(),
            ideal_season: String::new(),
        };
        let output = render_results("Resultados", &[DestinationView::from(&record)]);
        assert!(output.contains("precio por consultar"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(get_exit_code(&anyhow::anyhow!("Invalid input: bad")), 1);
        assert_eq!(get_exit_code(&anyhow::anyhow!("Dataset load failed: x")), 2);
        assert_eq!(get_exit_code(&anyhow::anyhow!("something else")), 5);
    }
}
