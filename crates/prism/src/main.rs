//! Prism CLI - Image recommendation engine with adaptive preference learning.
//!
//! Prism matches a free-text keyword (or an image classification) against a
//! fixed image corpus and returns the best-scored images, refining future
//! results from user ratings.
//!
//! # Usage
//!
//! ```bash
//! # Search the corpus by keyword
//! prism search "golden retriever"
//!
//! # Recommend against a classification produced elsewhere
//! prism recommend classification.json
//!
//! # Interactive session with rating feedback
//! prism session
//!
//! # View configuration
//! prism config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Prism - Image recommendation engine with adaptive preference learning.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the corpus by keyword
    Search(cli::search::SearchArgs),

    /// Recommend images for a saved classification result
    Recommend(cli::recommend::RecommendArgs),

    /// Interactive search-and-rate session
    Session(cli::session::SessionArgs),

    /// Append ratings from a JSON file to the rating log
    Rate(cli::rate::RateArgs),

    /// Show corpus catalog statistics
    Catalog(cli::catalog::CatalogArgs),

    /// Check embedder and corpus availability
    Status(cli::status::StatusArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match prism_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `prism config path`."
            );
            prism_core::Config::default()
        }
    };
    logging::init(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("Prism v{}", prism_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Search(args) => cli::search::execute(args, &config).await,
        Commands::Recommend(args) => cli::recommend::execute(args, &config).await,
        Commands::Session(args) => cli::session::execute(args, &config).await,
        Commands::Rate(args) => cli::rate::execute(args, &config).await,
        Commands::Catalog(args) => cli::catalog::execute(args, &config).await,
        Commands::Status(args) => cli::status::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
