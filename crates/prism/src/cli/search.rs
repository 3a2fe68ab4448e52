//! The `prism search` command for keyword queries against the corpus.

use clap::Args;
use prism_core::{Config, EngineError, RecommendationEngine, Session};

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword to search for (matched semantically against corpus labels)
    #[arg(required = true)]
    pub keyword: String,

    /// Return the wider result set instead of the primary display size
    #[arg(long)]
    pub wide: bool,

    /// Output the response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the search command.
pub async fn execute(args: SearchArgs, config: &Config) -> anyhow::Result<()> {
    let spinner = super::new_spinner("Loading corpus...");
    let engine = RecommendationEngine::from_config(config)?;
    let session = Session::new();

    spinner.set_message(format!("Searching for '{}'...", args.keyword));
    let result = if args.wide {
        engine.search_wide(&session, &args.keyword).await
    } else {
        engine.search(&session, &args.keyword).await
    };
    spinner.finish_and_clear();

    let response = match result {
        Ok(response) => response,
        Err(EngineError::NoMatch(reason)) => {
            eprintln!("No results: {reason}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "Matched label '{}' (similarity {:.3})",
            response.matched_label, response.similarity
        );
        for (i, path) in response.results.iter().enumerate() {
            println!("{:>3}. {}", i + 1, path);
        }
    }

    Ok(())
}
