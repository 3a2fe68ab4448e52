//! The `prism recommend` command: recommend against a saved classification.
//!
//! The classification JSON is the output of an external classifier run:
//! a prediction list plus the image's embedding vector. The top prediction's
//! class name (text before the first comma, lowercased) selects the corpus
//! label directly, without a semantic matcher round-trip.

use std::path::PathBuf;

use clap::Args;
use prism_core::{Classification, Config, EngineError, RecommendationEngine, Session};

/// Arguments for the `recommend` command.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// JSON file holding the classification (predictions + embedding)
    #[arg(required = true)]
    pub classification: PathBuf,

    /// Output scored candidates as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the recommend command.
pub async fn execute(args: RecommendArgs, config: &Config) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(&args.classification).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read classification file {}: {e}",
            args.classification.display()
        )
    })?;
    let classification: Classification = serde_json::from_str(&data)?;

    let spinner = super::new_spinner("Loading corpus...");
    let engine = RecommendationEngine::from_config(config)?;
    spinner.finish_and_clear();

    let mut session = Session::new();
    let candidates = match engine.recommend_for_classification(&mut session, &classification) {
        Ok(candidates) => candidates,
        Err(EngineError::NoMatch(reason)) => {
            eprintln!("No results: {reason}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        if let Some(top) = classification.top_class() {
            println!("Recommendations for '{top}':");
        }
        super::print_candidates(&candidates);
    }

    Ok(())
}
