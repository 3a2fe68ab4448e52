//! The `prism session` command — interactive search-and-rate loop.
//!
//! Keeps one [`Session`] alive across queries so ratings fold into the
//! preference model and tighten subsequent result sets. Ratings are also
//! persisted to the rating log.

use std::time::{SystemTime, UNIX_EPOCH};

use clap::Args;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use prism_core::{
    Config, EngineError, RatingLog, RatingRecord, RecommendationEngine, ScoredCandidate, Session,
};

/// Arguments for the `session` command.
#[derive(Args, Debug)]
pub struct SessionArgs {}

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
///
/// Use this to wrap `interact_text()` / `interact()` calls that lack an `_opt`
/// variant, so interrupts exit the current flow cleanly instead of panicking.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Main menu options presented to the user.
const MENU_ITEMS: &[&str] = &[
    "Search",
    "Rate a result",
    "Session status",
    "Reset preferences",
    "Exit",
];

/// Execute the session command.
pub async fn execute(_args: SessionArgs, config: &Config) -> anyhow::Result<()> {
    let spinner = super::new_spinner("Loading corpus...");
    let engine = RecommendationEngine::from_config(config)?;
    spinner.finish_and_clear();

    let mut session = Session::new();
    let log = RatingLog::new(config.ratings_file());
    let mut last_results: Vec<ScoredCandidate> = Vec::new();

    let theme = ColorfulTheme::default();

    eprintln!(
        "Prism session — {} images, {} labels",
        engine.catalog().image_count(),
        engine.catalog().label_count()
    );

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => {
                if let Some(results) =
                    run_search(&engine, &session, config.selection.top_k, &theme).await?
                {
                    last_results = results;
                }
            }
            Some(1) => rate_result(&engine, &mut session, &log, &last_results, &theme)?,
            Some(2) => show_status(&session),
            Some(3) => {
                session.reset();
                last_results.clear();
                eprintln!("Preferences cleared.");
            }
            Some(4) | None => break, // Exit or Ctrl+C / Esc
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// Prompt for a keyword and run one search. Returns the scored candidates,
/// or `None` when the prompt was interrupted or the search found nothing.
async fn run_search(
    engine: &RecommendationEngine,
    session: &Session,
    limit: usize,
    theme: &ColorfulTheme,
) -> anyhow::Result<Option<Vec<ScoredCandidate>>> {
    let Some(keyword) = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Keyword")
            .interact_text(),
    )?
    else {
        return Ok(None);
    };

    let spinner = super::new_spinner("Searching...");
    let result = engine.search_candidates(session, &keyword, limit).await;
    spinner.finish_and_clear();

    match result {
        Ok((matched, candidates)) => {
            eprintln!(
                "Matched label '{}' (similarity {:.3}, threshold {:.2})",
                matched.label,
                matched.similarity,
                session.preference().similarity_threshold()
            );
            super::print_candidates(&candidates);
            Ok(Some(candidates))
        }
        Err(EngineError::InvalidInput(reason)) | Err(EngineError::NoMatch(reason)) => {
            eprintln!("No results: {reason}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Pick one of the last search results and fold a 1-10 rating into the
/// session's preference model, persisting the rating to the log.
fn rate_result(
    engine: &RecommendationEngine,
    session: &mut Session,
    log: &RatingLog,
    last_results: &[ScoredCandidate],
    theme: &ColorfulTheme,
) -> anyhow::Result<()> {
    if last_results.is_empty() {
        eprintln!("Nothing to rate yet — run a search first.");
        return Ok(());
    }

    let items: Vec<String> = last_results
        .iter()
        .map(|c| format!("{:.3}  {}  ({})", c.score, c.filename, c.label))
        .collect();
    let Some(index) = Select::with_theme(theme)
        .with_prompt("Which result?")
        .items(&items)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };
    let candidate = &last_results[index];

    let Some(rating) = handle_interrupt(
        Input::<u8>::with_theme(theme)
            .with_prompt("Rating (1-10)")
            .validate_with(|input: &u8| {
                if (1..=10).contains(input) {
                    Ok(())
                } else {
                    Err("rating must be between 1 and 10")
                }
            })
            .interact_text(),
    )?
    else {
        return Ok(());
    };

    let Some(embedding) = engine.embedding_for(&candidate.filename) else {
        eprintln!("No stored embedding for {} — cannot rate.", candidate.filename);
        return Ok(());
    };
    let threshold = session.rate(embedding, rating)?;

    let record = RatingRecord {
        image: Some(candidate.filename.clone()),
        relevant: None,
        user_rating: rating,
        timestamp: epoch_millis(),
    };
    if let Err(e) = log.append(&[record]) {
        tracing::warn!("Failed to persist rating: {e}");
    }

    eprintln!(
        "Rated {} at {}/10 — similarity threshold is now {:.2}",
        candidate.filename, rating, threshold
    );
    Ok(())
}

fn show_status(session: &Session) {
    eprintln!(
        "Ratings this session: {}",
        session.preference().num_ratings()
    );
    eprintln!(
        "Similarity threshold: {:.2}",
        session.preference().similarity_threshold()
    );
    eprintln!(
        "Current image set:    {}",
        if session.current_image().is_some() {
            "yes"
        } else {
            "no"
        }
    );
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
