//! Command implementations for the Prism CLI.

pub mod catalog;
pub mod config;
pub mod rate;
pub mod recommend;
pub mod search;
pub mod session;
pub mod status;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use prism_core::ScoredCandidate;

/// Create a spinner for indeterminate work (engine setup, remote calls).
///
/// Drawn to stderr so stdout stays clean for data output.
pub(crate) fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print scored candidates as an aligned table to stdout.
pub(crate) fn print_candidates(candidates: &[ScoredCandidate]) {
    for (i, c) in candidates.iter().enumerate() {
        println!("{:>3}. {:.3}  {:<24} {}", i + 1, c.score, c.label, c.path);
    }
}
