//! Tracing setup for the prism binary.
//!
//! All log output goes to stderr: stdout carries search results, scored
//! candidate tables, and `--json` payloads, and must stay pipeable. The
//! effective level is resolved in order: `RUST_LOG` when set, then the
//! `--verbose` flag, then the `[logging]` section of the config file.

use prism_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `verbose` and `json_logs` are the CLI flags; either one overrides the
/// corresponding config setting upward (a config asking for debug logs is
/// never silenced by the absence of `--verbose`).
pub fn init(settings: &LoggingConfig, verbose: bool, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose || settings.verbose() {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(&settings.level)
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs || settings.json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
