//! Link severance binary.
//!
//! Reads a network and a stream of adversary positions from stdin and writes
//! one severed link per turn to stdout.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SEVER_STRATEGY`: "weighted" or "nearest" (default: weighted)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! Logs go to stderr so stdout stays a clean protocol channel.
//!
//! ## Usage
//!
//! ```bash
//! printf '4 3 1\n0 1\n1 2\n2 3\n3\n0\n' | cargo run --bin sever
//! ```

use std::io;

use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use link_severance::config::{LogFormat, RunConfig};
use link_severance::{run_session, SeverExit};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sever=info,link_severance=info".into());

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_current_span(true)
                        .flatten_event(true)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

fn main() -> SeverExit {
    let (config, warnings) = RunConfig::from_env();
    init_tracing(config.log_format);
    for warning in &warnings {
        warning.log();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match run_session(stdin.lock(), &mut stdout, config.strategy) {
        Ok(outcome) => outcome.exit_status(),
        Err(e) => {
            error!(error = %e, "session aborted");
            eprintln!("error: {e}");
            e.exit_status()
        }
    }
}
