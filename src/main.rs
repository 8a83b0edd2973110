//! surebet-extract — stdin→stdout extraction front-end.
//!
//! Reads one raw input block (OCR-tool JSON or pasted spreadsheet text)
//! from stdin, normalizes it into surebet candidates, and prints them as
//! a JSON array. Exits non-zero when nothing could be extracted — the
//! adapters never fail, so "zero candidates" is the caller-facing error.

use anyhow::{Context, Result};
use chrono::Local;
use std::io::Read;
use tracing::{info, warn};

use surebet_engine::config::AppConfig;
use surebet_engine::extract;
use surebet_engine::types::SurebetError;

fn main() -> Result<()> {
    let cfg = AppConfig::load_or_default("config.toml")?;

    init_logging();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;

    let now = cfg
        .extractor
        .reference_date
        .unwrap_or_else(|| Local::now().naive_local());

    let candidates = extract::extract(&input, now);

    if candidates.is_empty() {
        warn!(input_bytes = input.len(), "nothing extracted");
        return Err(SurebetError::NoCandidates.into());
    }

    let incomplete = candidates.iter().filter(|c| c.team_a.is_none() || c.team_b.is_none()).count();
    info!(
        candidates = candidates.len(),
        incomplete,
        "extraction complete"
    );

    let json = if cfg.output.pretty {
        serde_json::to_string_pretty(&candidates)?
    } else {
        serde_json::to_string(&candidates)?
    };
    println!("{json}");

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("surebet_engine=info"));

    let json_logging = std::env::var("SUREBET_LOG_JSON").is_ok();

    // logs go to stderr: stdout carries the extracted JSON
    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}
