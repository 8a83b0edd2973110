//! Configuration loading from TOML for the extraction CLI.
//!
//! The engine itself needs no configuration — both adapters are pure
//! functions — so everything here is front-end behaviour: output
//! formatting and an optional fixed reference date for reproducible
//! runs (the bulk dialect's month-name format carries no year).

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level CLI configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Pretty-print the emitted JSON (compact when false).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: default_pretty() }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExtractorConfig {
    /// Fixed reference timestamp (quoted, e.g. "2025-11-17T06:00:00").
    /// When unset, the local clock supplies the bulk parser's default
    /// year and unreadable-date placeholder.
    #[serde(default)]
    pub reference_date: Option<NaiveDateTime>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load from a TOML file, treating a missing file as defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
