//! Configuration management for the FilmAffinity exporter.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use crate::models::{Category, Language};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scraper settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// FilmAffinity root URL, without language segment
    pub base_url: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Site language used when none is given on the command line
    pub language: Language,

    /// Categories excluded unless overridden on the command line
    pub ignore: Vec<Category>,

    /// Value of the `orderby` parameter on the ratings pages
    pub ratings_order: u32,

    /// Stop paging after this many pages (None = until the site runs out)
    pub max_pages: Option<u32>,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory CSV files are written to
    pub output_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.filmaffinity.com".to_string(),
            user_agent: concat!("fa-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            language: Language::En,
            ignore: Vec::new(),
            ratings_order: 4,
            max_pages: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Get the directory CSV files are written to
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.export.output_dir)
    }

    /// Get the log directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.logging.log_dir)
    }

    /// Parse the configured default log level, falling back to INFO
    pub fn log_level(&self) -> tracing::Level {
        self.logging
            .default_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}
