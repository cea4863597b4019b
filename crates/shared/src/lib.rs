//! Shared library for the FilmAffinity exporter.
//!
//! This crate provides functionality used by the scraper and its CLI:
//! - Configuration management
//! - Domain models and identifiers
//! - Export file naming
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;
pub use paths::ExportPaths;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
