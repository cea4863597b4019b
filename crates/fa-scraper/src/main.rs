//! FilmAffinity exporter CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use fa_scraper::{ExportStats, FaScraper, HttpFetcher, ScrapeOptions};
use shared::{Category, Config, ExportPaths, Language, ListId, UserId};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FilmAffinity user id
    user_id: UserId,

    /// Export this list instead of the ratings history
    #[arg(long, value_name = "LIST_ID", conflicts_with = "all_lists")]
    list: Option<ListId>,

    /// Export every list of the user, one file per list
    #[arg(long, conflicts_with = "csv")]
    all_lists: bool,

    /// Output file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Site language (en or es)
    #[arg(long)]
    lang: Option<Language>,

    /// Skip titles of this category (tvs, tvms, tv, s); repeatable
    #[arg(long, value_name = "CATEGORY")]
    ignore: Vec<Category>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "fa-scraper".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!(config_file = %args.config.display(), "FilmAffinity exporter starting");

    let language = args.lang.unwrap_or(config.scraper.language);
    let exclusions = config
        .scraper
        .ignore
        .iter()
        .chain(&args.ignore)
        .copied()
        .collect();

    let paths = ExportPaths::new(config.output_dir());
    paths
        .create_dirs()
        .with_context(|| format!("Failed to create output directory {}", paths.root().display()))?;

    let fetcher = HttpFetcher::new(
        &config.scraper.user_agent,
        Duration::from_secs(config.scraper.timeout_secs),
    )
    .context("Failed to create HTTP client")?;

    let scraper = FaScraper::new(
        fetcher,
        ScrapeOptions {
            base_url: config.scraper.base_url.clone(),
            language,
            exclusions,
            ratings_order: config.scraper.ratings_order,
            max_pages: config.scraper.max_pages,
        },
    );

    let user_id = &args.user_id;
    let stats = if args.all_lists {
        scraper
            .export_all_lists(user_id, &paths)
            .with_context(|| format!("Failed to export lists of user {}", user_id))?
    } else if let Some(list_id) = &args.list {
        let path = args
            .csv
            .clone()
            .unwrap_or_else(|| paths.list_file(user_id, list_id, language));
        scraper
            .export_list(user_id, list_id, &path)
            .with_context(|| format!("Failed to export list {} of user {}", list_id, user_id))?
    } else {
        let path = args
            .csv
            .clone()
            .unwrap_or_else(|| paths.ratings_file(user_id, language));
        scraper
            .export_ratings(user_id, &path)
            .with_context(|| format!("Failed to export ratings of user {}", user_id))?
    };

    report(&stats);

    Ok(())
}

fn report(stats: &ExportStats) {
    info!("=== Export Complete ===");
    info!("Pages read: {}", stats.pages_read);
    info!("Records written: {}", stats.records_written);
    info!("Entries skipped: {}", stats.skipped);
    if stats.lists_exported > 0 {
        info!("Lists exported: {}", stats.lists_exported);
    }
    for file in &stats.files {
        info!("Wrote {}", file.display());
    }
}
