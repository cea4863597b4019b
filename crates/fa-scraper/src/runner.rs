//! Export orchestrator.
//!
//! Wires the pager, extractors and CSV writer together for the three kinds
//! of export: ratings history, a single list, and every list of a user.

use crate::classify::Exclusions;
use crate::csv_export::export_to_file;
use crate::error::Result;
use crate::extract::{list_records, ratings};
use crate::fetch::Fetcher;
use crate::lists::user_lists;
use crate::pager::Pager;
use crate::urls::SiteUrls;
use shared::{ExportPaths, Language, ListId, UserId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Statistics for an export run
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    pub pages_read: u32,
    pub records_written: usize,
    pub skipped: usize,
    pub lists_exported: usize,
    pub files: Vec<PathBuf>,
}

impl ExportStats {
    fn absorb(&mut self, other: ExportStats) {
        self.pages_read += other.pages_read;
        self.records_written += other.records_written;
        self.skipped += other.skipped;
        self.lists_exported += other.lists_exported;
        self.files.extend(other.files);
    }
}

/// Settings for one run
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub base_url: String,
    pub language: Language,
    pub exclusions: Exclusions,
    pub ratings_order: u32,
    pub max_pages: Option<u32>,
}

/// FilmAffinity exporter
pub struct FaScraper<F> {
    pager: Pager<F>,
    urls: SiteUrls,
    language: Language,
    exclusions: Exclusions,
    ratings_order: u32,
}

impl<F: Fetcher> FaScraper<F> {
    /// Create a new exporter
    pub fn new(fetcher: F, options: ScrapeOptions) -> Self {
        Self {
            pager: Pager::new(fetcher).with_max_pages(options.max_pages),
            urls: SiteUrls::new(&options.base_url, options.language),
            language: options.language,
            exclusions: options.exclusions,
            ratings_order: options.ratings_order,
        }
    }

    /// Export a user's ratings history to `path`
    pub fn export_ratings(&self, user_id: &UserId, path: &Path) -> Result<ExportStats> {
        info!(user_id = %user_id, language = %self.language, "Exporting ratings");

        let mut records = ratings(
            &self.pager,
            self.urls.ratings(user_id, self.ratings_order),
            self.language,
            &self.exclusions,
        );
        let written = export_to_file(path, records.by_ref())?;

        let stats = ExportStats {
            pages_read: records.pages_read(),
            records_written: written,
            skipped: records.skipped(),
            lists_exported: 0,
            files: vec![path.to_path_buf()],
        };
        info!(
            path = %path.display(),
            records = stats.records_written,
            skipped = stats.skipped,
            "Ratings exported"
        );
        Ok(stats)
    }

    /// Export one list to `path`
    pub fn export_list(&self, user_id: &UserId, list_id: &ListId, path: &Path) -> Result<ExportStats> {
        info!(user_id = %user_id, list_id = %list_id, "Exporting list");

        let mut records = list_records(
            &self.pager,
            self.urls.list(user_id, list_id),
            self.language,
            &self.exclusions,
        );
        let written = export_to_file(path, records.by_ref())?;

        let stats = ExportStats {
            pages_read: records.pages_read(),
            records_written: written,
            skipped: records.skipped(),
            lists_exported: 1,
            files: vec![path.to_path_buf()],
        };
        info!(
            path = %path.display(),
            records = stats.records_written,
            skipped = stats.skipped,
            "List exported"
        );
        Ok(stats)
    }

    /// Export every list of a user, one file per list named after the list
    pub fn export_all_lists(&self, user_id: &UserId, paths: &ExportPaths) -> Result<ExportStats> {
        info!(user_id = %user_id, "Exporting all lists");

        let mut stats = ExportStats::default();
        let mut used = HashSet::new();
        let mut lists = user_lists(&self.pager, self.urls.lists(user_id));
        for list in lists.by_ref() {
            let list = list?;
            let mut path = paths.named_list_file(user_id, &list.name, self.language);
            if !used.insert(path.clone()) {
                let unique = format!("{} {}", list.name, list.id);
                warn!(
                    list_id = %list.id,
                    name = %list.name,
                    "Another list has the same file name, adding the list id"
                );
                path = paths.named_list_file(user_id, &unique, self.language);
                used.insert(path.clone());
            }
            stats.absorb(self.export_list(user_id, &list.id, &path)?);
        }
        stats.pages_read += lists.pages_read();

        info!(
            lists = stats.lists_exported,
            pages = stats.pages_read,
            "All lists exported"
        );
        Ok(stats)
    }
}
