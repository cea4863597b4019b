//! FilmAffinity exporter library.
//!
//! Walks a user's paginated ratings history and lists on FilmAffinity and
//! turns them into Letterboxd-importable CSV files. Pages are fetched lazily,
//! one at a time, as records are consumed.

pub mod classify;
pub mod csv_export;
pub mod date;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod layout;
pub mod lists;
pub mod locale;
pub mod pager;
pub mod runner;
pub mod urls;

pub use classify::{classify, is_excluded, Exclusions, TypeLabel};
pub use csv_export::{export_to_file, write_csv, ExportRecord};
pub use date::{parse_date, parse_iso_date};
pub use error::{Result, ScrapeError};
pub use extract::{extract_list, extract_ratings, list_records, ratings, PageScan, Records};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use lists::{extract_lists, sanitize_list_name, user_lists};
pub use pager::{Page, PageTemplate, Pager, Pages};
pub use runner::{ExportStats, FaScraper, ScrapeOptions};
pub use urls::SiteUrls;
