//! Error types for scraping and export.

use shared::Language;
use thiserror::Error;

/// Errors raised while fetching, extracting or exporting.
///
/// A fetch that completes with a non-success status is not an error: the
/// pager treats it as the end of the results.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The request could not be performed at all
    #[error("transport failure fetching {url}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Date header text did not match the locale grammar
    #[error("cannot parse {language} date from {text:?}")]
    DateParse { text: String, language: Language },

    /// An expected element was absent or malformed
    #[error("unexpected markup for {title:?}: {detail}")]
    Markup { title: String, detail: String },

    /// Extraction of a whole page failed
    #[error("failed to extract page {url}")]
    Page {
        url: String,
        #[source]
        source: Box<ScrapeError>,
    },

    /// Writing the export failed
    #[error("failed to write export: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub(crate) fn markup(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ScrapeError::Markup {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
