//! Pagination driver.
//!
//! Turns a URL template into a lazy sequence of parsed pages. The site
//! answers with a non-success status once the pages run out, so the first
//! unsuccessful fetch ends the sequence.

use crate::error::Result;
use crate::fetch::Fetcher;
use scraper::Html;
use tracing::{debug, info, warn};

/// One fetched and parsed page
#[derive(Debug)]
pub struct Page {
    pub url: String,
    pub document: Html,
}

impl Page {
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(body),
        }
    }
}

/// URL with a `{page}` slot for the 1-based page number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate(String);

impl PageTemplate {
    pub const SLOT: &'static str = "{page}";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn url(&self, page: u32) -> String {
        self.0.replace(Self::SLOT, &page.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Drives the fetch loop over paginated sections
pub struct Pager<F> {
    fetcher: F,
    max_pages: Option<u32>,
}

impl<F: Fetcher> Pager<F> {
    /// Create a new pager
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_pages: None,
        }
    }

    /// Stop after `max_pages` pages even if the site has more
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Lazily fetch pages 1, 2, ... of `template`.
    ///
    /// Each call starts again from page 1. Nothing is fetched until the
    /// sequence is pulled.
    pub fn pages(&self, template: PageTemplate) -> Pages<'_, F> {
        Pages {
            fetcher: &self.fetcher,
            template,
            next_page: 1,
            max_pages: self.max_pages,
            finished: false,
        }
    }
}

/// Iterator returned by [`Pager::pages`]
pub struct Pages<'p, F> {
    fetcher: &'p F,
    template: PageTemplate,
    next_page: u32,
    max_pages: Option<u32>,
    finished: bool,
}

impl<F> Pages<'_, F> {
    /// Number of pages emitted so far
    pub fn pages_read(&self) -> u32 {
        self.next_page - 1
    }
}

impl<F: Fetcher> Iterator for Pages<'_, F> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(max) = self.max_pages {
            if self.pages_read() >= max {
                warn!(max_pages = max, "Page limit reached, stopping early");
                self.finished = true;
                return None;
            }
        }

        let url = self.template.url(self.next_page);
        debug!(page = self.next_page, url = %url, "Fetching page");

        let response = match self.fetcher.fetch(&url) {
            Ok(response) => response,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        if !response.success {
            info!(pages = self.pages_read(), "Download complete");
            self.finished = true;
            return None;
        }

        info!(page = self.next_page, "Page downloaded");
        self.next_page += 1;

        Some(Ok(Page::parse(url, &response.body)))
    }
}
