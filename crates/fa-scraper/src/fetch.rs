//! Document fetching.
//!
//! The pager only needs to know whether a fetch succeeded and what the body
//! was, so the HTTP client sits behind the [`Fetcher`] trait.

use crate::error::{Result, ScrapeError};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Outcome of a fetch that reached the server
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Whether the server reported success (2xx)
    pub success: bool,
    /// Response body decoded as UTF-8
    pub body: String,
}

/// Retrieves one document given a URL.
///
/// `Err` means the request could not be made; a non-success response is
/// returned as `Ok` with `success == false`.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ScrapeError::Transport {
                url: String::new(),
                source: Box::new(e),
            })?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let transport = |e: reqwest::Error| ScrapeError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        // The site always serves UTF-8, whatever the headers claim
        let bytes = response.bytes().map_err(transport)?;

        debug!(url = %url, status = %status, bytes = bytes.len(), "Fetched page");

        Ok(FetchResponse {
            success: status.is_success(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
