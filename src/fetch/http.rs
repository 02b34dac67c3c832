//! HTTP implementation of the [`Fetcher`] capability.
//!
//! This module provides [`HttpFetcher`], a reqwest-backed page downloader,
//! and [`HtmlDocument`], which extracts `a[href]` links from a downloaded
//! HTML body with the `scraper` crate. Relative links are resolved against
//! the final response URL, so redirected pages yield correct absolute links.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use super::error::{ExtractError, FetchError};
use super::{Document, Fetcher};

/// Default connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("crawler/", env!("CARGO_PKG_VERSION"));

/// HTTP page fetcher with timeout configuration.
///
/// Designed to be created once, wrapped in `Arc`, and shared across all
/// download pool workers, taking advantage of reqwest connection pooling.
///
/// # Example
///
/// ```no_run
/// use crawler_core::{Fetcher, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new();
/// let document = fetcher.fetch("https://example.com").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Creates a new HTTP fetcher with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 10 seconds
    /// - Total request timeout: 30 seconds
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Creates a new HTTP fetcher with an explicit total request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Box<dyn Document>, FetchError> {
        let response = self.client.get(url).send().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, source)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        // Keep the final URL after redirects as the base for relative links
        let base = response.url().clone();
        let body = response.text().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, source)
            }
        })?;

        debug!(url = %base, bytes = body.len(), "page fetched");
        Ok(Box::new(HtmlDocument::new(base, body)))
    }
}

/// A downloaded HTML page.
///
/// Holds the raw body; parsing happens in [`Document::extract_links`], which
/// the driver schedules on the extractor pool.
#[derive(Debug)]
pub struct HtmlDocument {
    base: Url,
    body: String,
}

impl HtmlDocument {
    /// Creates a document from a base URL and an HTML body.
    #[must_use]
    pub fn new(base: Url, body: String) -> Self {
        Self { base, body }
    }

    /// Returns the URL this document was fetched from.
    #[must_use]
    pub fn url(&self) -> &str {
        self.base.as_str()
    }
}

impl Document for HtmlDocument {
    fn extract_links(&self) -> Result<Vec<String>, ExtractError> {
        let document = Html::parse_document(&self.body);
        let selector = Selector::parse("a[href]")
            .map_err(|e| ExtractError::parse(self.base.as_str(), e.to_string()))?;

        let mut links = Vec::new();
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if let Some(link) = resolve_link(&self.base, href) {
                links.push(link);
            }
        }
        Ok(links)
    }
}

/// Resolves a (possibly relative) href against the page URL.
///
/// Returns `None` for fragments, non-navigational schemes, and hrefs that
/// cannot be joined. Fragments are stripped from kept links so `page#a` and
/// `page#b` dedup to the same URL.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut joined = base.join(href).ok()?;
    match joined.scheme() {
        "http" | "https" => {
            joined.set_fragment(None);
            Some(joined.into())
        }
        _ => None,
    }
}
