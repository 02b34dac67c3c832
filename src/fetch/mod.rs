//! Page fetching and link extraction.
//!
//! This module defines the two capabilities the crawl driver consumes - a
//! [`Fetcher`] that downloads a URL into a [`Document`], and the document's
//! own link extraction - plus [`resolve_host`], which maps a URL to the
//! lowercase hostname used for per-host admission and allow-list filtering.
//!
//! The production implementation is [`HttpFetcher`] (reqwest + scraper).
//! Tests substitute scripted fetchers; the driver only ever sees the traits.

mod error;
mod http;

pub use error::{ExtractError, FetchError, MalformedUrlError};
pub use http::{HtmlDocument, HttpFetcher};

use async_trait::async_trait;
use url::Url;

/// A downloaded page whose outbound links can be extracted.
///
/// Extraction is synchronous and CPU-bound; the driver runs it on the
/// extractor pool, never on a download worker.
pub trait Document: Send + Sync + std::fmt::Debug {
    /// Extracts the outbound links of this page as absolute URL strings.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the page body cannot be parsed.
    fn extract_links(&self) -> Result<Vec<String>, ExtractError>;
}

/// Capability to download a URL into a [`Document`].
///
/// Implementations must be shareable across the download pool workers, so
/// the trait requires `Send + Sync` and is consumed as `Arc<dyn Fetcher>`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on network failure, timeout, or an HTTP error
    /// status.
    async fn fetch(&self, url: &str) -> Result<Box<dyn Document>, FetchError>;
}

/// Resolves a URL to its lowercase hostname.
///
/// # Errors
///
/// Returns [`MalformedUrlError`] if the URL cannot be parsed or has no host
/// component (e.g. `mailto:` or `file:` URLs).
///
/// # Examples
///
/// ```
/// use crawler_core::resolve_host;
///
/// assert_eq!(resolve_host("https://Example.COM/Path").unwrap(), "example.com");
/// assert_eq!(resolve_host("https://localhost:8080/x").unwrap(), "localhost");
/// assert!(resolve_host("not a url").is_err());
/// ```
pub fn resolve_host(url: &str) -> Result<String, MalformedUrlError> {
    let parsed = Url::parse(url).map_err(|source| MalformedUrlError {
        url: url.to_string(),
        source,
    })?;
    match parsed.host_str() {
        Some(host) => Ok(host.to_ascii_lowercase()),
        None => Err(MalformedUrlError {
            url: url.to_string(),
            source: url::ParseError::EmptyHost,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_host_valid_https() {
        assert_eq!(
            resolve_host("https://example.com/path/page.html").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_resolve_host_lowercases() {
        assert_eq!(resolve_host("https://Example.COM/Path").unwrap(), "example.com");
    }

    #[test]
    fn test_resolve_host_strips_port() {
        assert_eq!(
            resolve_host("https://example.com:8080/path").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_resolve_host_ip_address() {
        assert_eq!(resolve_host("https://192.168.1.1/page").unwrap(), "192.168.1.1");
    }

    #[test]
    fn test_resolve_host_subdomain() {
        assert_eq!(
            resolve_host("https://api.example.com/v1").unwrap(),
            "api.example.com"
        );
    }

    #[test]
    fn test_resolve_host_malformed() {
        let error = resolve_host("not a valid url").unwrap_err();
        assert!(error.to_string().contains("malformed URL"));
    }

    #[test]
    fn test_resolve_host_empty() {
        assert!(resolve_host("").is_err());
    }

    #[test]
    fn test_resolve_host_no_host_component() {
        // Parses as a URL but carries no hostname
        assert!(resolve_host("mailto:user@example.com").is_err());
    }
}
