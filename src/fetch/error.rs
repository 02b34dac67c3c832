//! Error types for the fetch module.
//!
//! These are the three failure kinds the crawl driver records per URL:
//! a URL that cannot be resolved to a host, a page that failed to download,
//! and a downloaded page whose links could not be extracted.

use thiserror::Error;

/// A URL that cannot be parsed into a hostname.
#[derive(Debug, Error)]
#[error("malformed URL {url}: {source}")]
pub struct MalformedUrlError {
    /// The URL that failed to parse.
    pub url: String,
    /// The underlying parse error.
    #[source]
    pub source: url::ParseError,
}

/// Errors that can occur while downloading a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Any other fetch failure, described by a plain message.
    ///
    /// This variant exists so alternative [`Fetcher`](super::Fetcher)
    /// implementations can report failures without a `reqwest::Error`.
    #[error("fetch failed for {url}: {reason}")]
    Other {
        /// The URL that failed.
        url: String,
        /// Description of the failure.
        reason: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a generic fetch error with a plain message.
    pub fn other(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Other {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while extracting links from a downloaded page.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page body could not be parsed for links.
    #[error("failed to extract links from {url}: {reason}")]
    Parse {
        /// The URL of the page whose links could not be extracted.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },
}

impl ExtractError {
    /// Creates a parse error.
    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` because the
// variants require context (the URL) that the source error does not carry.
// The helper constructors are the supported construction path.
