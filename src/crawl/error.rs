//! The per-URL error type recorded in a crawl's error map.

use thiserror::Error;

use crate::fetch::{ExtractError, FetchError, MalformedUrlError};

/// An error attributed to a single URL during a crawl.
///
/// A failing URL never aborts the traversal; its error is captured here and
/// surfaced in [`CrawlResult::errors`](super::CrawlResult::errors).
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The URL could not be resolved to a hostname.
    #[error(transparent)]
    MalformedUrl(#[from] MalformedUrlError),

    /// The page failed to download.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page downloaded but its links could not be extracted.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_error_wraps_fetch() {
        let error: CrawlError = FetchError::http_status("https://a.com/x", 503).into();
        assert!(matches!(error, CrawlError::Fetch(_)));
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn test_crawl_error_wraps_extract() {
        let error: CrawlError = ExtractError::parse("https://a.com/x", "truncated body").into();
        assert!(matches!(error, CrawlError::Extract(_)));
        assert!(error.to_string().contains("truncated body"));
    }

    #[test]
    fn test_crawl_error_wraps_malformed_url() {
        let source = url::Url::parse("no scheme here").unwrap_err();
        let error: CrawlError = MalformedUrlError {
            url: "no scheme here".to_string(),
            source,
        }
        .into();
        assert!(matches!(error, CrawlError::MalformedUrl(_)));
        assert!(error.to_string().contains("malformed URL"));
    }
}
