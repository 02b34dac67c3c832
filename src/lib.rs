//! Crawler Core Library
//!
//! This library provides the core functionality for the crawler tool: a
//! concurrent, depth-bounded breadth-first web crawler. Starting from a
//! single URL it downloads pages, extracts outbound links, and recurses
//! layer by layer up to a caller-specified depth.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`crawl`] - BFS driver, worker pools, per-host admission, layer barrier
//! - [`fetch`] - Page fetching and link extraction (HTTP implementation plus
//!   the capability traits the driver consumes)
//!
//! # Concurrency Model
//!
//! Downloads and link extractions run on two independently sized fixed
//! worker pools. Concurrent downloads to a single host are additionally
//! bounded by a per-host admission queue, so one slow host can never occupy
//! the whole download pool. Traversal is strictly breadth-first: a layer
//! barrier guarantees no URL at depth d+1 is dispatched before every
//! download and extraction at depth d has completed or failed.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use crawler_core::{Crawler, HttpFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Arc::new(HttpFetcher::new());
//! let crawler = Crawler::new(fetcher, 16, 16, 8)?;
//! let result = crawler.crawl("https://example.com", 2).await;
//! println!("downloaded {} pages", result.downloaded.len());
//! crawler.close();
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crawl;
pub mod fetch;

// Re-export commonly used types
pub use crawl::{
    CrawlError, CrawlResult, Crawler, CrawlerError, DEFAULT_DOWNLOADERS, DEFAULT_EXTRACTORS,
    DEFAULT_PER_HOST,
};
pub use fetch::{
    Document, ExtractError, FetchError, Fetcher, HtmlDocument, HttpFetcher, MalformedUrlError,
    resolve_host,
};
