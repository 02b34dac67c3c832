//! Depth-bounded breadth-first crawl orchestration.
//!
//! This module contains the crawl driver and the synchronization pieces it
//! is built from:
//!
//! - [`Crawler`] - the BFS driver and public entry point
//! - a fixed-size worker pool for downloads and one for link extractions
//! - a per-host admission queue bounding concurrent downloads to each host
//! - a layer barrier that holds the driver until a BFS layer has drained
//!
//! # Traversal Guarantees
//!
//! - Each distinct URL is dispatched at most once per crawl
//! - No URL at depth d+1 is dispatched before layer d fully drains
//! - Concurrent downloads to one host never exceed the per-host limit
//! - A failing URL is recorded in the error map; the crawl continues

mod barrier;
mod crawler;
mod error;
mod host_queue;
mod pool;
mod state;

pub use crawler::{
    Crawler, CrawlerError, DEFAULT_DOWNLOADERS, DEFAULT_EXTRACTORS, DEFAULT_PER_HOST,
};
pub use error::CrawlError;
pub use state::CrawlResult;
