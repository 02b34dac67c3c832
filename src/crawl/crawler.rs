//! Breadth-first crawl driver.
//!
//! The driver walks the link graph layer by layer. Every URL of the current
//! layer is wrapped in a download task and submitted through its host's
//! admission queue to the download pool; successful downloads chain an
//! extraction task onto the extractor pool, and extraction feeds newly
//! discovered URLs into the next layer. A counting barrier holds the driver
//! between layers until all of the current layer's downloads and
//! extractions have finished, so depth accounting is exact.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use crawler_core::{Crawler, HttpFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let crawler = Crawler::new(Arc::new(HttpFetcher::new()), 16, 16, 8)?;
//! let result = crawler
//!     .crawl_with_hosts("https://example.com", 2, &["example.com".to_string()])
//!     .await;
//! for url in &result.downloaded {
//!     println!("{url}");
//! }
//! crawler.close();
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::fetch::{Fetcher, resolve_host};

use super::barrier::LayerBarrier;
use super::host_queue::HostQueue;
use super::pool::{Job, WorkerPool};
use super::state::{CrawlResult, CrawlState};

/// Minimum allowed worker count per pool.
const MIN_WORKERS: usize = 1;

/// Maximum allowed worker count per pool.
const MAX_WORKERS: usize = 100;

/// Default download pool size.
pub const DEFAULT_DOWNLOADERS: usize = 16;

/// Default extraction pool size.
pub const DEFAULT_EXTRACTORS: usize = 16;

/// Default per-host concurrent download limit.
pub const DEFAULT_PER_HOST: usize = 8;

/// Error type for crawler construction.
#[derive(Debug, Error)]
pub enum CrawlerError {
    /// Invalid worker count for one of the pools.
    #[error("invalid {role} pool size {value}: must be between {MIN_WORKERS} and {MAX_WORKERS}")]
    InvalidPoolSize {
        /// Which pool the value was for.
        role: &'static str,
        /// The invalid value that was provided.
        value: usize,
    },

    /// Invalid per-host download limit.
    #[error("invalid per-host limit {value}: must be at least 1")]
    InvalidPerHost {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Concurrent depth-bounded breadth-first web crawler.
///
/// One crawler owns a fixed download pool, a fixed extraction pool, and a
/// table of per-host admission queues. The host-queue table is keyed by
/// hostname and intentionally retained across `crawl` calls on the same
/// instance, so repeated crawls reuse the same admission gates; every
/// queue's in-flight count returns to zero when a crawl's last task
/// completes.
///
/// # Concurrency Model
///
/// - Each download and extraction runs as a queued task on its pool
/// - Per-host admission defers tasks rather than blocking workers
/// - The driver blocks only between layers, on the layer barrier
/// - Visited/downloaded/error state uses sharded maps, never a global lock
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    download_pool: Arc<WorkerPool>,
    extract_pool: Arc<WorkerPool>,
    per_host: usize,
    host_queues: DashMap<String, Arc<HostQueue>>,
}

impl Crawler {
    /// Creates a crawler with the given pool sizes and per-host limit.
    ///
    /// Must be called within a Tokio runtime; the pools spawn their workers
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::InvalidPoolSize`] if `downloaders` or
    /// `extractors` is outside `1..=100`, and
    /// [`CrawlerError::InvalidPerHost`] if `per_host` is zero.
    #[instrument(skip(fetcher))]
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        downloaders: usize,
        extractors: usize,
        per_host: usize,
    ) -> Result<Self, CrawlerError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&downloaders) {
            return Err(CrawlerError::InvalidPoolSize {
                role: "downloader",
                value: downloaders,
            });
        }
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&extractors) {
            return Err(CrawlerError::InvalidPoolSize {
                role: "extractor",
                value: extractors,
            });
        }
        if per_host == 0 {
            return Err(CrawlerError::InvalidPerHost { value: per_host });
        }

        debug!(downloaders, extractors, per_host, "creating crawler");

        Ok(Self {
            fetcher,
            download_pool: Arc::new(WorkerPool::new(downloaders, "downloads")),
            extract_pool: Arc::new(WorkerPool::new(extractors, "extractions")),
            per_host,
            host_queues: DashMap::new(),
        })
    }

    /// Creates a crawler with the default pool sizes and per-host limit.
    #[must_use]
    pub fn with_defaults(fetcher: Arc<dyn Fetcher>) -> Self {
        match Self::new(fetcher, DEFAULT_DOWNLOADERS, DEFAULT_EXTRACTORS, DEFAULT_PER_HOST) {
            Ok(crawler) => crawler,
            Err(_) => unreachable!("default crawler configuration is valid"),
        }
    }

    /// Returns the configured per-host concurrent download limit.
    #[must_use]
    pub fn per_host(&self) -> usize {
        self.per_host
    }

    /// Crawls breadth-first from `start_url` up to `max_depth` layers.
    ///
    /// Depth is 1-based: `max_depth = 1` downloads only the start page,
    /// `max_depth = 2` also downloads the pages it links to, and so on.
    /// Per-URL failures are collected in the result's error map; this method
    /// itself never fails.
    pub async fn crawl(&self, start_url: &str, max_depth: usize) -> CrawlResult {
        self.run(start_url, max_depth, None).await
    }

    /// Like [`crawl`](Self::crawl), but restricted to an allow-list of
    /// hostnames. URLs on other hosts are dropped silently - never visited,
    /// never an error. If the start URL's own host is not allow-listed the
    /// result is empty.
    pub async fn crawl_with_hosts(
        &self,
        start_url: &str,
        max_depth: usize,
        allowed_hosts: &[String],
    ) -> CrawlResult {
        let allowed: HashSet<String> = allowed_hosts
            .iter()
            .map(|host| host.to_ascii_lowercase())
            .collect();
        self.run(start_url, max_depth, Some(allowed)).await
    }

    /// Shuts down both worker pools. Idempotent.
    ///
    /// Already-queued tasks drain; a crawl still in flight when `close` is
    /// called completes best-effort, and work refused after shutdown is
    /// dropped silently.
    pub fn close(&self) {
        self.download_pool.close();
        self.extract_pool.close();
        info!("crawler closed");
    }

    /// Returns whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.download_pool.is_closed() && self.extract_pool.is_closed()
    }

    #[instrument(skip(self, allowed), fields(start_url = %start_url))]
    async fn run(
        &self,
        start_url: &str,
        max_depth: usize,
        allowed: Option<HashSet<String>>,
    ) -> CrawlResult {
        let state = Arc::new(CrawlState::new());

        // With an allow-list configured, the start URL is gated up front: a
        // malformed start URL is the single entry of the error map, and a
        // start host outside the list yields an empty result.
        if let Some(hosts) = &allowed {
            match resolve_host(start_url) {
                Ok(host) => {
                    if !hosts.contains(&host) {
                        debug!(host = %host, "start URL host not allow-listed");
                        return state.drain_result();
                    }
                }
                Err(error) => {
                    state.record_error(start_url.to_string(), error.into());
                    return state.drain_result();
                }
            }
        }

        let allowed = Arc::new(allowed);
        let barrier = Arc::new(LayerBarrier::new());

        state.mark_visited(start_url);
        let mut layer = vec![start_url.to_string()];
        let mut depth = 1usize;

        while !layer.is_empty() && depth <= max_depth {
            debug!(depth, urls = layer.len(), "dispatching layer");
            for url in layer {
                self.dispatch(url, depth, max_depth, &state, &barrier, &allowed);
            }
            barrier.await_drain().await;
            layer = state.take_next_layer();
            depth += 1;
        }

        let result = state.drain_result();
        info!(
            downloaded = result.downloaded.len(),
            errors = result.errors.len(),
            layers = depth - 1,
            "crawl finished"
        );
        result
    }

    /// Dispatches one URL of the current layer: resolves its host, registers
    /// it on the barrier, and submits the download task through the host's
    /// admission queue.
    fn dispatch(
        &self,
        url: String,
        depth: usize,
        max_depth: usize,
        state: &Arc<CrawlState>,
        barrier: &Arc<LayerBarrier>,
        allowed: &Arc<Option<HashSet<String>>>,
    ) {
        // Layer URLs were host-checked at discovery; only the start URL of
        // an unrestricted crawl reaches this resolution unchecked.
        let host = match resolve_host(&url) {
            Ok(host) => host,
            Err(error) => {
                state.record_error(url, error.into());
                return;
            }
        };

        // Get or create the host's admission queue; clone the Arc to
        // release the shard lock before submitting.
        let host_queue = self
            .host_queues
            .entry(host.clone())
            .or_insert_with(|| {
                Arc::new(HostQueue::new(
                    host,
                    self.per_host,
                    Arc::clone(&self.download_pool),
                ))
            })
            .clone();

        let fetcher = Arc::clone(&self.fetcher);
        let extract_pool = Arc::clone(&self.extract_pool);
        let job_state = Arc::clone(state);
        let job_barrier = Arc::clone(barrier);
        let job_allowed = Arc::clone(allowed);
        let job_queue = Arc::clone(&host_queue);

        barrier.register();
        let job: Job = Box::pin(async move {
            match fetcher.fetch(&url).await {
                Ok(document) => {
                    job_state.record_downloaded(&url);
                    debug!(url = %url, depth, "page downloaded");

                    if depth < max_depth {
                        // Register the extraction before arriving for the
                        // download, so the barrier count never dips to zero
                        // while this layer still has chained work.
                        job_barrier.register();
                        let parent = url.clone();
                        let extract_state = Arc::clone(&job_state);
                        let extract_barrier = Arc::clone(&job_barrier);
                        let extract_allowed = Arc::clone(&job_allowed);
                        let extract_job: Job = Box::pin(async move {
                            process_links(
                                document.as_ref(),
                                &parent,
                                &extract_state,
                                &extract_allowed,
                            );
                            extract_barrier.arrive_and_deregister();
                        });
                        if !extract_pool.submit(extract_job) {
                            job_barrier.arrive_and_deregister();
                        }
                    }
                }
                Err(error) => {
                    warn!(url = %url, error = %error, "download failed");
                    job_state.record_error(url.clone(), error.into());
                }
            }
            job_queue.complete();
            job_barrier.arrive_and_deregister();
        });

        if !host_queue.submit(job) {
            // Pool closed; nothing was admitted and the task will never run
            barrier.arrive_and_deregister();
        }
    }
}

/// Extraction task body: pulls links out of a downloaded page and feeds the
/// unseen, allow-listed ones into the next layer.
fn process_links(
    document: &dyn crate::fetch::Document,
    parent: &str,
    state: &CrawlState,
    allowed: &Option<HashSet<String>>,
) {
    match document.extract_links() {
        Ok(links) => {
            let mut discovered = 0usize;
            for link in links {
                match resolve_host(&link) {
                    Ok(host) => {
                        let host_allowed = allowed
                            .as_ref()
                            .is_none_or(|hosts| hosts.contains(&host));
                        if host_allowed && state.mark_visited(&link) {
                            state.push_next(link);
                            discovered += 1;
                        }
                    }
                    Err(error) => {
                        // A malformed discovered link is terminal for that
                        // link only; the rest of the page still counts.
                        state.record_error(link, error.into());
                    }
                }
            }
            debug!(url = %parent, discovered, "links extracted");
        }
        Err(error) => {
            warn!(url = %parent, error = %error, "link extraction failed");
            state.record_error(parent.to_string(), error.into());
        }
    }
}
