//! Shared mutable state of one crawl invocation.
//!
//! All structures here are written concurrently by download and extraction
//! tasks and use sharded concurrent maps, so unrelated hosts and URLs never
//! contend on a global lock. Everything is created at the start of one
//! crawl call and drained into a [`CrawlResult`] when it returns.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use dashmap::{DashMap, DashSet};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::error::CrawlError;

/// Outcome of a crawl.
///
/// `downloaded` is unordered and deduplicated; `errors` maps each failing
/// URL to the first error recorded for it.
#[derive(Debug, Serialize)]
pub struct CrawlResult {
    /// URLs successfully downloaded.
    pub downloaded: Vec<String>,
    /// Per-URL errors encountered during the crawl.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: HashMap<String, CrawlError>,
}

impl CrawlResult {
    /// Returns whether any per-URL error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors are serialized as display strings; the underlying error chains
/// (reqwest, url) are not themselves serializable.
fn serialize_errors<S>(errors: &HashMap<String, CrawlError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(errors.len()))?;
    for (url, error) in errors {
        map.serialize_entry(url, &error.to_string())?;
    }
    map.end()
}

/// Concurrent crawl-scoped state: visited set, downloaded set, error map,
/// and the accumulator for the next BFS layer.
pub(crate) struct CrawlState {
    visited: DashSet<String>,
    downloaded: DashSet<String>,
    errors: DashMap<String, CrawlError>,
    next_layer: Mutex<Vec<String>>,
}

impl CrawlState {
    pub(crate) fn new() -> Self {
        Self {
            visited: DashSet::new(),
            downloaded: DashSet::new(),
            errors: DashMap::new(),
            next_layer: Mutex::new(Vec::new()),
        }
    }

    /// Atomically marks a URL visited. Returns `true` if this call was the
    /// first to see it - the core dedup primitive of the traversal.
    pub(crate) fn mark_visited(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Records a successfully downloaded URL.
    pub(crate) fn record_downloaded(&self, url: &str) {
        self.downloaded.insert(url.to_string());
    }

    /// Records an error for a URL. The first error recorded for a URL wins;
    /// later ones are dropped.
    pub(crate) fn record_error(&self, url: String, error: CrawlError) {
        self.errors.entry(url).or_insert(error);
    }

    /// Adds a URL to the next-layer accumulator.
    pub(crate) fn push_next(&self, url: String) {
        self.next_layer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
    }

    /// Takes the accumulated next layer, leaving the accumulator empty.
    pub(crate) fn take_next_layer(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .next_layer
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Drains the downloaded set and error map into a [`CrawlResult`].
    ///
    /// Must only be called after the layer barrier confirms no task is still
    /// writing.
    pub(crate) fn drain_result(&self) -> CrawlResult {
        let downloaded: Vec<String> = self
            .downloaded
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        let keys: Vec<String> = self.errors.iter().map(|entry| entry.key().clone()).collect();
        let mut errors = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some((url, error)) = self.errors.remove(&key) {
                errors.insert(url, error);
            }
        }

        CrawlResult { downloaded, errors }
    }
}
