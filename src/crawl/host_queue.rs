//! Per-host admission queue bounding concurrent downloads to one host.
//!
//! Each host gets its own FIFO gate: a download task is either forwarded to
//! the download pool immediately (admitted) or parked in the pending queue
//! until an earlier task to the same host completes. Admission state is
//! guarded by a per-host mutex, so unrelated hosts never serialize on each
//! other.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::pool::{Job, WorkerPool};

/// FIFO admission gate for a single host.
///
/// Invariant: `in_flight` never exceeds `capacity`, and a task is either
/// running on the pool or sitting in `pending`, never both.
pub(crate) struct HostQueue {
    host: String,
    capacity: usize,
    pool: Arc<WorkerPool>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    in_flight: usize,
    pending: VecDeque<Job>,
}

impl HostQueue {
    pub(crate) fn new(host: String, capacity: usize, pool: Arc<WorkerPool>) -> Self {
        Self {
            host,
            capacity,
            pool,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Submits a download task for this host.
    ///
    /// Forwards to the download pool if the host is under capacity,
    /// otherwise parks the task in the pending queue. Returns `false` only
    /// when the pool refused the hand-off because it was closed; nothing is
    /// admitted in that case.
    pub(crate) fn submit(&self, job: Job) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.in_flight < self.capacity {
            if self.pool.submit(job) {
                inner.in_flight += 1;
                true
            } else {
                false
            }
        } else {
            inner.pending.push_back(job);
            debug!(
                host = %self.host,
                pending = inner.pending.len(),
                "host at capacity; task queued"
            );
            true
        }
    }

    /// Marks one admitted task finished. Must be called exactly once per
    /// admitted task, success or failure.
    ///
    /// If a task is pending it is handed to the pool in the finished task's
    /// slot (`in_flight` unchanged - one finishes, one starts); otherwise
    /// the slot is released.
    pub(crate) fn complete(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(job) = inner.pending.pop_front() {
            if !self.pool.submit(job) {
                // Pool closed under us; the slot frees up after all
                inner.in_flight = inner.in_flight.saturating_sub(1);
            }
        } else {
            inner.in_flight = inner.in_flight.saturating_sub(1);
        }
    }

    /// Number of tasks currently admitted to the pool for this host.
    pub(crate) fn in_flight(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight
    }

    /// Number of tasks parked awaiting admission.
    pub(crate) fn pending_len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .len()
    }
}
