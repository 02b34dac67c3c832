//! Fixed-size worker pools for download and extraction tasks.
//!
//! A pool owns N detached Tokio workers that pull boxed task futures off a
//! shared unbounded channel, so at most N tasks execute at once while
//! submission never blocks the caller. Closing the pool drops the sender:
//! already-queued tasks drain, later submissions are refused.

use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::BoxFuture;
use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A unit of work executed by a pool worker.
pub(crate) type Job = BoxFuture<'static, ()>;

/// Fixed-size pool of task-executing workers.
///
/// Workers share one receiver behind an async mutex; the lock is released
/// before a pulled job is awaited, so all workers execute concurrently.
#[derive(Debug)]
pub(crate) struct WorkerPool {
    name: &'static str,
    size: usize,
    sender: Mutex<Option<mpsc::UnboundedSender<Job>>>,
}

impl WorkerPool {
    /// Starts a pool of `size` workers.
    ///
    /// `size` must be at least 1; the crawler constructor validates this
    /// before building pools. Must be called within a Tokio runtime.
    pub(crate) fn new(size: usize, name: &'static str) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel::<Job>();
        let receiver = Arc::new(AsyncMutex::new(receiver));

        for worker in 0..size {
            let receiver = Arc::clone(&receiver);
            tokio::spawn(async move {
                loop {
                    let job = {
                        let mut receiver = receiver.lock().await;
                        receiver.recv().await
                    };
                    let Some(job) = job else { break };
                    job.await;
                }
                trace!(pool = name, worker, "worker exiting");
            });
        }

        debug!(pool = name, size, "worker pool started");
        Self {
            name,
            size,
            sender: Mutex::new(Some(sender)),
        }
    }

    /// Returns the configured worker count.
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Submits a job for execution. Never blocks.
    ///
    /// Returns `false` if the pool has been closed; the job is dropped.
    pub(crate) fn submit(&self, job: Job) -> bool {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(sender) => sender.send(job).is_ok(),
            None => {
                debug!(pool = self.name, "submit after close; job dropped");
                false
            }
        }
    }

    /// Closes the pool. Idempotent.
    ///
    /// Already-queued jobs drain before the workers exit; submissions after
    /// close are refused.
    pub(crate) fn close(&self) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_some() {
            debug!(pool = self.name, "worker pool closed");
        }
    }

    /// Returns whether the pool has been closed.
    pub(crate) fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
