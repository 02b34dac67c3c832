//! Counting barrier over in-flight layer work.
//!
//! The driver registers one unit per dispatched download and one more per
//! chained extraction, then blocks in [`LayerBarrier::await_drain`] until
//! every unit has arrived. This is what makes the traversal genuinely
//! breadth-first: the next layer is materialized only after the current one
//! has fully drained.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Counts outstanding layer work and wakes the driver when it hits zero.
#[derive(Debug, Default)]
pub(crate) struct LayerBarrier {
    outstanding: AtomicUsize,
    drained: Notify,
}

impl LayerBarrier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers one unit of outstanding work.
    pub(crate) fn register(&self) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
    }

    /// Marks one unit of work complete, waking drain waiters on the last one.
    pub(crate) fn arrive_and_deregister(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.drained.notify_waiters();
        }
    }

    /// Waits until the outstanding count reaches zero.
    ///
    /// Returns immediately if nothing is registered. The notification is
    /// armed before the counter is re-checked, so an arrival between the
    /// check and the await cannot be lost.
    pub(crate) async fn await_drain(&self) {
        loop {
            let notified = self.drained.notified();
            if self.outstanding.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Current outstanding count.
    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_await_drain_returns_immediately_when_idle() {
        let barrier = LayerBarrier::new();
        timeout(Duration::from_millis(100), barrier.await_drain())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_await_drain_blocks_until_all_arrive() {
        let barrier = Arc::new(LayerBarrier::new());
        barrier.register();
        barrier.register();

        let worker = Arc::clone(&barrier);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            worker.arrive_and_deregister();
            tokio::time::sleep(Duration::from_millis(10)).await;
            worker.arrive_and_deregister();
        });

        timeout(Duration::from_secs(1), barrier.await_drain())
            .await
            .unwrap();
        assert_eq!(barrier.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_await_drain_does_not_release_early() {
        let barrier = Arc::new(LayerBarrier::new());
        barrier.register();
        barrier.register();
        barrier.arrive_and_deregister();

        // One unit still outstanding: drain must not complete
        assert!(
            timeout(Duration::from_millis(50), barrier.await_drain())
                .await
                .is_err()
        );

        barrier.arrive_and_deregister();
        timeout(Duration::from_secs(1), barrier.await_drain())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_barrier_reusable_across_layers() {
        let barrier = Arc::new(LayerBarrier::new());

        for _ in 0..3 {
            barrier.register();
            let worker = Arc::clone(&barrier);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                worker.arrive_and_deregister();
            });
            timeout(Duration::from_secs(1), barrier.await_drain())
                .await
                .unwrap();
            assert_eq!(barrier.outstanding(), 0);
        }
    }

    #[tokio::test]
    async fn test_nested_registration_extends_drain() {
        let barrier = Arc::new(LayerBarrier::new());
        barrier.register();

        let worker = Arc::clone(&barrier);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            // Chain a second unit before arriving for the first, the way a
            // download registers its extraction
            worker.register();
            worker.arrive_and_deregister();
            tokio::time::sleep(Duration::from_millis(10)).await;
            worker.arrive_and_deregister();
        });

        timeout(Duration::from_secs(1), barrier.await_drain())
            .await
            .unwrap();
        assert_eq!(barrier.outstanding(), 0);
    }
}
