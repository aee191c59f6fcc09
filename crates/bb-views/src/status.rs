//! # Polling Status Cache
//!
//! Keeps the latest backend status so views can read the chain height
//! synchronously. The poller refetches on a fixed interval for the lifetime
//! of the process and keeps the previous snapshot when a fetch fails.

use std::sync::Arc;
use std::time::Duration;

use bb_core::models::Status;
use bb_core::traits::BulletinApi;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(15);

type Snapshot = Option<Arc<Status>>;

/// Shared handle to the last known status. Cloning shares the same cache.
#[derive(Clone)]
pub struct StatusCache {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(None)),
        }
    }

    /// `None` until the first successful fetch.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn block_height(&self) -> Option<u64> {
        self.tx.borrow().as_ref().and_then(|s| s.chain_height())
    }

    /// Receiver that wakes on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Atomically swaps in a new snapshot.
    pub fn replace(&self, status: Status) {
        self.tx.send_replace(Some(Arc::new(status)));
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StatusPoller {
    api: Arc<dyn BulletinApi>,
    cache: StatusCache,
    every: Duration,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn BulletinApi>, cache: StatusCache, every: Duration) -> Self {
        Self { api, cache, every }
    }

    /// One fetch. Returns whether the cache was replaced.
    pub async fn refresh_once(&self) -> bool {
        match self.api.get_status().await {
            Ok(status) => {
                debug!(height = ?status.chain_height(), "status refreshed");
                self.cache.replace(status);
                true
            }
            Err(e) => {
                warn!(error = %e, "status refresh failed, keeping previous snapshot");
                false
            }
        }
    }

    /// Fetches immediately, then once per interval, forever.
    ///
    /// Each fetch is awaited before the next tick is taken, so at most one
    /// request is ever in flight. Ticks missed while a slow fetch was
    /// pending are skipped rather than fired in a burst.
    pub async fn run(self) {
        let mut ticker = interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.refresh_once().await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use bb_core::{AppError, MockBulletinApi};
    use std::sync::atomic::Ordering;

    fn status(height: u64) -> Status {
        Status {
            block_height: Some(height),
            ..Default::default()
        }
    }

    #[test]
    fn empty_cache_has_no_height() {
        let cache = StatusCache::new();
        assert!(cache.snapshot().is_none());
        assert_eq!(cache.block_height(), None);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let mut api = MockBulletinApi::new();
        let mut calls = 0;
        api.expect_get_status().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(status(100))
            } else {
                Err(AppError::Transport("connection reset".into()))
            }
        });

        let cache = StatusCache::new();
        let poller = StatusPoller::new(Arc::new(api), cache.clone(), DEFAULT_INTERVAL);

        assert!(poller.refresh_once().await);
        assert!(!poller.refresh_once().await);
        assert_eq!(cache.block_height(), Some(100));
    }

    #[tokio::test(start_paused = true)]
    async fn polls_at_startup_and_every_interval() {
        let mut api = MockBulletinApi::new();
        let mut height = 0;
        api.expect_get_status().returning(move || {
            height += 1;
            Ok(status(height))
        });

        let cache = StatusCache::new();
        let handle = StatusPoller::new(Arc::new(api), cache.clone(), DEFAULT_INTERVAL).spawn();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(cache.block_height(), Some(1));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(cache.block_height(), Some(3));
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_never_overlaps_refreshes() {
        let api = Arc::new(FakeApi::default().with_status_delay(Duration::from_secs(40)));
        let handle =
            StatusPoller::new(api.clone(), StatusCache::new(), DEFAULT_INTERVAL).spawn();

        tokio::time::sleep(Duration::from_secs(200)).await;
        handle.abort();

        assert!(api.status_calls.load(Ordering::SeqCst) >= 4);
        assert_eq!(api.max_status_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let cache = StatusCache::new();
        let mut rx = cache.subscribe();
        cache.replace(status(9));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().and_then(|s| s.chain_height()), Some(9));
    }
}
