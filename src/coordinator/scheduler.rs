//! Interval-gated background refresh.

use super::RefreshCoordinator;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Requests a refresh at most once per interval.
///
/// The scheduler wakes once a second and asks the coordinator to refresh if
/// the last successful refresh started at least `interval` ago. A tick that
/// lands while another operation holds the coordinator simply waits for it;
/// ticks missed in the meantime are dropped, not replayed.
pub struct Scheduler {
    coordinator: Arc<RefreshCoordinator>,
    interval: Duration,
}

impl Scheduler {
    /// How often the scheduler checks whether a refresh is due.
    pub const TICK: Duration = Duration::from_secs(1);

    pub fn new(coordinator: Arc<RefreshCoordinator>, interval: Duration) -> Self {
        Self {
            coordinator,
            interval,
        }
    }

    /// Run the scheduler on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Tick forever.
    pub async fn run(self) {
        info!("Scheduler started, refresh interval {:?}", self.interval);

        let mut ticker = tokio::time::interval(Self::TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match self.coordinator.refresh_if_due(self.interval).await {
                Ok(true) => debug!("Scheduled refresh complete"),
                Ok(false) => {}
                Err(e) if e.is_recoverable() => warn!("Scheduled refresh failed: {}", e),
                Err(e) => error!("Scheduled refresh failed: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuoteSource;
    use crate::error::{Error, Result};
    use crate::state::Quote;
    use crate::watchlist::{MockWatchlistStore, Symbol, Watchlist};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches; fails every one when `fail` is set.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl QuoteSource for CountingSource {
        async fn fetch_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(Error::upstream("unavailable"))
            } else {
                Ok(symbols.iter().map(|s| Quote::new(s.clone())).collect())
            }
        }
    }

    fn spawn_scheduler(fail: bool, interval: Duration) -> (Arc<AtomicUsize>, JoinHandle<()>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: calls.clone(),
            fail,
        };
        let coordinator = Arc::new(RefreshCoordinator::new(
            Watchlist::with_defaults(),
            Arc::new(source),
            Arc::new(MockWatchlistStore::new()),
        ));
        let handle = Scheduler::new(coordinator, interval).spawn();
        (calls, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_once_per_interval() {
        let (calls, handle) = spawn_scheduler(false, Duration::from_secs(5));

        // Ticks at 0..=12s; refreshes are due at 0, 5 and 10.
        tokio::time::sleep(Duration::from_millis(12_500)).await;
        handle.abort();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_is_retried_next_tick() {
        let (calls, handle) = spawn_scheduler(true, Duration::from_secs(5));

        // Nothing succeeds, so every tick at 0, 1, 2 and 3 tries again.
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        handle.abort();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
