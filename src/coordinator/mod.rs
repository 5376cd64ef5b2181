//! Refresh coordination.
//!
//! The [`RefreshCoordinator`] is the single owner of the watchlist and the
//! latest quote snapshot. Every operation takes one async mutex for its full
//! duration, network fetch included, so refreshes and watchlist edits from
//! the scheduler and from the UI never interleave. After each state change
//! the coordinator publishes an immutable [`WatchlistView`] on a watch
//! channel; the UI draws from that and never touches the lock.

mod scheduler;

pub use scheduler::Scheduler;

use crate::api::QuoteSource;
use crate::error::Result;
use crate::state::Snapshot;
use crate::watchlist::{Symbol, Watchlist, WatchlistStore};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A consistent, read-only picture of the coordinator's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchlistView {
    /// Tracked symbols in display order.
    pub symbols: Vec<Symbol>,
    /// Quotes from the most recent successful refresh.
    pub snapshot: Snapshot,
    /// Why the most recent refresh failed, if it did.
    pub last_error: Option<String>,
    /// Why the most recent save failed, if it did.
    pub persist_warning: Option<String>,
}

/// State guarded by the operation lock.
#[derive(Debug)]
struct Tracked {
    watchlist: Watchlist,
    snapshot: Snapshot,
    /// Start of the most recent successful refresh.
    last_refreshed: Option<Instant>,
    last_error: Option<String>,
    persist_warning: Option<String>,
}

impl Tracked {
    fn view(&self) -> WatchlistView {
        WatchlistView {
            symbols: self.watchlist.symbols().to_vec(),
            snapshot: self.snapshot.clone(),
            last_error: self.last_error.clone(),
            persist_warning: self.persist_warning.clone(),
        }
    }
}

/// Whether a refresh is due given when the last successful one started.
pub fn refresh_due(last_refreshed: Option<Instant>, now: Instant, interval: Duration) -> bool {
    match last_refreshed {
        Some(started) => now.saturating_duration_since(started) >= interval,
        None => true,
    }
}

/// Owns the watchlist and quote snapshot and serializes all changes to them.
pub struct RefreshCoordinator {
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn WatchlistStore>,
    tracked: Mutex<Tracked>,
    view_tx: watch::Sender<Arc<WatchlistView>>,
}

impl RefreshCoordinator {
    /// Create a coordinator around an already loaded watchlist.
    pub fn new(
        watchlist: Watchlist,
        source: Arc<dyn QuoteSource>,
        store: Arc<dyn WatchlistStore>,
    ) -> Self {
        let tracked = Tracked {
            watchlist,
            snapshot: Snapshot::default(),
            last_refreshed: None,
            last_error: None,
            persist_warning: None,
        };
        let (view_tx, _) = watch::channel(Arc::new(tracked.view()));

        Self {
            source,
            store,
            tracked: Mutex::new(tracked),
            view_tx,
        }
    }

    /// Load the watchlist from `store`, falling back to the defaults when
    /// nothing was saved. A malformed file is an error.
    pub async fn load(
        source: Arc<dyn QuoteSource>,
        store: Arc<dyn WatchlistStore>,
    ) -> Result<Self> {
        let watchlist = match store.load().await? {
            Some(names) => Watchlist::from_names(names),
            None => {
                info!("No saved watchlist, starting with defaults");
                Watchlist::with_defaults()
            }
        };
        info!("Tracking {} symbols", watchlist.len());

        Ok(Self::new(watchlist, source, store))
    }

    /// The latest published view.
    pub fn view(&self) -> Arc<WatchlistView> {
        self.view_tx.borrow().clone()
    }

    /// A receiver that wakes whenever a new view is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WatchlistView>> {
        self.view_tx.subscribe()
    }

    /// Fetch quotes for the current watchlist and replace the snapshot.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned and recorded in the view.
    pub async fn refresh(&self) -> Result<()> {
        let mut tracked = self.tracked.lock().await;
        self.refresh_locked(&mut tracked).await
    }

    /// Refresh only if no successful refresh started within `interval`.
    ///
    /// Returns whether a refresh was attempted.
    pub async fn refresh_if_due(&self, interval: Duration) -> Result<bool> {
        let mut tracked = self.tracked.lock().await;
        if !refresh_due(tracked.last_refreshed, Instant::now(), interval) {
            return Ok(false);
        }
        self.refresh_locked(&mut tracked).await.map(|()| true)
    }

    /// Add symbols that are not tracked yet, save the watchlist, then refresh.
    ///
    /// Returns the symbols that were actually added. The watchlist is saved
    /// even when nothing changed.
    pub async fn add_symbols<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Symbol>> {
        let mut tracked = self.tracked.lock().await;

        let mut added = Vec::new();
        for symbol in names.iter().filter_map(|n| Symbol::parse(n.as_ref())) {
            if tracked.watchlist.push(symbol.clone()) {
                added.push(symbol);
            }
        }
        if !added.is_empty() {
            info!("Added {:?} to watchlist", added);
        }

        self.persist_locked(&mut tracked).await;
        self.publish(&tracked);
        self.refresh_locked(&mut tracked).await?;

        Ok(added)
    }

    /// Remove tracked symbols along with their snapshot rows, then refresh.
    ///
    /// Unknown symbols are ignored. Returns the symbols that were removed.
    pub async fn remove_symbols<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Symbol>> {
        let mut tracked = self.tracked.lock().await;

        let mut removed = Vec::new();
        for symbol in names.iter().filter_map(|n| Symbol::parse(n.as_ref())) {
            if tracked.watchlist.remove(&symbol) {
                self.persist_locked(&mut tracked).await;
                tracked.snapshot.remove(&symbol);
                removed.push(symbol);
            }
        }
        if !removed.is_empty() {
            info!("Removed {:?} from watchlist", removed);
            self.publish(&tracked);
        }

        self.refresh_locked(&mut tracked).await?;

        Ok(removed)
    }

    async fn refresh_locked(&self, tracked: &mut Tracked) -> Result<()> {
        let started = Instant::now();

        let result = if tracked.watchlist.is_empty() {
            Ok(Vec::new())
        } else {
            self.source.fetch_quotes(tracked.watchlist.symbols()).await
        };

        match result {
            Ok(quotes) => {
                tracked.snapshot = Snapshot::from_quotes(&tracked.watchlist, quotes, Utc::now());
                tracked.last_refreshed = Some(started);
                tracked.last_error = None;
                debug!(
                    "Refreshed {} of {} symbols in {:?}",
                    tracked.snapshot.len(),
                    tracked.watchlist.len(),
                    started.elapsed()
                );
                self.publish(tracked);
                Ok(())
            }
            Err(e) => {
                warn!("Quote refresh failed: {}", e);
                tracked.last_error = Some(e.to_string());
                self.publish(tracked);
                Err(e)
            }
        }
    }

    /// Save the watchlist. Failures are downgraded to a warning in the view;
    /// the in-memory watchlist stays authoritative.
    async fn persist_locked(&self, tracked: &mut Tracked) {
        match self.store.save(tracked.watchlist.symbols()).await {
            Ok(()) => tracked.persist_warning = None,
            Err(e) => {
                warn!("Failed to save watchlist: {}", e);
                tracked.persist_warning = Some(e.to_string());
            }
        }
    }

    fn publish(&self, tracked: &Tracked) {
        self.view_tx.send_replace(Arc::new(tracked.view()));
    }
}
