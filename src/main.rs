//! tickertape - a terminal stock quote dashboard.
//!
//! Polls a quote source on an interval and shows the watchlist as a
//! colour-coded table. Symbols are added and removed from inside the TUI
//! and the watchlist is saved between runs.

use std::sync::Arc;
use tickertape::api::QuoteSourceBuilder;
use tickertape::config::log_dir;
use tickertape::coordinator::RefreshCoordinator;
use tickertape::watchlist::FileWatchlistStore;
use tickertape::{App, Config, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to a daily file; the terminal belongs to the TUI.
fn init_logging() -> Result<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "tickertape.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickertape=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging()?;

    // Load configuration
    let config = Config::load_or_default()?;

    // Everything that can fail fatally happens before the terminal is touched
    let source = QuoteSourceBuilder::new().config(config.api.clone()).build()?;
    let store = Arc::new(FileWatchlistStore::new(config.watchlist_path()));
    let coordinator = match RefreshCoordinator::load(source, store).await {
        Ok(coordinator) => Arc::new(coordinator),
        Err(e) => {
            tracing::error!("Failed to load watchlist: {}", e);
            return Err(e);
        }
    };

    // Run the application
    let mut app = App::new(config, coordinator)?;
    app.run().await?;

    Ok(())
}
