//! # tickertape - terminal stock quote dashboard
//!
//! A live quote table for a persisted watchlist, built with ratatui.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the main event loop
//! - **Coordinator**: Single owner of the watchlist and quote snapshot, plus
//!   the interval scheduler that keeps it fresh
//! - **API**: Quote sources (Yahoo Finance, CoinGecko)
//! - **Watchlist**: Symbols and their on-disk persistence
//! - **State**: UI state store driven by actions
//! - **UI**: Layout, formatting and widgets
//! - **Events**: Key bindings and input handling
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod state;
pub mod ui;
pub mod watchlist;

pub use app::App;
pub use config::Config;
pub use coordinator::{RefreshCoordinator, Scheduler, WatchlistView};
pub use error::{Error, Result};
