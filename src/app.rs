//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::config::Config;
use crate::coordinator::{RefreshCoordinator, Scheduler, WatchlistView};
use crate::error::Result;
use crate::events::EventHandler;
use crate::state::{Action, Notification, Store};
use crate::ui::Ui;
use crate::watchlist::{Symbol, parse_symbols};

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future::Future;
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender, handed to background operations.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Owner of the watchlist and quotes.
    coordinator: Arc<RefreshCoordinator>,
    /// Published coordinator views.
    view_rx: watch::Receiver<Arc<WatchlistView>>,
    /// Background refresh task, running while the app runs.
    scheduler: Option<JoinHandle<()>>,
    /// Renderer.
    ui: Ui,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application and take over the terminal.
    pub fn new(config: Config, coordinator: Arc<RefreshCoordinator>) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        if config.ui.mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut view_rx = coordinator.subscribe();
        let store = Store::new(action_tx.clone(), view_rx.borrow_and_update().clone());
        let event_handler = EventHandler::new(config.keybindings.clone(), config.ui.mouse_support);
        let ui = Ui::new(&config);

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            coordinator,
            view_rx,
            scheduler: None,
            ui,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // The scheduler's first tick performs the initial refresh.
        self.scheduler = Some(
            Scheduler::new(self.coordinator.clone(), self.config.ui.refresh_interval()).spawn(),
        );
        let mut redraw = tokio::time::interval(self.config.ui.tick_rate());

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.sync(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                self.ui.render(frame, &self.store);
            })?;

            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                // Pick up new coordinator views
                Ok(()) = self.view_rx.changed() => {
                    let view = self.view_rx.borrow_and_update().clone();
                    self.store.reduce(Action::ViewUpdated(view));
                }

                _ = redraw.tick() => {
                    self.store.reduce(Action::Tick);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        tracing::info!("Shutting down");
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Refresh => {
                let coordinator = self.coordinator.clone();
                self.spawn_operation(async move {
                    match coordinator.refresh().await {
                        Ok(()) => Notification::success("Quotes refreshed"),
                        Err(e) => Notification::error(format!("Refresh failed: {}", e)),
                    }
                });
            }
            Action::AddSymbols(text) => {
                let symbols = parse_symbols(&text);
                let coordinator = self.coordinator.clone();
                self.spawn_operation(async move {
                    let result = coordinator.add_symbols(symbols.as_slice()).await;
                    let notification = match &result {
                        Ok(added) if added.is_empty() => {
                            Notification::info("Those symbols are already tracked")
                        }
                        Ok(added) => Notification::success(format!("Added {}", join(added))),
                        Err(e) => Notification::error(format!("Watchlist updated, refresh failed: {}", e)),
                    };
                    persist_warning(&coordinator).unwrap_or(notification)
                });
            }
            Action::RemoveSymbols(text) => {
                let symbols = parse_symbols(&text);
                let coordinator = self.coordinator.clone();
                self.spawn_operation(async move {
                    let result = coordinator.remove_symbols(symbols.as_slice()).await;
                    let notification = match &result {
                        Ok(removed) if removed.is_empty() => {
                            Notification::info("Nothing to remove")
                        }
                        Ok(removed) => Notification::success(format!("Removed {}", join(removed))),
                        Err(e) => Notification::error(format!("Watchlist updated, refresh failed: {}", e)),
                    };
                    persist_warning(&coordinator).unwrap_or(notification)
                });
            }
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }

    /// Run a coordinator call off the event loop and report back when done.
    fn spawn_operation<F>(&mut self, operation: F)
    where
        F: Future<Output = Notification> + Send + 'static,
    {
        self.store.reduce(Action::OperationStarted);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let notification = operation.await;
            if action_tx.send(Action::OperationFinished(notification)).is_err() {
                tracing::debug!("App closed before operation finished");
            }
        });
    }
}

/// A warning notification if the last save failed.
fn persist_warning(coordinator: &RefreshCoordinator) -> Option<Notification> {
    coordinator
        .view()
        .persist_warning
        .as_ref()
        .map(|e| Notification::warning(format!("Watchlist not saved: {}", e)))
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.abort();
        }

        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}
