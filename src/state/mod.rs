//! State management for tickertape.
//!
//! UI state follows a unidirectional data flow: input and background tasks
//! produce [`Action`]s, and [`Store::reduce`] is the only place that applies
//! them. Quote data itself is owned by the refresh coordinator and arrives
//! here as read-only [`WatchlistView`]s.

mod app_state;
mod quote_state;

pub use app_state::{AppState, InputMode, PromptKind};
pub use quote_state::{Quote, Snapshot, Trend};

use crate::coordinator::WatchlistView;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Coordinator operations, run by the app on background tasks
    Refresh,
    AddSymbols(String),
    RemoveSymbols(String),
    OperationStarted,
    OperationFinished(Notification),
    ViewUpdated(Arc<WatchlistView>),

    // Prompt editing
    OpenPrompt(PromptKind),
    PromptInput(char),
    PasteInput(String),
    PromptBackspace,
    PromptCancel,
    PromptSubmit,

    // UI actions
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The UI state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Latest view published by the refresh coordinator.
    pub view: Arc<WatchlistView>,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, view: Arc<WatchlistView>) -> Self {
        Self {
            app: AppState::new(),
            view,
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // The app runs these against the coordinator
            Action::Refresh | Action::AddSymbols(_) | Action::RemoveSymbols(_) => {}
            Action::OperationStarted => self.app.pending_operations += 1,
            Action::OperationFinished(notification) => {
                self.app.pending_operations = self.app.pending_operations.saturating_sub(1);
                self.notify(notification);
            }
            Action::ViewUpdated(view) => {
                self.view = view;
                self.clamp_selection();
            }

            // Prompt editing
            Action::OpenPrompt(kind) => {
                self.app.clear_input();
                self.app.show_help = false;
                self.app.input_mode = InputMode::Prompt(kind);
            }
            Action::PromptInput(c) => {
                if self.app.is_editing() {
                    self.app.push_char(c);
                }
            }
            Action::PasteInput(text) => {
                if self.app.is_editing() {
                    text.chars().for_each(|c| self.app.push_char(c));
                }
            }
            Action::PromptBackspace => self.app.pop_char(),
            Action::PromptCancel => {
                self.app.input_mode = InputMode::Normal;
                self.app.clear_input();
            }
            Action::PromptSubmit => self.submit_prompt(),

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::GoToTop => self.select_clamped(0),
            Action::GoToBottom => self.select_clamped(usize::MAX),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => self.notify(notification),
            Action::DismissNotification => {
                self.app.notification = None;
                self.app.notification_shown_at = None;
            }
            Action::Tick => self.expire_notification(),

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Number of quote rows on screen.
    pub fn row_count(&self) -> usize {
        self.view.snapshot.len()
    }

    fn notify(&mut self, notification: Notification) {
        self.app.notification = Some(notification);
        self.app.notification_shown_at = Some(Instant::now());
    }

    fn expire_notification(&mut self) {
        let expired = match (&self.app.notification, self.app.notification_shown_at) {
            (Some(n), Some(shown_at)) => shown_at.elapsed() >= Duration::from_secs(n.duration_secs),
            _ => false,
        };
        if expired {
            self.reduce(Action::DismissNotification);
        }
    }

    fn submit_prompt(&mut self) {
        let Some((kind, text)) = self.app.take_prompt() else {
            return;
        };
        if text.trim().is_empty() {
            return;
        }

        let action = match kind {
            PromptKind::Add => Action::AddSymbols(text),
            PromptKind::Remove => Action::RemoveSymbols(text),
        };
        if let Err(e) = self.dispatch(action) {
            tracing::warn!("Dropped prompt input: {}", e);
        }
    }

    fn scroll(&mut self, delta: i64) {
        let current = self.app.selected.unwrap_or(0) as i64;
        let index = (current + delta).max(0) as usize;
        self.select_clamped(index);
    }

    fn select_clamped(&mut self, index: usize) {
        let rows = self.row_count();
        self.app.selected = if rows == 0 {
            None
        } else {
            Some(index.min(rows - 1))
        };
    }

    fn clamp_selection(&mut self) {
        if let Some(index) = self.app.selected {
            self.select_clamped(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::Watchlist;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn view_with(names: &[&str]) -> Arc<WatchlistView> {
        let watchlist = Watchlist::from_names(names.iter().copied());
        let quotes = watchlist.symbols().iter().cloned().map(Quote::new).collect();
        Arc::new(WatchlistView {
            symbols: watchlist.symbols().to_vec(),
            snapshot: Snapshot::from_quotes(&watchlist, quotes, Utc::now()),
            ..WatchlistView::default()
        })
    }

    fn store() -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Store::new(tx, view_with(&["ORCL", "AAPL", "IBM"])), rx)
    }

    #[test]
    fn test_scroll_stays_in_bounds() {
        let (mut store, _rx) = store();

        store.reduce(Action::ScrollUp);
        assert_eq!(store.app.selected, Some(0));

        for _ in 0..5 {
            store.reduce(Action::ScrollDown);
        }
        assert_eq!(store.app.selected, Some(2));

        store.reduce(Action::GoToTop);
        assert_eq!(store.app.selected, Some(0));
        store.reduce(Action::GoToBottom);
        assert_eq!(store.app.selected, Some(2));
    }

    #[test]
    fn test_view_update_clamps_selection() {
        let (mut store, _rx) = store();
        store.reduce(Action::GoToBottom);

        store.reduce(Action::ViewUpdated(view_with(&["ORCL"])));
        assert_eq!(store.app.selected, Some(0));

        store.reduce(Action::ViewUpdated(view_with(&[])));
        assert_eq!(store.app.selected, None);
        assert!(store.view.symbols.is_empty());
    }

    #[test]
    fn test_prompt_submit_dispatches_operation() {
        let (mut store, mut rx) = store();

        store.reduce(Action::OpenPrompt(PromptKind::Add));
        for c in "tsla".chars() {
            store.reduce(Action::PromptInput(c));
        }
        store.reduce(Action::PasteInput(" msft".to_string()));
        store.reduce(Action::PromptSubmit);

        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(matches!(rx.try_recv(), Ok(Action::AddSymbols(text)) if text == "tsla msft"));

        store.reduce(Action::OpenPrompt(PromptKind::Remove));
        store.reduce(Action::PromptInput('x'));
        store.reduce(Action::PromptSubmit);
        assert!(matches!(rx.try_recv(), Ok(Action::RemoveSymbols(text)) if text == "x"));
    }

    #[test]
    fn test_blank_or_cancelled_prompt_does_nothing() {
        let (mut store, mut rx) = store();

        store.reduce(Action::OpenPrompt(PromptKind::Add));
        store.reduce(Action::PromptInput(' '));
        store.reduce(Action::PromptSubmit);

        store.reduce(Action::OpenPrompt(PromptKind::Remove));
        store.reduce(Action::PromptInput('a'));
        store.reduce(Action::PromptCancel);

        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.app.input_buffer.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_prompt_input_ignored_in_normal_mode() {
        let (mut store, _rx) = store();
        store.reduce(Action::PromptInput('a'));
        assert!(store.app.input_buffer.is_empty());
    }

    #[test]
    fn test_operations_track_busy_state() {
        let (mut store, _rx) = store();

        store.reduce(Action::OperationStarted);
        store.reduce(Action::OperationStarted);
        assert!(store.app.is_busy());

        store.reduce(Action::OperationFinished(Notification::success("Refreshed")));
        assert!(store.app.is_busy());
        store.reduce(Action::OperationFinished(Notification::error("Failed")));
        assert!(!store.app.is_busy());

        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.message, "Failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_on_tick() {
        let (mut store, _rx) = store();
        store.reduce(Action::ShowNotification(Notification::info("Hello")));

        tokio::time::advance(Duration::from_secs(2)).await;
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_none());
    }

    #[test]
    fn test_quit() {
        let (mut store, _rx) = store();
        store.reduce(Action::Quit);
        assert!(store.app.should_quit);
    }
}
