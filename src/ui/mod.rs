//! UI rendering using ratatui.
//!
//! Everything here draws from a [`Store`] and never touches the refresh
//! coordinator directly.

pub mod format;
mod layout;
mod theme;
mod widgets;

pub use layout::Layout;
pub use theme::Theme;
pub use widgets::{HEADERS, HelpPanel, PromptLine, QuoteRow, QuoteTable, StatusBar};

use crate::config::{Config, KeyBindings};
use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui {
    theme: Theme,
    keybindings: KeyBindings,
    show_status_bar: bool,
}

impl Ui {
    pub fn new(config: &Config) -> Self {
        Self {
            theme: Theme::from_config(&config.theme),
            keybindings: config.keybindings.clone(),
            show_status_bar: config.ui.show_status_bar,
        }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area(), self.show_status_bar);

        if self.show_status_bar {
            StatusBar::render(frame, layout.status_area, store, &self.theme);
        }

        QuoteTable::render(frame, layout.main_area, store, &self.theme);
        PromptLine::render(frame, layout.prompt_area, store, &self.keybindings, &self.theme);

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &self.keybindings, &self.theme);
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(
                frame,
                layout.notification_area,
                notification,
                &self.theme,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::WatchlistView;
    use crate::state::{Action, Notification};
    use crate::watchlist::Watchlist;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn screen(ui: &Ui, store: &Store) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| ui.render(frame, store)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn store() -> Store {
        let view = WatchlistView {
            symbols: Watchlist::with_defaults().symbols().to_vec(),
            ..WatchlistView::default()
        };
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, Arc::new(view))
    }

    #[test]
    fn test_full_screen() {
        let ui = Ui::new(&Config::default());
        let mut store = store();
        store.reduce(Action::ShowNotification(Notification::success("Added TSLA")));

        let lines = screen(&ui, &store);
        assert!(lines[0].contains("tickertape"));
        assert!(lines.iter().any(|l| l.contains("Watchlist (3)")));
        assert!(lines.iter().any(|l| l.contains("Added TSLA")));
        assert!(lines[19].contains("refresh"));
    }

    #[test]
    fn test_status_bar_can_be_hidden() {
        let mut config = Config::default();
        config.ui.show_status_bar = false;
        let lines = screen(&Ui::new(&config), &store());

        assert!(!lines.iter().any(|l| l.contains("tickertape")));
        assert!(lines[0].contains("Watchlist (3)"));
    }

    #[test]
    fn test_help_overlay() {
        let ui = Ui::new(&Config::default());
        let mut store = store();
        store.reduce(Action::ToggleHelp);

        let lines = screen(&ui, &store);
        assert!(lines.iter().any(|l| l.contains("Remove symbols")));
    }
}
