//! Status bar widget.

use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;
use crate::ui::Theme;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let view = &store.view;

        let mut spans = vec![
            Span::styled(
                " tickertape ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(match view.symbols.len() {
                1 => "1 symbol".to_string(),
                n => format!("{} symbols", n),
            }),
            Span::raw(" | "),
        ];

        spans.push(match view.snapshot.fetched_at {
            Some(at) => Span::raw(format!(
                "updated {}",
                at.with_timezone(&Local).format("%H:%M:%S")
            )),
            None => Span::styled("no data yet", Style::default().fg(Color::Gray)),
        });

        if store.app.is_busy() {
            spans.push(Span::styled(
                " Working... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        if let Some(error) = &view.last_error {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ));
        }

        if view.persist_warning.is_some() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "⚠ watchlist not saved",
                Style::default().fg(Color::Yellow),
            ));
        }

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        // Pad so the help hint sits flush right
        let left_width = Line::from(spans.clone()).width();
        let padding = (area.width as usize).saturating_sub(left_width + help_hint.width());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
