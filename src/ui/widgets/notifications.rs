//! Notification rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{Notification, NotificationLevel};
use crate::ui::Theme;

/// Border colour and icon for a level.
fn decoration(level: NotificationLevel, theme: &Theme) -> (Color, &'static str) {
    match level {
        NotificationLevel::Info => (theme.accent, "ℹ"),
        NotificationLevel::Success => (Color::Green, "✓"),
        NotificationLevel::Warning => (Color::Yellow, "⚠"),
        NotificationLevel::Error => (Color::Red, "✗"),
    }
}

/// Render a notification popup.
pub fn render_notification(
    frame: &mut Frame,
    area: Rect,
    notification: &Notification,
    theme: &Theme,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    frame.render_widget(Clear, area);

    let (border_color, icon) = decoration(notification.level, theme);

    let content = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(border_color)),
        Span::raw(notification.message.as_str()),
    ]);

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_error_notification() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| {
                render_notification(
                    frame,
                    frame.area(),
                    &Notification::error("Refresh failed"),
                    &Theme::default(),
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let middle: String = (0..40).map(|x| buffer[(x, 1)].symbol()).collect();
        assert!(middle.contains("Refresh failed"));
        assert_eq!(buffer[(0, 0)].fg, Color::Red);
    }
}
