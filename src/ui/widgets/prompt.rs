//! Bottom line: the open prompt, or key hints.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::KeyBindings;
use crate::state::{InputMode, Store};
use crate::ui::Theme;

/// Prompt line widget.
pub struct PromptLine;

impl PromptLine {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, keys: &KeyBindings, theme: &Theme) {
        let InputMode::Prompt(kind) = store.app.input_mode else {
            Self::render_hints(frame, area, keys);
            return;
        };

        let label = kind.label();
        let line = Line::from(vec![
            Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(store.app.input_buffer.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        let typed = store.app.input_buffer[..store.app.cursor_position].chars().count();
        let x = area.x as usize + label.len() + typed;
        let max_x = area.right().saturating_sub(1) as usize;
        frame.set_cursor_position(Position::new(x.min(max_x) as u16, area.y));
    }

    fn render_hints(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let key = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::new();
        for (binding, description) in [
            (&keys.refresh, "refresh"),
            (&keys.add, "add"),
            (&keys.remove, "remove"),
            (&keys.help, "help"),
            (&keys.quit, "quit"),
        ] {
            spans.push(Span::styled(format!(" {}", binding), key));
            spans.push(Span::styled(format!(" {} ", description), text));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
