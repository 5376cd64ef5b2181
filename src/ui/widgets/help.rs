//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;
use crate::ui::Theme;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Binding and description pairs, grouped by section.
    fn sections(keys: &KeyBindings) -> Vec<(&'static str, Vec<(String, &'static str)>)> {
        vec![
            (
                "Watchlist",
                vec![
                    (keys.refresh.clone(), "Refresh quotes now"),
                    (keys.add.clone(), "Add symbols"),
                    (keys.remove.clone(), "Remove symbols"),
                ],
            ),
            (
                "Navigation",
                vec![
                    (format!("{}/↓", keys.down), "Move down"),
                    (format!("{}/↑", keys.up), "Move up"),
                    ("Home/End".to_string(), "First/last row"),
                ],
            ),
            (
                "Prompt",
                vec![
                    ("Enter".to_string(), "Submit symbols"),
                    ("Esc".to_string(), "Cancel"),
                ],
            ),
            (
                "General",
                vec![
                    (keys.help.clone(), "Toggle help"),
                    (format!("{}/{}", keys.quit, keys.quit_alt), "Quit"),
                ],
            ),
        ]
    }

    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings, theme: &Theme) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = Vec::new();
        for (title, entries) in Self::sections(keys) {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for (binding, description) in entries {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {:<10}", binding), Style::default().fg(theme.accent)),
                    Span::raw(description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
