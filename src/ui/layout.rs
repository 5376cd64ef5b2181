//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top). Zero height when the bar is hidden.
    pub status_area: Rect,
    /// Quote table.
    pub main_area: Rect,
    /// Prompt or key hints (bottom).
    pub prompt_area: Rect,
    /// Notification popup, overlaid on the bottom of the table.
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_status_bar: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::from(show_status_bar)),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        let main_area = chunks[1];

        let height = 3.min(main_area.height);
        let notification_area = Rect {
            x: main_area.x + main_area.width / 4,
            y: (main_area.y + main_area.height).saturating_sub(height + 1).max(main_area.y),
            width: main_area.width / 2,
            height,
        };

        Self {
            status_area: chunks[0],
            main_area,
            prompt_area: chunks[2],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_areas() {
        let layout = Layout::new(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.status_area, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.main_area, Rect::new(0, 1, 80, 22));
        assert_eq!(layout.prompt_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.notification_area, Rect::new(20, 19, 40, 3));
    }

    #[test]
    fn test_hidden_status_bar_and_tiny_terminal() {
        let layout = Layout::new(Rect::new(0, 0, 20, 2), false);
        assert_eq!(layout.status_area.height, 0);
        assert_eq!(layout.main_area, Rect::new(0, 0, 20, 1));
        assert!(layout.notification_area.height <= layout.main_area.height);
    }

    #[test]
    fn test_centered_rect() {
        let popup = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(popup, Rect::new(25, 10, 50, 20));
    }
}
