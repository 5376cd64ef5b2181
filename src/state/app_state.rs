//! Application-level state.

use super::Notification;
use tokio::time::Instant;

/// Which one-line prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Add,
    Remove,
}

impl PromptKind {
    /// Label drawn in front of the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add: ",
            Self::Remove => "Remove: ",
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Prompt(PromptKind),
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// When the current notification appeared.
    pub notification_shown_at: Option<Instant>,
    /// User-triggered operations still in flight.
    pub pending_operations: usize,
    /// Selected quote row.
    pub selected: Option<usize>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current prompt input.
    pub input_buffer: String,
    /// Cursor position in input buffer, in bytes.
    pub cursor_position: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a prompt is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.input_mode, InputMode::Prompt(_))
    }

    /// Whether a user-triggered operation is running.
    pub fn is_busy(&self) -> bool {
        self.pending_operations > 0
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character to the input buffer.
    pub fn push_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if let Some(c) = self.input_buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.input_buffer.remove(self.cursor_position);
        }
    }

    /// Close the prompt, returning what was typed into it.
    pub fn take_prompt(&mut self) -> Option<(PromptKind, String)> {
        let InputMode::Prompt(kind) = self.input_mode else {
            return None;
        };
        self.input_mode = InputMode::Normal;
        let text = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        Some((kind, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_buffer() {
        let mut state = AppState::new();
        state.input_mode = InputMode::Prompt(PromptKind::Add);
        for c in "tslaé".chars() {
            state.push_char(c);
        }
        state.pop_char();
        state.pop_char();
        assert_eq!(state.input_buffer, "tsl");
        assert_eq!(state.cursor_position, 3);

        state.clear_input();
        state.pop_char();
        assert_eq!(state.input_buffer, "");
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_take_prompt() {
        let mut state = AppState::new();
        assert_eq!(state.take_prompt(), None);

        state.input_mode = InputMode::Prompt(PromptKind::Remove);
        state.push_char('x');
        assert!(state.is_editing());

        assert_eq!(state.take_prompt(), Some((PromptKind::Remove, "x".to_string())));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.input_buffer.is_empty());
    }
}
