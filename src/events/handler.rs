//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::{Error, Result};
use crate::state::{Action, InputMode, PromptKind, Store};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Translate mouse wheel into scrolling.
    mouse_support: bool,
    /// Input mode as of the last sync with the store.
    input_mode: InputMode,
    /// Whether the help overlay was open at the last sync.
    show_help: bool,
    /// Terminal event stream, opened on first use.
    events: Option<EventStream>,
}

impl EventHandler {
    /// Create a new event handler with the given bindings.
    pub fn new(keybindings: KeyBindings, mouse_support: bool) -> Self {
        Self {
            keybindings,
            mouse_support,
            input_mode: InputMode::Normal,
            show_help: false,
            events: None,
        }
    }

    /// Update the state the key mapping depends on.
    pub fn sync(&mut self, store: &Store) {
        self.input_mode = store.app.input_mode;
        self.show_help = store.app.show_help;
    }

    /// Wait for the next terminal event and translate it.
    ///
    /// Returns `Ok(None)` for events that map to no action, such as a
    /// resize; the caller redraws after every event anyway.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        let events = self.events.get_or_insert_with(EventStream::new);
        match events.next().await {
            Some(Ok(event)) => Ok(self.handle_event(event)),
            Some(Err(e)) => Err(e.into()),
            None => Err(Error::terminal("Terminal input stream closed")),
        }
    }

    /// Translate a single terminal event.
    pub fn handle_event(&self, event: CrosstermEvent) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
            CrosstermEvent::Paste(text) if self.input_mode != InputMode::Normal => {
                // Line breaks would submit half a paste; fold them into spaces.
                (!text.is_empty()).then(|| Action::PasteInput(text.replace(['\r', '\n'], " ")))
            }
            _ => None,
        }
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Prompt(_) => self.handle_prompt_mode(key),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if !self.mouse_support {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);

        // Esc closes the help overlay before it quits.
        if self.show_help && (key.code == KeyCode::Esc || input.matches(&self.keybindings.help)) {
            return Some(Action::ToggleHelp);
        }

        if input.matches(&self.keybindings.quit)
            || input.matches(&self.keybindings.quit_alt)
            || input.matches("Ctrl+c")
        {
            return Some(Action::Quit);
        }

        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }

        if input.matches(&self.keybindings.refresh) {
            return Some(Action::Refresh);
        }

        if input.matches(&self.keybindings.add) {
            return Some(Action::OpenPrompt(PromptKind::Add));
        }
        if input.matches(&self.keybindings.remove) {
            return Some(Action::OpenPrompt(PromptKind::Remove));
        }

        // Navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        match key.code {
            KeyCode::Home => Some(Action::GoToTop),
            KeyCode::End => Some(Action::GoToBottom),
            _ => None,
        }
    }

    fn handle_prompt_mode(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);

        if input.matches("Ctrl+c") {
            return Some(Action::PromptCancel);
        }

        match key.code {
            KeyCode::Esc => Some(Action::PromptCancel),
            KeyCode::Enter => Some(Action::PromptSubmit),
            KeyCode::Backspace => Some(Action::PromptBackspace),
            KeyCode::Char(c) if !input.ctrl() => Some(Action::PromptInput(c)),
            _ => None,
        }
    }
}
