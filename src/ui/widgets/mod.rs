//! TUI widgets.

mod help;
mod notifications;
mod prompt;
mod quote_table;
mod status_bar;

pub use help::HelpPanel;
pub use notifications::render_notification;
pub use prompt::PromptLine;
pub use quote_table::{HEADERS, QuoteRow, QuoteTable};
pub use status_bar::StatusBar;
