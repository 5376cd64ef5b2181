//! Event handling for tickertape.
//!
//! Terminal input arrives through crossterm's async event stream and is
//! translated into [`Action`](crate::state::Action)s according to the
//! configured key bindings and the current input mode.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
