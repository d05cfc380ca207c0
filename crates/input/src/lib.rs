//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::ViewerAction`]s. Kept
//! separate from the display layer so bindings can be tested without a
//! terminal.

pub mod map;

pub use tui_wireframe_types as types;

pub use map::{handle_key_event, should_quit};
