//! Key mapping from terminal events to viewer actions.

use crate::types::ViewerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to viewer actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ViewerAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Orbit
        KeyCode::Up => Some(ViewerAction::PitchUp),
        KeyCode::Down => Some(ViewerAction::PitchDown),
        KeyCode::Right => Some(ViewerAction::YawRight),
        KeyCode::Left => Some(ViewerAction::YawLeft),

        // Lens
        KeyCode::Char('=') | KeyCode::Char('+') => Some(ViewerAction::ZoomIn),
        KeyCode::Char('-') => Some(ViewerAction::ZoomOut),
        KeyCode::Char('[') => Some(ViewerAction::FovNarrow),
        KeyCode::Char(']') => Some(ViewerAction::FovWiden),
        KeyCode::Char('f') => Some(ViewerAction::FlipWinding),

        // Scene
        KeyCode::Char(' ') => Some(ViewerAction::AddInstance),

        // Toggles
        KeyCode::Char('c') => Some(ViewerAction::ToggleColor),
        KeyCode::Char('b') => Some(ViewerAction::ToggleBraille),
        KeyCode::Char('z') => Some(ViewerAction::ToggleZBuffer),
        KeyCode::Char('g') => Some(ViewerAction::ToggleFog),

        _ => None,
    }
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
