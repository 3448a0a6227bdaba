#![forbid(unsafe_code)]

//! Key to navigation mapping.
//!
//! | Key | Action | Gate |
//! |-----|--------|------|
//! | Escape | [`NavAction::Exit`] | `escape_to_exit` |
//! | Right, Enter | [`NavAction::Next`] | `arrow_navigation` |
//! | Left | [`NavAction::Prev`] | `arrow_navigation` |
//!
//! Releases never map to an action. Escape is checked first, so with
//! `escape_to_exit` disabled Escape falls through to the arrow table (where it
//! has no entry).

use crate::event::{KeyCode, KeyEvent};

/// Navigation intent produced from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// End the tour early.
    Exit,
    /// Advance one step.
    Next,
    /// Go back one step.
    Prev,
}

/// Which key groups are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyConfig {
    /// Escape ends the tour.
    pub escape_to_exit: bool,
    /// Arrows and Enter navigate.
    pub arrow_navigation: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            escape_to_exit: true,
            arrow_navigation: true,
        }
    }
}

/// Map a key event to a navigation action.
#[must_use]
pub fn map_key(key: &KeyEvent, config: KeyConfig) -> Option<NavAction> {
    if !key.is_press() {
        return None;
    }
    if config.escape_to_exit && key.code == KeyCode::Escape {
        return Some(NavAction::Exit);
    }
    if !config.arrow_navigation {
        return None;
    }
    match key.code {
        KeyCode::Right | KeyCode::Enter => Some(NavAction::Next),
        KeyCode::Left => Some(NavAction::Prev),
        _ => None,
    }
}
