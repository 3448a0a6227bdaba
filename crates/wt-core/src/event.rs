#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The embedding environment translates its native input (DOM events,
//! terminal input, test scripts) into [`Event`] values and pushes them into
//! the tour. The engine never listens to the platform directly.

use std::fmt;
use std::str::FromStr;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Viewport was resized.
    Resize {
        /// New viewport width in pixels.
        width: f64,
        /// New viewport height in pixels.
        height: f64,
    },

    /// The page (or any scroll container) scrolled.
    Scroll,

    /// The dimmed overlay itself was clicked (not the popup or highlight).
    OverlayClick,

    /// A popup control carrying an action tag was activated.
    Action(PopupAction),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
        }
    }

    /// Set the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is a press or auto-repeat.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes the tour reacts to, plus a catch-all for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Tab key.
    Tab,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` name.
    ///
    /// Returns `None` for keys the tour has no use for.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let code = match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "Tab" => Self::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default).
    #[default]
    Press,
    /// Key is being held (auto-repeat).
    Repeat,
    /// Key was released.
    Release,
}

// ---------------------------------------------------------------------------
// Popup actions
// ---------------------------------------------------------------------------

/// The four controls a popup can expose.
///
/// Renderers tag controls with `data-wt-action="<tag>"`; the host reports
/// activations as [`Event::Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupAction {
    /// Leave the tour early.
    Skip,
    /// Previous step.
    Prev,
    /// Next step.
    Next,
    /// Complete the tour.
    Finish,
}

impl PopupAction {
    /// All actions, in footer order.
    pub const ALL: [PopupAction; 4] = [Self::Skip, Self::Prev, Self::Next, Self::Finish];

    /// Attribute used to tag controls in rendered markup.
    pub const ATTRIBUTE: &'static str = "data-wt-action";

    /// Tag value for this action.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Finish => "finish",
        }
    }
}

impl fmt::Display for PopupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error for an unknown action tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown popup action: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for PopupAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "skip" => Ok(Self::Skip),
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            "finish" => Ok(Self::Finish),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_defaults_to_press() {
        let key = KeyEvent::new(KeyCode::Enter);
        assert_eq!(key.kind, KeyEventKind::Press);
        assert!(key.is_press());
        assert!(!key.with_kind(KeyEventKind::Release).is_press());
        assert!(key.with_kind(KeyEventKind::Repeat).is_press());
    }

    #[test]
    fn dom_key_names() {
        assert_eq!(KeyCode::from_dom_key("ArrowRight"), Some(KeyCode::Right));
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_dom_key("Escape"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_dom_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_dom_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(KeyCode::from_dom_key("PageDown"), None);
    }

    #[test]
    fn action_tags_parse_back() {
        for action in PopupAction::ALL {
            assert_eq!(action.tag().parse::<PopupAction>(), Ok(action));
        }
        assert!("close".parse::<PopupAction>().is_err());
    }
}
