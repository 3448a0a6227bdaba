#![forbid(unsafe_code)]

//! Tour options.
//!
//! [`Options`] is an immutable value. Each setter consumes and returns it, and
//! `Tour::configure` swaps the whole value in; nothing is merged field by
//! field behind the caller's back.
//!
//! # Loading
//!
//! ```json
//! { "highlightPadding": 8, "scrollDuration": 400, "rememberProgress": true }
//! ```
//!
//! ```rust,ignore
//! let options = Options::from_json_str(json)?;
//! let options = Options::from_toml_file("walkthrough.toml")?;
//! ```
//!
//! Keys are camelCase as in browser tour configurations, durations
//! are milliseconds, and any missing key takes its default.
//! `cookieName`/`cookieExpiry` are accepted as aliases for the storage key and
//! expiry.

#[cfg(feature = "config-files")]
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wt_core::keybinding::KeyConfig;

#[cfg(feature = "config-files")]
use crate::error::ConfigError;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything tunable about a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    // Visual
    /// Breathing room around the target, in pixels.
    pub highlight_padding: f64,
    /// Overlay fade-out before it is hidden.
    #[serde(with = "millis")]
    pub animation_duration: Duration,
    /// Length of the bring-into-view scroll.
    #[serde(with = "millis")]
    pub scroll_duration: Duration,
    /// Space left above the target after scrolling.
    pub scroll_offset: f64,

    // Popup
    /// Gap between highlight and popup.
    pub popup_offset: f64,
    /// Class name hosts put on the popup container.
    pub popup_class: String,

    // Default layout
    pub show_progress: bool,
    pub show_buttons: bool,
    pub show_skip: bool,
    pub skip_text: String,
    pub prev_text: String,
    pub next_text: String,
    pub finish_text: String,

    // Keyboard
    pub keyboard: bool,
    pub escape_to_exit: bool,
    pub arrow_navigation: bool,

    // Storage
    #[serde(alias = "cookieName")]
    pub storage_key: String,
    #[serde(alias = "cookieExpiry")]
    pub storage_expiry_days: u32,
    pub remember_progress: bool,

    // Behaviour
    pub close_on_overlay: bool,
    pub auto_start: bool,
    #[serde(with = "millis")]
    pub start_delay: Duration,

    // Attribute-declared steps
    pub attribute_prefix: String,
    pub step_attribute: String,
    pub title_attribute: String,
    pub text_attribute: String,
    pub position_attribute: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            highlight_padding: 10.0,
            animation_duration: Duration::from_millis(300),
            scroll_duration: Duration::from_millis(500),
            scroll_offset: 100.0,
            popup_offset: 15.0,
            popup_class: "wt-popup".into(),
            show_progress: true,
            show_buttons: true,
            show_skip: true,
            skip_text: "Skip".into(),
            prev_text: "← Previous".into(),
            next_text: "Next →".into(),
            finish_text: "Finish".into(),
            keyboard: true,
            escape_to_exit: true,
            arrow_navigation: true,
            storage_key: "walkthrough_progress".into(),
            storage_expiry_days: 30,
            remember_progress: false,
            close_on_overlay: true,
            auto_start: false,
            start_delay: Duration::ZERO,
            attribute_prefix: "wt".into(),
            step_attribute: "step".into(),
            title_attribute: "title".into(),
            text_attribute: "text".into(),
            position_attribute: "position".into(),
        }
    }
}

impl Options {
    /// Set highlight padding.
    #[must_use]
    pub fn highlight_padding(mut self, padding: f64) -> Self {
        self.highlight_padding = padding;
        self
    }

    /// Set overlay fade-out duration.
    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set scroll animation duration.
    #[must_use]
    pub fn scroll_duration(mut self, duration: Duration) -> Self {
        self.scroll_duration = duration;
        self
    }

    /// Set the space left above a target after scrolling.
    #[must_use]
    pub fn scroll_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Set the popup gap.
    #[must_use]
    pub fn popup_offset(mut self, offset: f64) -> Self {
        self.popup_offset = offset;
        self
    }

    /// Toggle the progress header and bar.
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Toggle the button footer.
    #[must_use]
    pub fn show_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    /// Toggle the skip button.
    #[must_use]
    pub fn show_skip(mut self, show: bool) -> Self {
        self.show_skip = show;
        self
    }

    /// Toggle keyboard navigation entirely.
    #[must_use]
    pub fn keyboard(mut self, enabled: bool) -> Self {
        self.keyboard = enabled;
        self
    }

    /// Toggle Escape-to-exit.
    #[must_use]
    pub fn escape_to_exit(mut self, enabled: bool) -> Self {
        self.escape_to_exit = enabled;
        self
    }

    /// Toggle arrow/Enter navigation.
    #[must_use]
    pub fn arrow_navigation(mut self, enabled: bool) -> Self {
        self.arrow_navigation = enabled;
        self
    }

    /// Set the progress storage key.
    #[must_use]
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the progress expiry in days.
    #[must_use]
    pub fn storage_expiry_days(mut self, days: u32) -> Self {
        self.storage_expiry_days = days;
        self
    }

    /// Toggle saving and resuming progress.
    #[must_use]
    pub fn remember_progress(mut self, remember: bool) -> Self {
        self.remember_progress = remember;
        self
    }

    /// Toggle ending the tour when the overlay is clicked.
    #[must_use]
    pub fn close_on_overlay(mut self, close: bool) -> Self {
        self.close_on_overlay = close;
        self
    }

    /// Start automatically from attribute-declared steps.
    #[must_use]
    pub fn auto_start(mut self, auto: bool) -> Self {
        self.auto_start = auto;
        self
    }

    /// Delay before an automatic start.
    #[must_use]
    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Set the attribute prefix (`data-{prefix}-step`).
    #[must_use]
    pub fn attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    /// Progress time-to-live.
    #[must_use]
    pub fn storage_ttl(&self) -> Duration {
        DAY.saturating_mul(self.storage_expiry_days)
    }

    /// Keyboard gates.
    #[must_use]
    pub fn key_config(&self) -> KeyConfig {
        KeyConfig {
            escape_to_exit: self.escape_to_exit,
            arrow_navigation: self.arrow_navigation,
        }
    }

    /// Full attribute name for one of the step attributes.
    #[must_use]
    pub fn data_attribute(&self, name: &str) -> String {
        format!("data-{}-{}", self.attribute_prefix, name)
    }

    /// Check values are usable. An empty list means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("highlightPadding", self.highlight_padding),
            ("scrollOffset", self.scroll_offset),
            ("popupOffset", self.popup_offset),
        ] {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            }
        }
        if self.storage_key.trim().is_empty() {
            errors.push("storageKey must not be empty".into());
        }
        if self.attribute_prefix.trim().is_empty() {
            errors.push("attributePrefix must not be empty".into());
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        options.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        options.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config-files")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Durations as integer milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
