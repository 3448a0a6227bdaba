#![forbid(unsafe_code)]

//! Step definitions and tour configuration.
//!
//! A [`StepDef`] is what callers write: its target is either a selector or an
//! element handle they already hold. Configuration resolves every selector
//! through the backend and produces [`Step`]s, which the tour keeps until the
//! next configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use wt_backend::TargetResolver;
use wt_layout::Side;

use crate::error::ConfigError;
use crate::hooks::Callbacks;
use crate::options::Options;
use crate::render::PopupRenderer;

/// Per-step overrides for the default button labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonLabels {
    #[serde(rename = "skipText", skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,
    #[serde(rename = "prevText", skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(rename = "nextText", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(rename = "finishText", skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

impl ButtonLabels {
    /// Whether no label is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skip.is_none() && self.prev.is_none() && self.next.is_none() && self.finish.is_none()
    }
}

/// A resolved step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<T> {
    /// Element the step points at.
    pub target: T,
    pub title: Option<String>,
    /// Body text (opaque markup).
    pub text: Option<String>,
    /// Preferred popup side.
    pub side: Option<Side>,
    pub labels: ButtonLabels,
}

impl<T> Step<T> {
    /// A bare step for `target`.
    #[must_use]
    pub fn new(target: T) -> Self {
        Self {
            target,
            title: None,
            text: None,
            side: None,
            labels: ButtonLabels::default(),
        }
    }
}

/// Where a step points before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetRef<T> {
    /// Looked up through the backend at configuration time.
    Selector(String),
    /// Already an element.
    Handle(T),
}

impl<T> From<&str> for TargetRef<T> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl<T> From<String> for TargetRef<T> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// An unresolved step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDef<T> {
    pub target: TargetRef<T>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub side: Option<Side>,
    pub labels: ButtonLabels,
}

impl<T> StepDef<T> {
    /// Step pointing at a selector.
    #[must_use]
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::with_target(TargetRef::Selector(selector.into()))
    }

    /// Step pointing at an existing handle.
    #[must_use]
    pub fn handle(target: T) -> Self {
        Self::with_target(TargetRef::Handle(target))
    }

    fn with_target(target: TargetRef<T>) -> Self {
        Self {
            target,
            title: None,
            text: None,
            side: None,
            labels: ButtonLabels::default(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the preferred side.
    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Override button labels.
    #[must_use]
    pub fn labels(mut self, labels: ButtonLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Resolve the target through `resolver`.
    ///
    /// `index` is only used for the error message.
    pub fn resolve<R>(self, index: usize, resolver: &R) -> Result<Step<T>, ConfigError>
    where
        R: TargetResolver<Target = T> + ?Sized,
    {
        let target = match self.target {
            TargetRef::Handle(target) => target,
            TargetRef::Selector(selector) => match resolver.resolve(&selector) {
                Some(target) => target,
                None => return Err(ConfigError::TargetNotFound { index, selector }),
            },
        };
        Ok(Step {
            target,
            title: self.title,
            text: self.text,
            side: self.side,
            labels: self.labels,
        })
    }
}

/// Resolve a whole list, failing on the first missing selector.
pub fn resolve_all<R>(
    defs: Vec<StepDef<R::Target>>,
    resolver: &R,
) -> Result<Vec<Step<R::Target>>, ConfigError>
where
    R: TargetResolver + ?Sized,
{
    defs.into_iter()
        .enumerate()
        .map(|(index, def)| def.resolve(index, resolver))
        .collect()
}

/// Serialized form of a selector step.
///
/// ```json
/// { "element": "#save", "title": "Save", "text": "Stores your draft.", "position": "left" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Unknown or empty values leave the side unset, as attribute steps do.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_side::deserialize"
    )]
    pub position: Option<Side>,
    #[serde(flatten)]
    pub labels: ButtonLabels,
}

mod lenient_side {
    use serde::{Deserialize, Deserializer};
    use wt_layout::Side;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Side>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| s.parse().ok()))
    }
}

impl<T> From<StepRecord> for StepDef<T> {
    fn from(record: StepRecord) -> Self {
        Self {
            target: TargetRef::Selector(record.element),
            title: record.title,
            text: record.text,
            side: record.position,
            labels: record.labels,
        }
    }
}

/// A tour configuration. Every part that is set replaces the tour's current
/// one; unset parts are left alone.
pub struct TourConfig<T> {
    pub(crate) steps: Option<Vec<StepDef<T>>>,
    pub(crate) options: Option<Options>,
    pub(crate) callbacks: Option<Callbacks<T>>,
    pub(crate) renderer: Option<Box<dyn PopupRenderer<T>>>,
}

impl<T> Default for TourConfig<T> {
    fn default() -> Self {
        Self {
            steps: None,
            options: None,
            callbacks: None,
            renderer: None,
        }
    }
}

impl<T> fmt::Debug for TourConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourConfig")
            .field("steps", &self.steps.as_ref().map(Vec::len))
            .field("options", &self.options.is_some())
            .field("callbacks", &self.callbacks.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl<T> TourConfig<T> {
    /// Empty configuration (changes nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the step list.
    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = StepDef<T>>) -> Self {
        self.steps = Some(steps.into_iter().collect());
        self
    }

    /// Append one step to the replacement list.
    #[must_use]
    pub fn step(mut self, step: StepDef<T>) -> Self {
        self.steps.get_or_insert_with(Vec::new).push(step);
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Replace the callbacks.
    #[must_use]
    pub fn callbacks(mut self, callbacks: Callbacks<T>) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Replace the popup renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: impl PopupRenderer<T> + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Options carried by this configuration, if any.
    #[must_use]
    pub fn options_ref(&self) -> Option<&Options> {
        self.options.as_ref()
    }
}

/// A configuration document: a step list plus options.
///
/// ```toml
/// [options]
/// rememberProgress = true
///
/// [[steps]]
/// element = "#intro"
/// title = "Welcome"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourDocument {
    pub steps: Vec<StepRecord>,
    pub options: Option<Options>,
}

impl TourDocument {
    /// Parse a JSON document.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let doc: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        doc.validated()
    }

    /// Parse a TOML document.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let doc: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        doc.validated()
    }

    /// Read a document from disk, choosing the format by extension
    /// (`.toml`, anything else is JSON).
    #[cfg(feature = "config-files")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    #[cfg(feature = "config-files")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.options.as_ref().map(Options::validate).unwrap_or_default();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Turn into a configuration for any handle type.
    #[must_use]
    pub fn into_config<T>(self) -> TourConfig<T> {
        let mut config = TourConfig::new().steps(self.steps.into_iter().map(StepDef::from));
        config.options = self.options;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ids;

    impl TargetResolver for Ids {
        type Target = u32;

        fn resolve(&self, selector: &str) -> Option<u32> {
            selector.strip_prefix("#el")?.parse().ok()
        }
    }

    #[test]
    fn selector_resolves() {
        let step = StepDef::selector("#el4")
            .title("Four")
            .side(Side::Left)
            .resolve(0, &Ids)
            .expect("resolves");
        assert_eq!(step.target, 4);
        assert_eq!(step.title.as_deref(), Some("Four"));
        assert_eq!(step.side, Some(Side::Left));
    }

    #[test]
    fn handle_passes_through() {
        let step = StepDef::handle(99).resolve(0, &Ids).expect("resolves");
        assert_eq!(step.target, 99);
    }

    #[test]
    fn missing_selector_names_step() {
        let defs = vec![StepDef::selector("#el1"), StepDef::selector(".nope")];
        match resolve_all(defs, &Ids) {
            Err(ConfigError::TargetNotFound { index, selector }) => {
                assert_eq!(index, 1);
                assert_eq!(selector, ".nope");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn record_from_json() {
        let record: StepRecord = serde_json::from_str(
            r##"{"element":"#el2","title":"T","position":"top","nextText":"Go"}"##,
        )
        .expect("parse");
        let def: StepDef<u32> = record.into();
        assert_eq!(def.target, TargetRef::Selector("#el2".into()));
        assert_eq!(def.side, Some(Side::Top));
        assert_eq!(def.labels.next.as_deref(), Some("Go"));
        assert!(def.labels.prev.is_none());
    }

    #[test]
    fn config_step_appends() {
        let config: TourConfig<u32> = TourConfig::new()
            .step(StepDef::selector("#el1"))
            .step(StepDef::handle(2));
        assert_eq!(config.steps.as_ref().map(Vec::len), Some(2));
        assert!(config.options.is_none());
    }

    #[test]
    fn document_into_config() {
        let doc = TourDocument {
            steps: vec![StepRecord {
                element: "#el3".into(),
                title: None,
                text: Some("body".into()),
                position: None,
                labels: ButtonLabels::default(),
            }],
            options: Some(Options::default().remember_progress(true)),
        };
        let config: TourConfig<u32> = doc.into_config();
        assert!(config.options_ref().is_some_and(|o| o.remember_progress));
        let steps = resolve_all(config.steps.unwrap_or_default(), &Ids).expect("resolve");
        assert_eq!(steps[0].target, 3);
        assert_eq!(steps[0].text.as_deref(), Some("body"));
    }
}
