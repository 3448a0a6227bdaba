#![forbid(unsafe_code)]

//! Lifecycle callbacks.

use std::fmt;

use crate::step::Step;

type Hook = Box<dyn FnMut()>;
type StepHook<T> = Box<dyn FnMut(&Step<T>, usize)>;

/// Optional closures fired on tour transitions.
///
/// Callbacks run synchronously inside the tour call that triggered them. A
/// panicking callback unwinds through that call.
pub struct Callbacks<T> {
    on_start: Option<Hook>,
    on_step: Option<StepHook<T>>,
    on_finish: Option<Hook>,
    on_end: Option<Hook>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_start: None,
            on_step: None,
            on_finish: None,
            on_end: None,
        }
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_step", &self.on_step.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

impl<T> Callbacks<T> {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired when the tour becomes active.
    #[must_use]
    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Fired for every step shown, with its index.
    #[must_use]
    pub fn on_step(mut self, f: impl FnMut(&Step<T>, usize) + 'static) -> Self {
        self.on_step = Some(Box::new(f));
        self
    }

    /// Fired when the last step is completed, before `on_end`.
    #[must_use]
    pub fn on_finish(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_finish = Some(Box::new(f));
        self
    }

    /// Fired whenever an active tour stops, finished or not.
    #[must_use]
    pub fn on_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    pub(crate) fn start(&mut self) {
        if let Some(f) = self.on_start.as_mut() {
            f();
        }
    }

    pub(crate) fn step(&mut self, step: &Step<T>, index: usize) {
        if let Some(f) = self.on_step.as_mut() {
            f(step, index);
        }
    }

    pub(crate) fn finish(&mut self) {
        if let Some(f) = self.on_finish.as_mut() {
            f();
        }
    }

    pub(crate) fn end(&mut self) {
        if let Some(f) = self.on_end.as_mut() {
            f();
        }
    }
}
