#![forbid(unsafe_code)]

//! The tour state machine.
//!
//! A [`Tour`] owns a backend, a step list and a timer queue. The host drives
//! it with two calls:
//!
//! - [`Tour::tick`] once per display refresh, with a monotonic timestamp;
//! - [`Tour::handle_event`] for every input event it forwards.
//!
//! Everything else (`start`, `next`, `prev`, `finish`, `end`) is ordinary
//! method calls from the embedding code or from the events above.
//!
//! # Showing a step
//!
//! ```text
//! show_step(i) ─ hide popup, save progress, on_step
//!      │
//!      ├─ target visible ───────────────┐
//!      └─ scroll animation ── tick… ────┤
//!                                       ▼
//!                     highlight + placement + render
//!                                       │ 50 ms
//!                                       ▼
//!                         re-place, show popup (reveal)
//! ```
//!
//! Every `show_step` and every `end` bumps a generation counter. The scroll
//! completion and the reveal timer carry the generation they were started
//! under and are dropped if it moved on, so rapid navigation never reveals a
//! superseded step.
//!
//! # Failure model
//!
//! - Starting with no steps logs a warning and does nothing.
//! - Showing an index out of range does nothing.
//! - A target that vanished after configuration is placed from its last known
//!   box, or from a zero-size box at the viewport centre, without scrolling.
//! - Progress storage problems read as "no saved progress".

use std::fmt;
use std::time::Duration;

use wt_backend::Backend;
use wt_core::event::{Event, PopupAction};
use wt_core::geometry::{Rect, to_document_box};
use wt_core::keybinding::{NavAction, map_key};
use wt_core::throttle::{DEFAULT_THROTTLE_WINDOW, Throttle};
use wt_layout::{Placement, PlacementInput, place};

use crate::attributes::scan_attribute_steps;
use crate::error::ConfigError;
use crate::hooks::Callbacks;
use crate::options::Options;
use crate::progress::{MemoryStorage, ProgressGateway, ProgressStore};
use crate::render::{DefaultPopup, PopupRenderer, bound_actions};
use crate::scheduler::Scheduler;
use crate::scroll::{ScrollAnimation, ScrollPlan, ensure_visible};
use crate::step::{Step, TourConfig, resolve_all};

/// Delay between `start` and the first step.
pub const START_DELAY: Duration = Duration::from_millis(50);

/// Delay between placing a popup and showing it.
pub const REVEAL_DELAY: Duration = Duration::from_millis(50);

/// Minimum spacing of resize/scroll repositions.
pub const REPOSITION_WINDOW: Duration = DEFAULT_THROTTLE_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    AutoStart,
    StartStep,
    Reveal { generation: u64 },
    HideOverlay { generation: u64 },
}

#[derive(Debug)]
struct InFlightScroll {
    generation: u64,
    animation: ScrollAnimation,
}

/// A guided tour over a page provided by `B`.
pub struct Tour<B: Backend> {
    backend: B,
    steps: Vec<Step<B::Target>>,
    options: Options,
    callbacks: Callbacks<B::Target>,
    renderer: Option<Box<dyn PopupRenderer<B::Target>>>,
    progress: ProgressGateway,
    timers: Scheduler<TimerEvent>,
    throttle: Throttle,

    current: usize,
    active: bool,
    destroyed: bool,
    generation: u64,
    scroll: Option<InFlightScroll>,
    placement: Option<Placement>,
    last_box: Option<(usize, Rect)>,
    bound: Vec<PopupAction>,
}

impl<B: Backend + fmt::Debug> fmt::Debug for Tour<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("backend", &self.backend)
            .field("steps", &self.steps.len())
            .field("current", &self.current)
            .field("active", &self.active)
            .field("destroyed", &self.destroyed)
            .field("generation", &self.generation)
            .field("pending_timers", &self.timers.pending())
            .finish_non_exhaustive()
    }
}

impl<B: Backend> Tour<B> {
    /// Tour with default options and in-memory progress.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, Options::default())
    }

    /// Tour with `options`. With `auto_start` set, attribute-declared steps
    /// are scanned and started after `start_delay`.
    #[must_use]
    pub fn with_options(backend: B, options: Options) -> Self {
        let progress = ProgressGateway::new(
            Box::new(MemoryStorage::new()),
            options.storage_key.clone(),
            options.storage_ttl(),
        );
        let mut timers = Scheduler::new();
        if options.auto_start {
            timers.schedule(options.start_delay, TimerEvent::AutoStart);
        }
        Self {
            backend,
            steps: Vec::new(),
            options,
            callbacks: Callbacks::default(),
            renderer: None,
            progress,
            timers,
            throttle: Throttle::new(REPOSITION_WINDOW),
            current: 0,
            active: false,
            destroyed: false,
            generation: 0,
            scroll: None,
            placement: None,
            last_box: None,
            bound: Vec::new(),
        }
    }

    /// Use `store` for progress instead of the in-memory default.
    #[must_use]
    pub fn with_store(mut self, store: impl ProgressStore + 'static) -> Self {
        self.progress = ProgressGateway::new(
            Box::new(store),
            self.options.storage_key.clone(),
            self.options.storage_ttl(),
        );
        self
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Apply a configuration. Parts that are set replace the current ones.
    ///
    /// Selectors are resolved here. On error nothing changes.
    pub fn configure(&mut self, config: TourConfig<B::Target>) -> Result<(), ConfigError> {
        let TourConfig {
            steps,
            options,
            callbacks,
            renderer,
        } = config;

        if let Some(options) = &options {
            let errors = options.validate();
            if !errors.is_empty() {
                return Err(ConfigError::Validation(errors));
            }
        }
        let steps = steps
            .map(|defs| resolve_all(defs, &self.backend))
            .transpose()?;

        if let Some(options) = options {
            self.progress
                .retarget(options.storage_key.clone(), options.storage_ttl());
            self.options = options;
        }
        if let Some(callbacks) = callbacks {
            self.callbacks = callbacks;
        }
        if let Some(renderer) = renderer {
            self.renderer = Some(renderer);
        }
        if let Some(steps) = steps {
            tracing::debug!(count = steps.len(), "steps configured");
            self.replace_steps(steps);
        }
        Ok(())
    }

    /// Replace the steps with those declared in page attributes. Returns how
    /// many were found.
    pub fn scan_attribute_steps(&mut self) -> usize {
        let steps = scan_attribute_steps(&self.backend, &self.options);
        let count = steps.len();
        tracing::debug!(count, "attribute steps scanned");
        self.replace_steps(steps);
        count
    }

    fn replace_steps(&mut self, steps: Vec<Step<B::Target>>) {
        self.steps = steps;
        self.last_box = None;
        if !self.active {
            return;
        }
        if self.steps.is_empty() {
            self.end();
        } else {
            self.current = self.current.min(self.steps.len() - 1);
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Start the tour.
    ///
    /// Without an index the tour resumes saved progress when
    /// `remember_progress` is set, else starts at 0. Indices past the end are
    /// clamped to the last step.
    pub fn start(&mut self, index: Option<usize>) {
        if self.steps.is_empty() {
            tracing::warn!("walkthrough has no steps configured");
            return;
        }
        let requested = index
            .or_else(|| {
                self.options
                    .remember_progress
                    .then(|| self.progress.load())
                    .flatten()
            })
            .unwrap_or(0);
        let index = requested.min(self.steps.len() - 1);

        let height = self.backend.document_height();
        self.backend.set_overlay_height(height);
        self.current = index;
        self.active = true;
        tracing::debug!(index, requested, "tour started");

        self.callbacks.start();
        self.backend.set_overlay_visible(true);
        self.timers.schedule(START_DELAY, TimerEvent::StartStep);
    }

    /// Show step `index`. Out of range does nothing.
    pub fn show_step(&mut self, index: usize) {
        if index >= self.steps.len() {
            return;
        }
        self.backend.set_popup_visible(false);
        self.current = index;
        if self.options.remember_progress {
            self.progress.save(index);
        }

        self.generation += 1;
        let generation = self.generation;
        tracing::debug!(index, generation, "showing step");
        self.callbacks.step(&self.steps[index], index);

        // Latest wins: a newer step owns the page scroll.
        self.scroll = None;
        let target_box = self
            .steps
            .get(index)
            .and_then(|step| self.backend.target_box(&step.target));
        let Some(rect) = target_box else {
            tracing::debug!(index, "target missing; placing without scrolling");
            self.complete_scroll(generation);
            return;
        };
        let plan = ensure_visible(
            rect,
            self.backend.viewport().height,
            self.backend.scroll(),
            self.options.scroll_offset,
            self.options.scroll_duration,
        );
        match plan {
            ScrollPlan::Visible => self.complete_scroll(generation),
            ScrollPlan::Animate(animation) => {
                self.scroll = Some(InFlightScroll {
                    generation,
                    animation,
                });
            }
        }
    }

    /// Advance one step, finishing after the last.
    pub fn next(&mut self) {
        if self.current + 1 < self.steps.len() {
            self.show_step(self.current + 1);
        } else {
            self.finish();
        }
    }

    /// Go back one step. Does nothing on the first.
    pub fn prev(&mut self) {
        if self.current > 0 {
            self.show_step(self.current - 1);
        }
    }

    /// Complete the tour: `on_finish`, forget progress, then [`end`](Self::end).
    pub fn finish(&mut self) {
        tracing::debug!(index = self.current, "tour finished");
        self.callbacks.finish();
        self.progress.clear();
        self.end();
    }

    /// Stop the tour. The popup hides at once, the overlay after
    /// `animation_duration`. Does nothing when not active.
    pub fn end(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.generation += 1;
        tracing::debug!(index = self.current, "tour ended");
        self.callbacks.end();
        self.backend.set_popup_visible(false);
        let generation = self.generation;
        self.timers.schedule(
            self.options.animation_duration,
            TimerEvent::HideOverlay { generation },
        );
    }

    /// Tear down: stop listening to host events, drop steps and timers,
    /// clear the presenter. Callbacks do not fire. Calling it again does
    /// nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.timers.clear();
        self.scroll = None;
        self.steps.clear();
        self.current = 0;
        self.active = false;
        self.generation += 1;
        self.placement = None;
        self.last_box = None;
        self.bound.clear();
        self.throttle.reset();
        self.backend.clear();
        tracing::debug!("tour destroyed");
    }

    /// Re-measure and re-place the highlight and popup for the current step.
    pub fn reposition(&mut self) {
        if self.active && self.current < self.steps.len() {
            self.position_elements();
        }
    }

    // ------------------------------------------------------------------
    // Host input
    // ------------------------------------------------------------------

    /// Feed one host event, timestamped with the last tick.
    pub fn handle_event(&mut self, event: Event) {
        if self.destroyed {
            return;
        }
        match event {
            Event::Key(key) => {
                if !self.options.keyboard || !self.active {
                    return;
                }
                match map_key(&key, self.options.key_config()) {
                    Some(NavAction::Exit) => self.end(),
                    Some(NavAction::Next) => self.next(),
                    Some(NavAction::Prev) => self.prev(),
                    None => {}
                }
            }
            Event::OverlayClick => {
                if self.options.close_on_overlay {
                    self.end();
                }
            }
            Event::Resize { .. } | Event::Scroll => {
                if self.throttle.admit(self.timers.now()) {
                    self.reposition();
                }
            }
            Event::Action(action) => self.handle_action(action),
        }
    }

    /// Feed one host event that happened at `now`.
    pub fn handle_event_at(&mut self, now: Duration, event: Event) {
        self.timers.advance(now);
        self.handle_event(event);
    }

    fn handle_action(&mut self, action: PopupAction) {
        if !self.active || !self.bound.contains(&action) {
            tracing::debug!(%action, active = self.active, "ignoring unbound popup action");
            return;
        }
        match action {
            PopupAction::Skip => self.end(),
            PopupAction::Prev => self.prev(),
            PopupAction::Next => self.next(),
            PopupAction::Finish => self.finish(),
        }
    }

    /// Advance host time: run due timers, then sample the scroll animation.
    pub fn tick(&mut self, now: Duration) {
        while let Some(event) = self.timers.pop_due(now) {
            self.fire(event);
        }
        self.sample_scroll(now);
    }

    fn fire(&mut self, event: TimerEvent) {
        tracing::debug!(?event, now = ?self.timers.now(), "timer fired");
        match event {
            TimerEvent::AutoStart => {
                if self.active {
                    return;
                }
                if self.scan_attribute_steps() > 0 {
                    self.start(None);
                }
            }
            TimerEvent::StartStep => {
                if self.active {
                    self.show_step(self.current);
                }
            }
            TimerEvent::Reveal { generation } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "dropping stale reveal");
                    return;
                }
                self.place_popup();
                self.backend.set_popup_visible(true);
            }
            TimerEvent::HideOverlay { generation } => {
                if self.active || generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "dropping stale overlay hide");
                    return;
                }
                self.backend.set_overlay_visible(false);
            }
        }
    }

    fn sample_scroll(&mut self, now: Duration) {
        let Some(flight) = self.scroll.as_mut() else {
            return;
        };
        let generation = flight.generation;
        let Some(frame) = flight.animation.sample(now) else {
            self.scroll = None;
            return;
        };
        self.backend.scroll_to(frame.offset);
        if frame.complete {
            self.scroll = None;
            self.complete_scroll(generation);
        }
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    fn complete_scroll(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale scroll completion");
            return;
        }
        self.position_elements();
        self.render_popup();
        self.timers
            .schedule(REVEAL_DELAY, TimerEvent::Reveal { generation });
    }

    fn position_elements(&mut self) {
        if self.current >= self.steps.len() {
            return;
        }
        let height = self.backend.document_height();
        self.backend.set_overlay_height(height);

        let rect = self.target_rect();
        let highlight = to_document_box(rect, self.backend.scroll(), self.options.highlight_padding);
        self.backend.set_highlight(highlight);
        self.place_at(rect);
    }

    fn place_popup(&mut self) {
        if self.current >= self.steps.len() {
            return;
        }
        let rect = self.target_rect();
        self.place_at(rect);
    }

    /// Viewport box of the current target, with fallbacks for a vanished one.
    fn target_rect(&mut self) -> Rect {
        let index = self.current;
        let measured = self
            .steps
            .get(index)
            .and_then(|step| self.backend.target_box(&step.target));
        match (measured, self.last_box) {
            (Some(rect), _) => {
                self.last_box = Some((index, rect));
                rect
            }
            (None, Some((i, rect))) if i == index => rect,
            (None, _) => Rect::centered_point(self.backend.viewport()),
        }
    }

    fn place_at(&mut self, rect: Rect) {
        let input = PlacementInput {
            target: rect,
            popup: self.backend.popup_size(),
            viewport: self.backend.viewport(),
            scroll: self.backend.scroll(),
            preferred: self.steps.get(self.current).and_then(|s| s.side),
            padding: self.options.highlight_padding,
            offset: self.options.popup_offset,
        };
        let placement = place(&input);
        self.backend
            .set_popup_position(placement.left, placement.top, placement.arrow);
        self.placement = Some(placement);
    }

    fn render_popup(&mut self) {
        let Some(step) = self.steps.get(self.current) else {
            return;
        };
        let (index, total) = (self.current, self.steps.len());
        let markup = match &self.renderer {
            Some(renderer) => renderer.render(step, index, total),
            None => DefaultPopup::new(&self.options).render(step, index, total),
        };
        self.bound = bound_actions(&markup);
        self.backend.set_popup_content(&markup);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Whether the tour is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether [`destroy`](Self::destroy) ran.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Index of the current (or last shown) step.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of configured steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The current step, if any.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step<B::Target>> {
        self.steps.get(self.current)
    }

    /// All configured steps.
    #[must_use]
    pub fn steps(&self) -> &[Step<B::Target>] {
        &self.steps
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The page.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The page, mutably (for hosts that also drive it).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Give the page back.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Last computed placement.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Actions the current popup markup offers.
    #[must_use]
    pub fn bound_actions(&self) -> &[PopupAction] {
        &self.bound
    }

    /// Generation counter (bumped by every step shown and every end).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a scroll animation is in flight.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_some()
    }

    /// Pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Earliest pending timer deadline, for hosts that sleep between ticks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}
