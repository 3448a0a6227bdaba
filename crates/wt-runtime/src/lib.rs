#![forbid(unsafe_code)]

//! Runtime for Walkthrough tours.
//!
//! # Role in Walkthrough
//! `wt-runtime` turns a list of steps into a running tour: it resolves
//! targets, drives the navigation state machine, scrolls targets into view,
//! places the highlight and popup, renders popup markup and remembers
//! progress.
//!
//! # Host-driven time
//! Nothing here sleeps, spawns or reads a clock. The host calls
//! [`Tour::tick`] once per display refresh and forwards input with
//! [`Tour::handle_event`]; every delay is measured against the timestamps it
//! supplies.
//!
//! # Key modules
//! - [`tour`]: the state machine.
//! - [`scroll`]: bring-into-view animation.
//! - [`progress`]: saved step index.
//! - [`render`]: popup markup.
//! - [`simulator`]: an in-memory page for headless use.
//!
//! # Feature flags
//! - `config-files`: load options and step documents from JSON/TOML.
//! - `state-persistence`: JSON file progress store.

pub mod attributes;
pub mod error;
pub mod hooks;
pub mod options;
pub mod progress;
pub mod render;
pub mod scheduler;
pub mod scroll;
pub mod simulator;
pub mod step;
pub mod tour;

pub use attributes::scan_attribute_steps;
pub use error::{ConfigError, StorageError};
pub use hooks::Callbacks;
pub use options::Options;
#[cfg(feature = "state-persistence")]
pub use progress::FileStorage;
pub use progress::{MemoryStorage, ProgressGateway, ProgressStore};
pub use render::{DefaultPopup, PopupRenderer, bound_actions};
pub use scheduler::Scheduler;
pub use scroll::{ScrollAnimation, ScrollFrame, ScrollPlan, ensure_visible};
pub use simulator::{ElementId, PageSimulator, PopupAnchor};
pub use step::{ButtonLabels, Step, StepDef, StepRecord, TargetRef, TourConfig, TourDocument};
pub use tour::{REPOSITION_WINDOW, REVEAL_DELAY, START_DELAY, Tour};
