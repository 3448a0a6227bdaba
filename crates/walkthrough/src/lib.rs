#![forbid(unsafe_code)]

//! Walkthrough public facade crate.
//!
//! Guided "spotlight" tours over an existing page: the page is dimmed, a
//! highlight is cut around each step's target, and a popup with the step's
//! content is anchored beside it.
//!
//! This crate re-exports the stable surface of the internal crates and offers
//! a prelude plus a [`factory`] module of one-call constructors.
//!
//! # Driving a tour
//!
//! ```
//! use std::time::Duration;
//! use walkthrough::prelude::*;
//!
//! let mut page = PageSimulator::new(Size::new(1024.0, 768.0), 1500.0);
//! page.add_element("#new", Rect::new(20.0, 20.0, 120.0, 32.0));
//! page.add_element("#inbox", Rect::new(20.0, 80.0, 600.0, 400.0));
//!
//! let mut tour = Tour::new(page);
//! tour.configure(
//!     TourConfig::new()
//!         .step(StepDef::selector("#new").title("Compose"))
//!         .step(StepDef::selector("#inbox").title("Inbox").side(Side::Right)),
//! )?;
//!
//! tour.tick(Duration::ZERO);
//! tour.start(None);
//! tour.tick(Duration::from_millis(50));  // first step placed
//! tour.tick(Duration::from_millis(100)); // and revealed
//! assert!(tour.backend().popup_visible());
//!
//! tour.handle_event(Event::Key(KeyEvent::new(KeyCode::Right)));
//! assert_eq!(tour.current_index(), 1);
//! # Ok::<(), walkthrough::Error>(())
//! ```

pub mod error;
pub mod factory;
pub mod logging;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use wt_core::animation::ease_in_out;
pub use wt_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, PopupAction};
pub use wt_core::geometry::{Rect, ScrollOffset, Size, to_document_box};

// --- Layout re-exports -----------------------------------------------------

pub use wt_layout::{Placement, PlacementInput, Side, place};

// --- Backend re-exports ----------------------------------------------------

pub use wt_backend::{Backend, Measure, Presenter, TargetResolver};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "state-persistence")]
pub use wt_runtime::FileStorage;
pub use wt_runtime::{
    ButtonLabels, Callbacks, ConfigError, DefaultPopup, ElementId, MemoryStorage, Options,
    PageSimulator, PopupRenderer, ProgressStore, Step, StepDef, StepRecord, StorageError,
    TargetRef, Tour, TourConfig, TourDocument,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Backend, Callbacks, ElementId, Error, Event, KeyCode, KeyEvent, Options, PageSimulator,
        PopupAction, PopupRenderer, Rect, Result, Side, Size, Step, StepDef, Tour, TourConfig,
    };

    pub use crate::{backend, core, factory, layout, runtime};
}

pub use wt_backend as backend;
pub use wt_core as core;
pub use wt_layout as layout;
pub use wt_runtime as runtime;
