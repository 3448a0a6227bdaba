#![forbid(unsafe_code)]

//! Core: geometry, easing, host events, and input gating.
//!
//! # Role in Walkthrough
//! `wt-core` is the leaf crate. It owns the coordinate types every other crate
//! speaks, the easing curve the scroll synchronizer samples, and the canonical
//! [`event::Event`] values the host feeds into a tour.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Rect`], [`geometry::to_document_box`].
//! - **Easing**: [`animation::ease_in_out`].
//! - **Events**: keys, resize, scroll, overlay clicks, popup actions.
//! - **Gating**: [`throttle::Throttle`] for reposition floods,
//!   [`keybinding::map_key`] for keyboard navigation.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod keybinding;
pub mod logging;
pub mod throttle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
