#![forbid(unsafe_code)]

//! Placement solver for Walkthrough popups.
//!
//! Given a target box, the popup's measured size, the viewport, the scroll
//! position and an optional preferred side, [`place`] decides which side of
//! the target the popup goes on, where exactly it is anchored, and which
//! side carries the arrow. See [`placement`] for the algorithm.

pub mod placement;

pub use placement::{
    Candidate, EDGE_MARGIN, Placement, PlacementInput, Side, UnknownSide, candidates, choose,
    clamp_axis, place,
};
