#![forbid(unsafe_code)]

//! Popup placement around a highlighted target.
//!
//! # Algorithm
//!
//! 1. Build four candidates in viewport coordinates. Bottom/top centre the
//!    popup horizontally on the target; left/right centre it vertically. Each
//!    candidate records whether the popup's far edge stays inside the
//!    viewport once `padding + offset` is accounted for.
//! 2. The preferred side wins if it fits. Otherwise the first fitting side in
//!    [`Side::PRIORITY`] order wins. If nothing fits, [`Side::Bottom`].
//! 3. Clamp each axis to `[EDGE_MARGIN, viewport − popup − EDGE_MARGIN]`
//!    (the lower bound wins when that range is inverted), then add scroll.
//! 4. The arrow points back at the target: it sits on the side opposite the
//!    chosen one.
//!
//! # Invariants
//!
//! 1. [`place`] is a pure function of its input.
//! 2. It always returns a placement; there is no "does not fit" outcome.
//! 3. Before the scroll translation, both coordinates are `>= EDGE_MARGIN`.
//!
//! # Example
//!
//! ```
//! use wt_core::geometry::{Rect, ScrollOffset, Size};
//! use wt_layout::{PlacementInput, Side, place};
//!
//! let placement = place(&PlacementInput {
//!     target: Rect::new(450.0, 450.0, 100.0, 100.0),
//!     popup: Size::new(380.0, 200.0),
//!     viewport: Size::new(1000.0, 1000.0),
//!     scroll: ScrollOffset::default(),
//!     preferred: None,
//!     padding: 10.0,
//!     offset: 15.0,
//! });
//! assert_eq!(placement.side, Side::Bottom);
//! assert_eq!(placement.arrow, Side::Top);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wt_core::geometry::{Rect, ScrollOffset, Size};

/// Minimum distance kept between the popup and the viewport edges.
pub const EDGE_MARGIN: f64 = 10.0;

/// Cardinal side of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Fallback search order when the preferred side does not fit.
    pub const PRIORITY: [Side; 4] = [Side::Bottom, Side::Top, Side::Right, Side::Left];

    /// The side across the target.
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Lowercase name, as used in markup and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown side name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSide(pub String);

impl fmt::Display for UnknownSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSide {}

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(UnknownSide(s.to_string())),
        }
    }
}

/// Everything the engine needs to place one popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    /// Target box, viewport-relative, unpadded.
    pub target: Rect,
    /// Measured popup size.
    pub popup: Size,
    /// Viewport size.
    pub viewport: Size,
    /// Current scroll, added to the final anchor.
    pub scroll: ScrollOffset,
    /// Caller-preferred side.
    pub preferred: Option<Side>,
    /// Highlight padding around the target.
    pub padding: f64,
    /// Gap between highlight and popup.
    pub offset: f64,
}

/// One of the four candidate anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub side: Side,
    /// Anchor left, viewport coordinates, unclamped.
    pub left: f64,
    /// Anchor top, viewport coordinates, unclamped.
    pub top: f64,
    pub fits: bool,
}

impl Candidate {
    /// Arrow tag for this candidate.
    #[must_use]
    pub const fn arrow(&self) -> Side {
        self.side.opposite()
    }
}

/// Final placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Chosen side.
    pub side: Side,
    /// Popup left, document coordinates.
    pub left: f64,
    /// Popup top, document coordinates.
    pub top: f64,
    /// Side of the popup carrying the arrow.
    pub arrow: Side,
}

/// Compute the four candidates, in [`Side::PRIORITY`] order.
#[must_use]
pub fn candidates(input: &PlacementInput) -> [Candidate; 4] {
    let t = input.target;
    let p = input.popup;
    let v = input.viewport;
    let gap = input.padding + input.offset;

    let centered_left = t.center_x() - p.width / 2.0;
    let centered_top = t.center_y() - p.height / 2.0;

    let bottom_top = t.bottom() + gap;
    let top_top = t.top() - gap - p.height;
    let right_left = t.right() + gap;
    let left_left = t.left() - gap - p.width;

    [
        Candidate {
            side: Side::Bottom,
            left: centered_left,
            top: bottom_top,
            fits: bottom_top + p.height < v.height,
        },
        Candidate {
            side: Side::Top,
            left: centered_left,
            top: top_top,
            fits: top_top > 0.0,
        },
        Candidate {
            side: Side::Right,
            left: right_left,
            top: centered_top,
            fits: right_left + p.width < v.width,
        },
        Candidate {
            side: Side::Left,
            left: left_left,
            top: centered_top,
            fits: left_left > 0.0,
        },
    ]
}

/// Choose a side from the candidates.
#[must_use]
pub fn choose(candidates: &[Candidate; 4], preferred: Option<Side>) -> Candidate {
    let find = |side: Side| candidates.iter().find(|c| c.side == side).copied();

    if let Some(side) = preferred
        && let Some(c) = find(side)
        && c.fits
    {
        return c;
    }

    Side::PRIORITY
        .iter()
        .filter_map(|&side| find(side))
        .find(|c| c.fits)
        .or_else(|| find(Side::Bottom))
        .unwrap_or(candidates[0])
}

/// Clamp one axis into `[EDGE_MARGIN, extent − size − EDGE_MARGIN]`.
///
/// The lower bound is applied last, so it wins when the popup is larger
/// than the viewport.
#[inline]
#[must_use]
pub fn clamp_axis(value: f64, size: f64, extent: f64) -> f64 {
    value.min(extent - size - EDGE_MARGIN).max(EDGE_MARGIN)
}

/// Place the popup.
#[must_use]
pub fn place(input: &PlacementInput) -> Placement {
    let all = candidates(input);
    let chosen = choose(&all, input.preferred);

    let left = clamp_axis(chosen.left, input.popup.width, input.viewport.width);
    let top = clamp_axis(chosen.top, input.popup.height, input.viewport.height);

    Placement {
        side: chosen.side,
        left: left + input.scroll.left,
        top: top + input.scroll.top,
        arrow: chosen.arrow(),
    }
}
