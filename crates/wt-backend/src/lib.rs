#![forbid(unsafe_code)]
#![doc = "Backend traits for Walkthrough: platform abstraction for element lookup, measurement, and presentation."]
#![doc = ""]
#![doc = "This crate defines the boundary between the tour engine and the page it decorates."]
#![doc = "A DOM host implements these against `document`/`window`; tests use the in-memory"]
#![doc = "`PageSimulator` from `wt-runtime`."]

use core::fmt::Debug;

use wt_core::geometry::{Rect, ScrollOffset, Size};
use wt_layout::Side;

/// Turns a selector into a concrete element handle.
///
/// Resolution happens once, at configuration time. A missing element is a
/// configuration error; the resolver only reports absence.
pub trait TargetResolver {
    /// Element handle. Cheap to clone (an id, an index, a ref-counted node).
    type Target: Clone + Debug;

    /// Look up a single element.
    fn resolve(&self, selector: &str) -> Option<Self::Target>;

    /// Elements carrying the attribute `name`, in document order, with all of
    /// their attributes.
    ///
    /// Used by attribute-declared tours. The default reports none.
    fn annotated(&self, name: &str) -> Vec<(Self::Target, Vec<(String, String)>)> {
        let _ = name;
        Vec::new()
    }
}

/// Read-only geometry of the page.
///
/// Every call reflects the current layout; callers never cache the results
/// across steps.
pub trait Measure: TargetResolver {
    /// Viewport-relative box of an element, or `None` if it is no longer on
    /// the page.
    fn target_box(&self, target: &Self::Target) -> Option<Rect>;

    /// Viewport size.
    fn viewport(&self) -> Size;

    /// Accumulated page scroll.
    fn scroll(&self) -> ScrollOffset;

    /// Full scrollable height of the document.
    fn document_height(&self) -> f64;

    /// Rendered size of the popup with its current content.
    ///
    /// Requires a layout pass between the last content update and this call;
    /// hosts that cannot measure synchronously may report [`Size::ZERO`].
    fn popup_size(&self) -> Size;
}

/// Output half of the boundary: the overlay, highlight and popup surfaces.
pub trait Presenter {
    /// Show or hide the dimming layer.
    fn set_overlay_visible(&mut self, visible: bool);

    /// Stretch the dimming layer to cover the document.
    fn set_overlay_height(&mut self, height: f64);

    /// Move the highlight cutout (document coordinates).
    fn set_highlight(&mut self, rect: Rect);

    /// Replace the popup content with rendered markup.
    fn set_popup_content(&mut self, markup: &str);

    /// Move the popup (document coordinates) and point its arrow.
    fn set_popup_position(&mut self, left: f64, top: f64, arrow: Side);

    /// Show or hide the popup.
    fn set_popup_visible(&mut self, visible: bool);

    /// Scroll the page.
    fn scroll_to(&mut self, offset: ScrollOffset);

    /// Tear down every surface this presenter created.
    fn clear(&mut self) {}
}

/// A complete host: element lookup, measurement and presentation.
pub trait Backend: Measure + Presenter {}

impl<B: Measure + Presenter> Backend for B {}
