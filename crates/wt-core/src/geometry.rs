#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Boxes use page pixels as `f64`. A box is either viewport-relative (what a
//! measurement provider reports for an element) or document-relative (the
//! viewport box translated by the accumulated scroll). The type does not
//! record which space it lives in; the function producing it documents that.

/// An axis-aligned box `{ left, top, width, height }`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new box.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal centre.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical centre.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Size of the box.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the box has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Move the box by `dx`, `dy`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow the box outward by `amount` on every side.
    ///
    /// A negative amount shrinks it; no clamping is applied.
    #[inline]
    #[must_use]
    pub fn expand(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Whether the box lies vertically within `[0, height]`.
    #[inline]
    pub fn within_vertical(&self, height: f64) -> bool {
        self.y >= 0.0 && self.bottom() <= height
    }

    /// Zero-size box at the centre of `size`.
    #[inline]
    pub fn centered_point(size: Size) -> Rect {
        Rect::new(size.width / 2.0, size.height / 2.0, 0.0, 0.0)
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero size (e.g. a popup that has not been laid out yet).
    pub const ZERO: Size = Size::new(0.0, 0.0);
}

/// Accumulated page scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    /// Horizontal scroll (`scrollLeft`).
    pub left: f64,
    /// Vertical scroll (`scrollTop`).
    pub top: f64,
}

impl ScrollOffset {
    /// Create a scroll offset.
    #[inline]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Same horizontal offset, new vertical offset.
    #[inline]
    #[must_use]
    pub const fn with_top(self, top: f64) -> Self {
        Self {
            left: self.left,
            top,
        }
    }
}

/// Convert a viewport-relative element box into the document-relative
/// highlight box.
///
/// The result is expanded by `padding` on all four sides and translated by
/// the scroll offsets. `padding` is used as given.
#[must_use]
pub fn to_document_box(viewport_box: Rect, scroll: ScrollOffset, padding: f64) -> Rect {
    viewport_box.translate(scroll.left, scroll.top).expand(padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_centres() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
        assert_eq!(r.center_y(), 40.0);
        assert_eq!(r.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn empty_box() {
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Rect::default().is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn document_box_pads_and_scrolls() {
        let viewport_box = Rect::new(100.0, 50.0, 200.0, 40.0);
        let doc = to_document_box(viewport_box, ScrollOffset::new(5.0, 300.0), 10.0);
        assert_eq!(doc, Rect::new(95.0, 340.0, 220.0, 60.0));
    }

    #[test]
    fn document_box_zero_padding_is_translation() {
        let viewport_box = Rect::new(1.0, 2.0, 3.0, 4.0);
        let doc = to_document_box(viewport_box, ScrollOffset::new(10.0, 20.0), 0.0);
        assert_eq!(doc, Rect::new(11.0, 22.0, 3.0, 4.0));
    }

    #[test]
    fn document_box_negative_padding_used_literally() {
        let viewport_box = Rect::new(10.0, 10.0, 20.0, 20.0);
        let doc = to_document_box(viewport_box, ScrollOffset::default(), -2.0);
        assert_eq!(doc, Rect::new(12.0, 12.0, 16.0, 16.0));
    }

    #[test]
    fn vertical_visibility() {
        assert!(Rect::new(0.0, 0.0, 10.0, 100.0).within_vertical(100.0));
        assert!(!Rect::new(0.0, -1.0, 10.0, 10.0).within_vertical(100.0));
        assert!(!Rect::new(0.0, 95.0, 10.0, 10.0).within_vertical(100.0));
    }

    #[test]
    fn centered_point_is_zero_sized() {
        let p = Rect::centered_point(Size::new(800.0, 600.0));
        assert_eq!(p, Rect::new(400.0, 300.0, 0.0, 0.0));
        assert!(p.is_empty());
    }
}
