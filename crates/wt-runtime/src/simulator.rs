#![forbid(unsafe_code)]

//! In-memory page for headless hosts and tests.
//!
//! [`PageSimulator`] is a complete [`Backend`](wt_backend::Backend): a
//! viewport over a tall document holding named elements, plus a record of
//! everything the tour asked the presenter to do.
//!
//! Elements are placed in document coordinates; [`Measure::target_box`]
//! reports them relative to the viewport, like a browser's bounding client
//! rect. Scrolling clamps to the document the way a browser does.
//!
//! ```
//! use wt_core::geometry::{Rect, Size};
//! use wt_runtime::simulator::PageSimulator;
//! use wt_backend::{Measure, TargetResolver};
//!
//! let mut page = PageSimulator::new(Size::new(1024.0, 768.0), 3000.0);
//! let save = page.add_element("#save", Rect::new(40.0, 1200.0, 80.0, 30.0));
//! assert_eq!(page.resolve("#save"), Some(save));
//! assert_eq!(page.target_box(&save).map(|r| r.y), Some(1200.0));
//! ```

use std::fmt;

use wt_backend::{Measure, Presenter, TargetResolver};
use wt_core::geometry::{Rect, ScrollOffset, Size};
use wt_layout::Side;

/// Handle to a simulated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Element {
    selector: String,
    /// Document coordinates.
    rect: Rect,
    attributes: Vec<(String, String)>,
    attached: bool,
}

/// Popup anchor as last set by the presenter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupAnchor {
    pub left: f64,
    pub top: f64,
    pub arrow: Side,
}

/// Simulated page.
#[derive(Debug, Clone)]
pub struct PageSimulator {
    elements: Vec<Element>,
    viewport: Size,
    scroll: ScrollOffset,
    document_height: f64,
    popup_size: Size,

    overlay_visible: bool,
    overlay_height: f64,
    highlight: Option<Rect>,
    highlight_updates: usize,
    popup_content: String,
    popup_anchor: Option<PopupAnchor>,
    popup_visible: bool,
    scroll_log: Vec<ScrollOffset>,
    cleared: bool,
}

impl PageSimulator {
    /// Blank page with the given viewport and document height.
    #[must_use]
    pub fn new(viewport: Size, document_height: f64) -> Self {
        Self {
            elements: Vec::new(),
            viewport,
            scroll: ScrollOffset::default(),
            document_height: document_height.max(viewport.height),
            popup_size: Size::new(300.0, 150.0),
            overlay_visible: false,
            overlay_height: 0.0,
            highlight: None,
            highlight_updates: 0,
            popup_content: String::new(),
            popup_anchor: None,
            popup_visible: false,
            scroll_log: Vec::new(),
            cleared: false,
        }
    }

    /// Add an element at `rect` (document coordinates).
    pub fn add_element(&mut self, selector: impl Into<String>, rect: Rect) -> ElementId {
        self.elements.push(Element {
            selector: selector.into(),
            rect,
            attributes: Vec::new(),
            attached: true,
        });
        ElementId(self.elements.len() - 1)
    }

    /// Set an attribute on an element.
    pub fn set_attribute(&mut self, id: ElementId, name: impl Into<String>, value: impl Into<String>) {
        let Some(el) = self.elements.get_mut(id.0) else {
            return;
        };
        let name = name.into();
        let value = value.into();
        match el.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => el.attributes.push((name, value)),
        }
    }

    /// Remove an element from the page. Its handle stays valid but measures
    /// as absent.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(id.0) {
            el.attached = false;
        }
    }

    /// Move an element (document coordinates).
    pub fn move_element(&mut self, id: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(id.0) {
            el.rect = rect;
        }
    }

    /// Change the viewport size.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.document_height = self.document_height.max(viewport.height);
        self.scroll = self.clamp_scroll(self.scroll);
    }

    /// Scroll as the user would. Not recorded in the scroll log.
    pub fn set_scroll(&mut self, offset: ScrollOffset) {
        self.scroll = self.clamp_scroll(offset);
    }

    /// Size the popup reports when measured.
    pub fn set_popup_size(&mut self, size: Size) {
        self.popup_size = size;
    }

    fn clamp_scroll(&self, offset: ScrollOffset) -> ScrollOffset {
        let max_top = (self.document_height - self.viewport.height).max(0.0);
        ScrollOffset::new(offset.left.max(0.0), offset.top.clamp(0.0, max_top))
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Overlay extent last set.
    #[must_use]
    pub fn overlay_height(&self) -> f64 {
        self.overlay_height
    }

    /// Highlight box last set (document coordinates).
    #[must_use]
    pub fn highlight(&self) -> Option<Rect> {
        self.highlight
    }

    /// How many times the highlight was moved.
    #[must_use]
    pub fn highlight_updates(&self) -> usize {
        self.highlight_updates
    }

    /// Current popup markup.
    #[must_use]
    pub fn popup_content(&self) -> &str {
        &self.popup_content
    }

    /// Popup anchor last set.
    #[must_use]
    pub fn popup_anchor(&self) -> Option<PopupAnchor> {
        self.popup_anchor
    }

    /// Whether the popup is shown.
    #[must_use]
    pub fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    /// Every scroll the presenter performed, after clamping.
    #[must_use]
    pub fn scroll_log(&self) -> &[ScrollOffset] {
        &self.scroll_log
    }

    /// Whether [`Presenter::clear`] ran.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }
}

impl TargetResolver for PageSimulator {
    type Target = ElementId;

    fn resolve(&self, selector: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.attached && el.selector == selector)
            .map(ElementId)
    }

    fn annotated(&self, name: &str) -> Vec<(ElementId, Vec<(String, String)>)> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.attached && el.attributes.iter().any(|(k, _)| k == name))
            .map(|(i, el)| (ElementId(i), el.attributes.clone()))
            .collect()
    }
}

impl Measure for PageSimulator {
    fn target_box(&self, target: &ElementId) -> Option<Rect> {
        let el = self.elements.get(target.0).filter(|el| el.attached)?;
        Some(el.rect.translate(-self.scroll.left, -self.scroll.top))
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn popup_size(&self) -> Size {
        self.popup_size
    }
}

impl Presenter for PageSimulator {
    fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }

    fn set_overlay_height(&mut self, height: f64) {
        self.overlay_height = height;
    }

    fn set_highlight(&mut self, rect: Rect) {
        self.highlight = Some(rect);
        self.highlight_updates += 1;
    }

    fn set_popup_content(&mut self, markup: &str) {
        self.popup_content = markup.to_string();
    }

    fn set_popup_position(&mut self, left: f64, top: f64, arrow: Side) {
        self.popup_anchor = Some(PopupAnchor { left, top, arrow });
    }

    fn set_popup_visible(&mut self, visible: bool) {
        self.popup_visible = visible;
    }

    fn scroll_to(&mut self, offset: ScrollOffset) {
        self.scroll = self.clamp_scroll(offset);
        self.scroll_log.push(self.scroll);
    }

    fn clear(&mut self) {
        self.overlay_visible = false;
        self.popup_visible = false;
        self.highlight = None;
        self.popup_content.clear();
        self.popup_anchor = None;
        self.cleared = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageSimulator {
        PageSimulator::new(Size::new(800.0, 600.0), 2000.0)
    }

    #[test]
    fn boxes_are_viewport_relative() {
        let mut p = page();
        let id = p.add_element("#a", Rect::new(10.0, 900.0, 50.0, 20.0));
        p.set_scroll(ScrollOffset::new(0.0, 500.0));
        assert_eq!(p.target_box(&id), Some(Rect::new(10.0, 400.0, 50.0, 20.0)));
    }

    #[test]
    fn scroll_clamps_to_document() {
        let mut p = page();
        p.scroll_to(ScrollOffset::new(-5.0, 5000.0));
        assert_eq!(p.scroll(), ScrollOffset::new(0.0, 1400.0));
        p.scroll_to(ScrollOffset::new(0.0, -20.0));
        assert_eq!(p.scroll_log(), &[ScrollOffset::new(0.0, 1400.0), ScrollOffset::default()]);
    }

    #[test]
    fn detached_elements_vanish() {
        let mut p = page();
        let id = p.add_element("#a", Rect::new(0.0, 0.0, 1.0, 1.0));
        p.set_attribute(id, "data-wt-step", "1");
        p.detach(id);
        assert_eq!(p.resolve("#a"), None);
        assert_eq!(p.target_box(&id), None);
        assert!(p.annotated("data-wt-step").is_empty());
    }

    #[test]
    fn first_matching_selector_wins() {
        let mut p = page();
        let first = p.add_element(".card", Rect::default());
        let _second = p.add_element(".card", Rect::default());
        assert_eq!(p.resolve(".card"), Some(first));
    }

    #[test]
    fn set_attribute_overwrites() {
        let mut p = page();
        let id = p.add_element("#a", Rect::default());
        p.set_attribute(id, "data-wt-step", "1");
        p.set_attribute(id, "data-wt-step", "4");
        let found = p.annotated("data-wt-step");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, vec![("data-wt-step".to_string(), "4".to_string())]);
    }

    #[test]
    fn clear_resets_surfaces() {
        let mut p = page();
        p.set_overlay_visible(true);
        p.set_popup_visible(true);
        p.set_highlight(Rect::new(1.0, 1.0, 1.0, 1.0));
        p.clear();
        assert!(!p.overlay_visible());
        assert!(!p.popup_visible());
        assert!(p.highlight().is_none());
        assert!(p.is_cleared());
        assert_eq!(p.highlight_updates(), 1);
    }
}
