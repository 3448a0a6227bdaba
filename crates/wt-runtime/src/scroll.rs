#![forbid(unsafe_code)]

//! Bring-into-view scrolling.
//!
//! [`ensure_visible`] decides whether a target needs scrolling at all. When it
//! does, the returned [`ScrollAnimation`] is sampled once per display refresh
//! and eases the page from its current offset to the destination.
//!
//! The animation has no cancel operation. Whoever owns it decides whether its
//! completion still matters.

use std::time::Duration;

use wt_core::animation::{ease_in_out, progress};
use wt_core::geometry::{Rect, ScrollOffset};

/// Outcome of [`ensure_visible`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollPlan {
    /// Already fully visible; continue immediately.
    Visible,
    /// Needs scrolling; drive the animation to completion first.
    Animate(ScrollAnimation),
}

/// Plan the scroll that brings `target` into view.
///
/// `target` is viewport-relative. A target that lies vertically inside
/// `[0, viewport_height]` is left alone. Otherwise the page scrolls so the
/// target's top sits `offset` pixels below the viewport top.
#[must_use]
pub fn ensure_visible(
    target: Rect,
    viewport_height: f64,
    current: ScrollOffset,
    offset: f64,
    duration: Duration,
) -> ScrollPlan {
    if target.within_vertical(viewport_height) {
        return ScrollPlan::Visible;
    }
    let destination = current.top + target.y - offset;
    ScrollPlan::Animate(ScrollAnimation::new(current, destination, duration))
}

/// One sampled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    /// Where the page should be now.
    pub offset: ScrollOffset,
    /// Set on exactly one frame: the last.
    pub complete: bool,
}

/// An eased vertical scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    from: ScrollOffset,
    to_top: f64,
    duration: Duration,
    started: Option<Duration>,
    finished: bool,
}

impl ScrollAnimation {
    /// Animate from `from` to vertical offset `to_top`.
    #[must_use]
    pub fn new(from: ScrollOffset, to_top: f64, duration: Duration) -> Self {
        Self {
            from,
            to_top,
            duration,
            started: None,
            finished: false,
        }
    }

    /// Destination offset.
    #[must_use]
    pub fn destination(&self) -> ScrollOffset {
        self.from.with_top(self.to_top)
    }

    /// Whether the completing frame has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Sample at host time `now`. The first sample fixes the start time.
    ///
    /// Returns `None` once the animation has finished.
    pub fn sample(&mut self, now: Duration) -> Option<ScrollFrame> {
        if self.finished {
            return None;
        }
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        let t = progress(elapsed, self.duration);
        let diff = self.to_top - self.from.top;
        let top = self.from.top + diff * ease_in_out(t);
        let complete = elapsed >= self.duration;
        self.finished = complete;
        Some(ScrollFrame {
            offset: self.from.with_top(top),
            complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[test]
    fn visible_target_needs_nothing() {
        let plan = ensure_visible(
            Rect::new(0.0, 100.0, 50.0, 50.0),
            600.0,
            ScrollOffset::default(),
            100.0,
            MS(500),
        );
        assert_eq!(plan, ScrollPlan::Visible);
    }

    #[test]
    fn below_fold_scrolls_with_offset() {
        let plan = ensure_visible(
            Rect::new(0.0, 900.0, 50.0, 50.0),
            600.0,
            ScrollOffset::new(0.0, 200.0),
            100.0,
            MS(500),
        );
        let ScrollPlan::Animate(anim) = plan else {
            panic!("expected animation");
        };
        assert_eq!(anim.destination(), ScrollOffset::new(0.0, 1000.0));
    }

    #[test]
    fn partially_visible_scrolls() {
        let plan = ensure_visible(
            Rect::new(0.0, 580.0, 50.0, 50.0),
            600.0,
            ScrollOffset::default(),
            100.0,
            MS(500),
        );
        assert!(matches!(plan, ScrollPlan::Animate(_)));
    }

    #[test]
    fn eases_and_completes_once() {
        let mut anim = ScrollAnimation::new(ScrollOffset::default(), 1000.0, MS(500));
        let first = anim.sample(MS(1000)).expect("frame");
        assert_eq!(first.offset.top, 0.0);
        assert!(!first.complete);

        let mid = anim.sample(MS(1250)).expect("frame");
        assert!((mid.offset.top - 500.0).abs() < 1e-9);
        assert!(!mid.complete);

        let last = anim.sample(MS(1500)).expect("frame");
        assert_eq!(last.offset.top, 1000.0);
        assert!(last.complete);

        assert!(anim.is_finished());
        assert_eq!(anim.sample(MS(1600)), None);
    }

    #[test]
    fn overshooting_sample_lands_on_destination() {
        let mut anim = ScrollAnimation::new(ScrollOffset::new(5.0, 300.0), 0.0, MS(100));
        anim.sample(MS(0));
        let last = anim.sample(MS(250)).expect("frame");
        assert_eq!(last.offset, ScrollOffset::new(5.0, 0.0));
        assert!(last.complete);
    }

    #[test]
    fn zero_duration_completes_on_first_sample() {
        let mut anim = ScrollAnimation::new(ScrollOffset::default(), 400.0, Duration::ZERO);
        let frame = anim.sample(MS(7)).expect("frame");
        assert_eq!(frame.offset.top, 400.0);
        assert!(frame.complete);
    }
}
