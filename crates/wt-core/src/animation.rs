#![forbid(unsafe_code)]

//! Time-based interpolation.
//!
//! # Invariants
//!
//! 1. [`ease_in_out`] maps `[0, 1]` onto `[0, 1]`, is monotonic
//!    non-decreasing, and fixes `0`, `0.5` and `1`.
//! 2. [`progress`] never divides by zero: a zero duration is complete.

use std::time::Duration;

/// An easing curve: progress in `[0, 1]` to eased progress in `[0, 1]`.
pub type EasingFn = fn(f64) -> f64;

/// Identity curve.
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Symmetric quadratic ease-in-out.
///
/// `t < 0.5 → 2t²`, otherwise `-1 + (4 − 2t)·t`. Input is clamped to `[0, 1]`.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}
