#![forbid(unsafe_code)]

//! Leading-edge rate limiter for high-frequency events.
//!
//! Resize and scroll events arrive in floods. [`Throttle`] lets the first
//! event of a window through immediately and drops every further event until
//! the window has elapsed. Dropped events are not queued and there is no
//! trailing call: this is a rate limiter, not a debouncer.
//!
//! # Invariants
//!
//! 1. At most one admission per `window`.
//! 2. The first event after an idle period is always admitted.
//! 3. Time is supplied by the caller, so behaviour is deterministic.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use wt_core::throttle::Throttle;
//!
//! let mut gate = Throttle::new(Duration::from_millis(100));
//! assert!(gate.admit(Duration::from_millis(0)));
//! assert!(!gate.admit(Duration::from_millis(40)));
//! assert!(gate.admit(Duration::from_millis(100)));
//! ```

use std::time::Duration;

/// Default reposition window.
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(100);

/// Leading-edge throttle gate.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    /// Gate is closed until this instant.
    closed_until: Option<Duration>,
    admitted: u64,
    dropped: u64,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_WINDOW)
    }
}

impl Throttle {
    /// Create a throttle with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            closed_until: None,
            admitted: 0,
            dropped: 0,
        }
    }

    /// Window length.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether an event at `now` goes through.
    pub fn admit(&mut self, now: Duration) -> bool {
        if let Some(until) = self.closed_until
            && now < until
        {
            self.dropped += 1;
            return false;
        }
        self.closed_until = Some(now.saturating_add(self.window));
        self.admitted += 1;
        true
    }

    /// Reopen the gate immediately.
    pub fn reset(&mut self) {
        self.closed_until = None;
    }

    /// Events let through so far.
    #[must_use]
    pub const fn admitted(&self) -> u64 {
        self.admitted
    }

    /// Events dropped so far.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}
