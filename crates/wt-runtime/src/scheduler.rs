#![forbid(unsafe_code)]

//! Host-driven timer queue.
//!
//! The host reports monotonic time through [`Scheduler::pop_due`]; nothing
//! here reads a clock. Timers are ordered by deadline, ties by insertion.
//!
//! # Invariants
//!
//! 1. A timer never fires before its deadline.
//! 2. Timers with equal deadlines fire in scheduling order.
//! 3. Timers scheduled before the host has reported any time are measured
//!    from the first reported instant.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    At(Duration),
    /// Scheduled before the first reported instant.
    After(Duration),
}

#[derive(Debug)]
struct Timer<E> {
    due: Due,
    seq: u64,
    event: E,
}

impl<E> Timer<E> {
    fn deadline(&self) -> Duration {
        match self.due {
            Due::At(at) | Due::After(at) => at,
        }
    }
}

impl<E> PartialEq for Timer<E> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<E> Eq for Timer<E> {}

impl<E> PartialOrd for Timer<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Timer<E> {
    // Reversed: BinaryHeap is a max-heap and we want the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline()
            .cmp(&self.deadline())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deadline-ordered queue of events of type `E`.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Option<Duration>,
    heap: BinaryHeap<Timer<E>>,
    next_seq: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Empty queue with no notion of time yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: None,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Last instant the host reported, or zero before the first one.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.unwrap_or(Duration::ZERO)
    }

    /// Whether the host has reported any time yet.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.now.is_some()
    }

    /// Queue `event` to fire `delay` after the current instant.
    pub fn schedule(&mut self, delay: Duration, event: E) {
        let due = match self.now {
            Some(now) => Due::At(now.saturating_add(delay)),
            None => Due::After(delay),
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Timer { due, seq, event });
    }

    /// Advance to `now` and take the earliest timer due by then.
    ///
    /// Call repeatedly until it returns `None`; timers scheduled by the
    /// handlers of earlier ones are picked up if they are already due.
    pub fn pop_due(&mut self, now: Duration) -> Option<E> {
        self.advance(now);
        let due = self.heap.peek().is_some_and(|t| t.deadline() <= now);
        if due {
            self.heap.pop().map(|t| t.event)
        } else {
            None
        }
    }

    /// Record `now` without firing anything. Time never moves backwards.
    pub fn advance(&mut self, now: Duration) {
        match self.now {
            None => {
                self.now = Some(now);
                self.rebase(now);
            }
            Some(prev) if now > prev => self.now = Some(now),
            Some(_) => {}
        }
    }

    fn rebase(&mut self, origin: Duration) {
        if self.heap.iter().all(|t| matches!(t.due, Due::At(_))) {
            return;
        }
        let timers = std::mem::take(&mut self.heap).into_vec();
        self.heap = timers
            .into_iter()
            .map(|mut t| {
                if let Due::After(delay) = t.due {
                    t.due = Due::At(origin.saturating_add(delay));
                }
                t
            })
            .collect();
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    /// Whether any timer is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.heap.is_empty()
    }

    /// Earliest pending deadline, if known.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|t| match t.due {
            Due::At(at) => at,
            Due::After(delay) => self.now().saturating_add(delay),
        })
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
