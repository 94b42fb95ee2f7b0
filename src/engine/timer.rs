//! Deterministic deferral model.
//!
//! Nothing in the core sleeps or spawns. A [`Timer`] is an armed deadline
//! on a session-relative timeline; owners check it against the `now` their
//! host passes in. Re-arming replaces the previous deadline, so an owner
//! never has more than one pending deferral of a given kind.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the session timeline.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from when the clock was created.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Test clock advanced under explicit control. Clones share one timeline.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A single cancellable deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_due(&self, now: Duration) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Disarm and report `true` if the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

/// Delays used by sessions and the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Inactivity window after which a partial recognizer buffer is dropped.
    pub partial_timeout: Duration,
    /// Window in which a pending `g` waits for its second key.
    pub prefix_timeout: Duration,
    /// Pause between a drill hit and the next round.
    pub drill_pause: Duration,
    /// Pause between a solved challenge and the next one.
    pub challenge_pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            partial_timeout: Duration::from_millis(800),
            prefix_timeout: Duration::from_millis(1000),
            drill_pause: Duration::from_millis(200),
            challenge_pause: Duration::from_millis(1000),
        }
    }
}
