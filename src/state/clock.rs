//! Monotonic time and deadline arithmetic.
//!
//! The session never sleeps. It stores deadlines as [`Instant`]s and compares
//! them against the clock every time the host polls.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// How long the computer "thinks" before placing its mark (1 second).
pub const THINKING_DELAY: Duration = Duration::from_secs(1);

/// How long a finished round stays on screen before the board clears (3 seconds).
pub const FINISHED_DELAY: Duration = Duration::from_secs(3);

/// A monotonic time source.
pub trait Clock {
    /// Current time. Never decreases between calls.
    fn now(&self) -> Instant;

    /// A deadline `duration` from now.
    fn after(&self, duration: Duration) -> Instant {
        self.now() + duration
    }

    /// Check if `deadline` has been reached.
    fn has_passed(&self, deadline: Instant) -> bool {
        self.now() >= deadline
    }
}

/// The process's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle and give the
/// other to a session.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_secs(2));
        assert_eq!(clock.now(), handle.now());
        assert_eq!(clock.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_deadline_reached_exactly() {
        let clock = ManualClock::new();
        let deadline = clock.after(THINKING_DELAY);

        assert!(!clock.has_passed(deadline));
        clock.advance(Duration::from_millis(999));
        assert!(!clock.has_passed(deadline));
        clock.advance(Duration::from_millis(1));
        assert!(clock.has_passed(deadline));
        clock.advance(FINISHED_DELAY);
        assert!(clock.has_passed(deadline));
    }
}
