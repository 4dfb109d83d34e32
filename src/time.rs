//! Time abstraction for freshness checks
//!
//! Cache expiry compares entry timestamps against "now". Taking the clock as
//! an explicit dependency keeps TTL behavior deterministic under test: swap
//! [`SystemClock`] for a [`ManualClock`] and advance time by hand.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Supplies the current time. No side effects, no failure modes.
pub trait TimeProvider: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time provider used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests and simulations.
///
/// Starts at the given instant and only moves when told to via
/// [`ManualClock::advance`] or [`ManualClock::set`].
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Creates a clock frozen at the current wall-clock time.
    pub fn from_system_time() -> Self {
        Self::new(Utc::now())
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = *now + delta;
    }

    /// Sets the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = instant;
    }
}

impl TimeProvider for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}
