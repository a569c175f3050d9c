//! Monotonic time source used for every deadline in the engine.
//!
//! Generation and solving only ever ask "how long since I started", so a [`Clock`] reports the
//! elapsed time since an arbitrary fixed origin. Tests inject a [`ManualClock`] to simulate time
//! without sleeping.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Time elapsed since the clock's origin. Must never go backwards.
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to, optionally advancing by a fixed amount each time it is
/// read.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    tick: Duration,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock::default()
    }

    /// Every call to [`Clock::elapsed`] advances the clock by `tick` after reading it.
    pub fn ticking(tick: Duration) -> ManualClock {
        ManualClock { now: Cell::new(Duration::ZERO), tick }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.tick);
        now
    }
}

/// A point in time on a particular clock after which work must stop.
pub struct Deadline<'a> {
    clock: &'a dyn Clock,
    at: Duration,
}

impl<'a> Deadline<'a> {
    pub fn after(clock: &'a dyn Clock, budget: Duration) -> Deadline<'a> {
        let at = clock.elapsed().saturating_add(budget);
        Deadline { clock, at }
    }

    /// The earlier of this deadline and `budget` from now.
    pub fn capped(&self, budget: Duration) -> Deadline<'a> {
        let candidate = self.clock.elapsed().saturating_add(budget);
        Deadline { clock: self.clock, at: candidate.min(self.at) }
    }

    pub fn is_expired(&self) -> bool {
        self.clock.elapsed() >= self.at
    }
}
