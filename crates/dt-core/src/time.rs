//! World time model.
//!
//! Unlike a fixed-duration scheduler, this world is driven by a host that
//! calls `tick(dt_secs)` with a caller-supplied, possibly variable, elapsed
//! time each step. `Tick` is therefore just a
//! monotonically increasing step counter for logging/ordering — the actual
//! simulated time elapsed is tracked in wall-clock seconds by [`SimClock`],
//! accumulated from the `dt_secs` the host passes in, not a fixed multiplier.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing step counter — one per call to `tick()`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// The next tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Accumulates elapsed simulated seconds across variable-length ticks.
///
/// `SimClock` is cheap to copy and holds no heap data. It does not dictate
/// how much time a tick represents — the host decides that by the `dt_secs`
/// it passes to each `tick()` call.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick — advanced by [`SimClock::advance`] each step.
    pub current_tick: Tick,
    /// Total simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            current_tick: Tick::ZERO,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock by one tick representing `dt_secs` of simulated time.
    #[inline]
    pub fn advance(&mut self, dt_secs: f64) {
        self.current_tick = self.current_tick.next();
        self.elapsed_secs += dt_secs;
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs.max(0.0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}
