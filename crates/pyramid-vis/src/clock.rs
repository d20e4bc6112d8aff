//! Repair pacing.
//!
//! Time only accumulates while the pyramid is invalid. Once the accumulated
//! time exceeds the interval the clock fires and starts over.

use std::time::Duration;

/// Decides when the next repair round is due.
#[derive(Debug, Clone)]
pub struct RepairClock {
    interval: Duration,
    elapsed: Duration,
}

impl RepairClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated toward the next round.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time left before the clock fires.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Advance by `dt`. Returns true when a repair round is due.
    pub fn advance(&mut self, dt: Duration, pyramid_valid: bool) -> bool {
        if pyramid_valid {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}
