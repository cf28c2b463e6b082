//! Recurring gravity timer
//!
//! The timer is driven by elapsed time handed in from outside (`advance`), so the
//! game stays deterministic. A disarmed timer is simply `None` in the owning game;
//! each arming gets a new generation so a stale timer can be told apart from a live one.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityTimer {
    interval: Duration,
    elapsed: Duration,
    generation: u64,
}

impl GravityTimer {
    /// Arm a new timer. Panics on a zero interval
    pub fn arm(interval: Duration, generation: u64) -> Self {
        assert!(!interval.is_zero(), "gravity interval must be positive");
        Self {
            interval,
            elapsed: Duration::ZERO,
            generation,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time remaining until the next fire
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Accumulate elapsed time; returns true once per completed interval.
    /// Leftover time carries into the next interval.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}
