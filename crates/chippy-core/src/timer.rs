use std::time::{Duration, Instant};

use crate::constants::TIMER_HZ;

/// Paces the delay and sound timers to wall clock time, independent of how many instructions
/// run per second.
#[derive(Debug, Clone, Copy)]
pub struct TimerGate {
    last_tick: Instant,
}

impl TimerGate {
    pub const PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64);

    pub fn starting_at(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// Returns true (and restarts the period) when at least 1/60th of a second has passed since
    /// the previous tick
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) < Self::PERIOD {
            return false;
        }
        self.last_tick = now;
        true
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }
}
