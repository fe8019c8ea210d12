//! Per-turn countdown clock.
//!
//! The clock never ticks in the background. Every query first folds the wall
//! time elapsed since the previous query into the remaining budget.

use std::fmt;
use std::time::{Duration, Instant};

/// Run state shared by both clock kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockState {
    Paused,
    Running,
    Finished,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClockState::Paused => "PAUSED",
            ClockState::Running => "RUNNING",
            ClockState::Finished => "FINISHED",
        })
    }
}

/// Counts a fixed delay down to zero. A clock without a delay is disabled:
/// it never runs and never finishes.
#[derive(Debug, Clone)]
pub struct CountdownClock {
    delay: Option<Duration>,
    state: ClockState,
    remain: Duration,
    touched_at: Instant,
}

impl CountdownClock {
    pub fn new(delay: Option<Duration>) -> Self {
        let mut clock = Self {
            delay,
            state: ClockState::Paused,
            remain: Duration::ZERO,
            touched_at: Instant::now(),
        };
        clock.reset();
        clock
    }

    #[inline]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Refills the clock with its delay and pauses it.
    pub fn reset(&mut self) {
        self.touch();
        self.state = ClockState::Paused;
        self.remain = self.delay.unwrap_or(Duration::ZERO);
    }

    pub fn resume(&mut self) {
        self.touch();
        if self.delay.is_some() && self.state == ClockState::Paused {
            self.state = ClockState::Running;
        }
    }

    pub fn pause(&mut self) {
        self.touch();
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
    }

    fn touch(&mut self) {
        let now = Instant::now();
        if self.state == ClockState::Running {
            self.remain = self.remain.saturating_sub(now - self.touched_at);
        }
        self.touched_at = now;
        if self.delay.is_some() && self.remain.is_zero() {
            self.state = ClockState::Finished;
        }
    }

    /// Remaining budget, or `None` when the clock is disabled.
    pub fn time_remaining(&mut self) -> Option<Duration> {
        self.touch();
        self.delay.map(|_| self.remain)
    }

    pub fn state(&mut self) -> ClockState {
        self.touch();
        self.state
    }

    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Takes effect on the next `reset`.
    #[inline]
    pub fn set_delay(&mut self, delay: Option<Duration>) {
        self.delay = delay;
    }
}
