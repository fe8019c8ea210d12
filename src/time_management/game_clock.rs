//! Chess-style game clock with one cumulative budget per side.
//!
//! Only the active side's time runs. `press` ends the active side's turn and
//! starts the opponent's, remembering how much the opponent had left so the
//! length of each turn can be reported afterwards. Once the running side
//! reaches zero the clock is finished for good.

use std::time::{Duration, Instant};

use crate::game_state::checkers_types::Side;
use crate::time_management::countdown_clock::ClockState;

#[derive(Debug, Clone)]
pub struct GameClock {
    limits: [Option<Duration>; 2],
    used: [Duration; 2],
    used_at_turn_start: [Duration; 2],
    side: Side,
    state: ClockState,
    touched_at: Instant,
}

impl GameClock {
    /// `limits` is indexed by side; `None` leaves that side untimed.
    pub fn new(limits: [Option<Duration>; 2], side: Side) -> Self {
        Self {
            limits,
            used: [Duration::ZERO; 2],
            used_at_turn_start: [Duration::ZERO; 2],
            side,
            state: ClockState::Paused,
            touched_at: Instant::now(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn limit(&self, side: Side) -> Option<Duration> {
        self.limits.get(side.index()).copied().flatten()
    }

    /// Ends the active side's turn and starts the opponent's.
    pub fn press(&mut self) {
        self.pause();
        if self.state == ClockState::Paused {
            self.side = self.side.opposite();
            if let Some(slot) = self.used_at_turn_start.get_mut(self.side.index()) {
                *slot = self.used.get(self.side.index()).copied().unwrap_or_default();
            }
        }
        self.resume();
    }

    pub fn pause(&mut self) {
        self.touch();
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
    }

    pub fn resume(&mut self) {
        self.touch();
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
        }
    }

    fn touch(&mut self) {
        let now = Instant::now();
        let index = self.side.index();
        if self.state == ClockState::Running {
            if let Some(used) = self.used.get_mut(index) {
                *used += now - self.touched_at;
            }
        }
        self.touched_at = now;
        if self.is_exhausted(self.side) {
            self.state = ClockState::Finished;
        }
    }

    fn is_exhausted(&self, side: Side) -> bool {
        match (self.limit(side), self.used.get(side.index())) {
            (Some(limit), Some(&used)) => used >= limit,
            _ => false,
        }
    }

    pub fn state(&mut self) -> ClockState {
        self.touch();
        self.state
    }

    /// Total time `side` has spent thinking in this game.
    pub fn game_time(&mut self, side: Side) -> Duration {
        self.touch();
        self.used.get(side.index()).copied().unwrap_or_default()
    }

    /// Time `side` has left, or `None` for an untimed side.
    pub fn game_time_remaining(&mut self, side: Side) -> Option<Duration> {
        let used = self.game_time(side);
        self.limit(side).map(|limit| limit.saturating_sub(used))
    }

    /// Time spent by `side` since its most recent turn began.
    pub fn turn_time(&mut self, side: Side) -> Duration {
        let used = self.game_time(side);
        let start = self
            .used_at_turn_start
            .get(side.index())
            .copied()
            .unwrap_or_default();
        used.saturating_sub(start)
    }
}
