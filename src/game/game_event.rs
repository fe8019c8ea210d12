//! Notifications emitted by the game model.

use std::fmt;

use chrono::{DateTime, Utc};

/// What happened in a game transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    Start,
    Wait,
    Move,
    Forfeit,
    Win,
    Draw,
    Crash,
}

impl GameEventKind {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameEventKind::Start => "START",
            GameEventKind::Wait => "WAIT",
            GameEventKind::Move => "MOVE",
            GameEventKind::Forfeit => "FORFEIT",
            GameEventKind::Win => "WIN",
            GameEventKind::Draw => "DRAW",
            GameEventKind::Crash => "CRASH",
        }
    }

    /// True for the kinds that end a game.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameEventKind::Win | GameEventKind::Draw | GameEventKind::Crash
        )
    }
}

impl fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition of the game model, with a human-readable detail string such
/// as `RED c3-d4 (12 ms)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub kind: GameEventKind,
    pub detail: String,
    pub at: DateTime<Utc>,
}

impl GameEvent {
    pub fn new(kind: GameEventKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            at: Utc::now(),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.detail)
        }
    }
}
