//! Player abstraction consumed by the turn agent.
//!
//! A player is built for one side and asked, once per turn, to search a
//! private board snapshot. It publishes candidates through the
//! `SearchContext` as it improves on them, since the search may be cut off
//! at any point, and it should poll `should_stop` at convenient boundaries.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::game_state::checkers_types::{BoardState, Side};
use crate::moves::checkers_move::Move;

/// Settings handed to every player at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Optional search depth hint; players may ignore it.
    pub depth_limit: Option<u32>,
    /// Log reasoning at `info` instead of `debug`.
    pub verbose: bool,
}

pub trait Player: Send {
    fn name(&self) -> &str;

    fn side(&self) -> Side;

    /// Searches `board` for a move for `self.side()`. Only called when at
    /// least one legal move exists.
    fn calculate_move(&mut self, board: &BoardState, ctx: &SearchContext);
}

/// Shared handoff between one computation and the controller.
///
/// Once cancelled, the published move is frozen: later `set_move` calls from
/// the still-running search are ignored.
#[derive(Debug, Default)]
pub struct SearchContext {
    stop: AtomicBool,
    finished: AtomicBool,
    cancelled: AtomicBool,
    best_move: Mutex<Option<Move>>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the current best candidate.
    pub fn set_move(&self, mv: Move) {
        let mut best = self.best_move.lock();
        if !self.cancelled.load(Ordering::Acquire) {
            *best = Some(mv);
        }
    }

    #[inline]
    pub fn best_move(&self) -> Option<Move> {
        self.best_move.lock().clone()
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Stops the search and freezes the published move.
    pub fn cancel(&self) {
        let _best = self.best_move.lock();
        self.cancelled.store(true, Ordering::Release);
        self.stop.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }

    /// True once the search returned on its own.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}
