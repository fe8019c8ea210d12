//! Runs one player's search per turn on its own thread.
//!
//! The controller never blocks on the search: it polls `is_finished`, reads
//! `final_move` once the search has returned, or calls `cancel` and takes
//! `forced_move` when the deadline passes. Cancelled threads are never
//! joined; they observe the stop flag and exit on their own, and anything
//! they publish afterwards is discarded.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use log::{debug, error};
use parking_lot::Mutex;

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::engines::player_trait::{Player, SearchContext};
use crate::game_state::checkers_types::BoardState;
use crate::moves::checkers_move::Move;

/// Players are locked by the computation thread for the length of a search.
pub type SharedPlayer = Arc<Mutex<Box<dyn Player>>>;

/// Called from the computation thread when a search returns by itself.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

#[inline]
pub fn share_player(player: Box<dyn Player>) -> SharedPlayer {
    Arc::new(Mutex::new(player))
}

#[derive(Default)]
pub struct TurnAgent {
    context: Option<Arc<SearchContext>>,
    callback: Option<CompletionCallback>,
}

impl TurnAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_completion_callback(&mut self, callback: CompletionCallback) {
        self.callback = Some(callback);
    }

    /// Starts searching a private copy of `board`. A computation still in
    /// flight is cancelled first.
    pub fn start(&mut self, player: SharedPlayer, board: &BoardState) -> CheckersResult<()> {
        self.cancel();
        self.context = None;

        let ctx = Arc::new(SearchContext::new());
        let thread_ctx = Arc::clone(&ctx);
        let callback = self.callback.clone();
        let snapshot = *board;

        thread::Builder::new()
            .name("turn-agent".to_owned())
            .spawn(move || run_search(player, snapshot, thread_ctx, callback))
            .map_err(CheckersError::Io)?;

        self.context = Some(ctx);
        Ok(())
    }

    /// True once the search returned or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|ctx| ctx.is_finished() || ctx.is_cancelled())
    }

    /// The move chosen by a finished search, or `None` if it chose nothing.
    pub fn final_move(&self) -> CheckersResult<Option<Move>> {
        match &self.context {
            Some(ctx) if ctx.is_finished() || ctx.is_cancelled() => Ok(ctx.best_move()),
            _ => Err(CheckersError::ResultNotReady),
        }
    }

    /// Best move published so far, at any time.
    pub fn forced_move(&self) -> Option<Move> {
        self.context.as_ref().and_then(|ctx| ctx.best_move())
    }

    /// Stops the current search unconditionally. The published move stays
    /// readable through `forced_move`.
    pub fn cancel(&mut self) {
        if let Some(ctx) = &self.context {
            if !ctx.is_finished() && !ctx.is_cancelled() {
                debug!("cancelling turn computation");
            }
            ctx.cancel();
        }
    }
}

impl Drop for TurnAgent {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_search(
    player: SharedPlayer,
    board: BoardState,
    ctx: Arc<SearchContext>,
    callback: Option<CompletionCallback>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut player = player.lock();
        if ctx.is_cancelled() {
            return;
        }
        player.calculate_move(&board, &ctx);
    }));
    if outcome.is_err() {
        error!("player panicked while calculating a move");
    }

    ctx.mark_finished();
    if ctx.is_cancelled() {
        return;
    }
    if let Some(callback) = callback {
        callback();
    }
}
