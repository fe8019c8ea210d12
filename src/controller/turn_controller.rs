//! Drives a game one step at a time.
//!
//! `step` looks at the model state and either makes progress immediately or
//! reports how long nothing can change. `run_loop` repeats `step` while it
//! progresses and hands the wait back to the caller, which is expected to
//! re-invoke it after that delay or on the next external event. Calling
//! `run_loop` again when nothing changed is a no-op.

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::engines::turn_agent::{CompletionCallback, SharedPlayer, TurnAgent};
use crate::game::game_model::{GameModel, ModelState};
use crate::game_state::checkers_types::Side;
use crate::moves::checkers_move::Move;
use crate::time_management::countdown_clock::{ClockState, CountdownClock};

/// What the driving loop should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Progress was made; step again immediately.
    Continue,
    /// Nothing can change before this delay elapses.
    WaitFor(Duration),
    /// Nothing can change until an external event arrives.
    Idle,
}

pub struct TurnController {
    model: GameModel,
    players: [SharedPlayer; 2],
    agent: TurnAgent,
    turn_clocks: [CountdownClock; 2],
}

impl TurnController {
    /// `players` and `turn_limits` are indexed by side. A `None` turn limit
    /// lets that side think until its game time runs out.
    pub fn new(
        model: GameModel,
        players: [SharedPlayer; 2],
        turn_limits: [Option<Duration>; 2],
    ) -> Self {
        Self {
            model,
            players,
            agent: TurnAgent::new(),
            turn_clocks: turn_limits.map(CountdownClock::new),
        }
    }

    pub fn set_completion_callback(&mut self, callback: CompletionCallback) {
        self.agent.set_completion_callback(callback);
    }

    #[inline]
    pub fn model(&self) -> &GameModel {
        &self.model
    }

    #[inline]
    pub fn model_mut(&mut self) -> &mut GameModel {
        &mut self.model
    }

    /// Applies from the next turn of `side` on.
    pub fn set_turn_limit(&mut self, side: Side, limit: Option<Duration>) {
        if let Some(clock) = self.turn_clocks.get_mut(side.index()) {
            clock.set_delay(limit);
        }
    }

    pub fn turn_limit(&self, side: Side) -> Option<Duration> {
        self.turn_clocks
            .get(side.index())
            .and_then(CountdownClock::delay)
    }

    /// Steps until no immediate progress is possible. Returns the delay
    /// after which the loop should run again, or `None` when only an
    /// external event (or nothing at all) can move the game on. A failed
    /// step crashes the game.
    pub fn run_loop(&mut self) -> Option<Duration> {
        loop {
            match self.step() {
                Ok(StepOutcome::Continue) => continue,
                Ok(StepOutcome::WaitFor(delay)) => return Some(delay),
                Ok(StepOutcome::Idle) => return None,
                Err(err) => {
                    self.abort(&err);
                    return None;
                }
            }
        }
    }

    fn abort(&mut self, err: &CheckersError) {
        error!("controller step failed: {err}");
        self.terminate(&err.to_string());
    }

    pub fn step(&mut self) -> CheckersResult<StepOutcome> {
        match self.model.state() {
            ModelState::Ante => self.step_ante(),
            ModelState::Ready => self.step_ready(),
            ModelState::Waiting => self.step_waiting(),
            ModelState::Finished | ModelState::Invalid => Ok(StepOutcome::Idle),
        }
    }

    fn step_ante(&mut self) -> CheckersResult<StepOutcome> {
        self.model.start_game()?;
        Ok(StepOutcome::Continue)
    }

    fn step_ready(&mut self) -> CheckersResult<StepOutcome> {
        let side = self.active_side()?;
        self.model.start_waiting()?;

        let clock = &mut self.turn_clocks[side.index()];
        clock.reset();
        clock.resume();

        let player = SharedPlayer::clone(&self.players[side.index()]);
        self.agent.start(player, self.model.board())?;
        debug!("{side} to move, turn limit {:?}", clock.delay());
        Ok(StepOutcome::Continue)
    }

    fn step_waiting(&mut self) -> CheckersResult<StepOutcome> {
        let side = self.active_side()?;

        if self.model.clock_mut().state() == ClockState::Finished {
            self.agent.cancel();
            info!("{side} ran out of game time");
            self.model.forfeit("game time expired")?;
            return Ok(StepOutcome::Continue);
        }

        if self.agent.is_finished() {
            let mv = self.agent.final_move()?;
            self.submit(side, mv)?;
            return Ok(StepOutcome::Continue);
        }

        let clock = &mut self.turn_clocks[side.index()];
        if clock.state() == ClockState::Finished {
            self.agent.cancel();
            let mv = self.agent.forced_move();
            debug!("{side} turn time expired, forced move {mv:?}");
            self.submit(side, mv)?;
            return Ok(StepOutcome::Continue);
        }

        let turn_wait = clock.time_remaining();
        let game_wait = self.model.clock_mut().game_time_remaining(side);
        Ok(match (turn_wait, game_wait) {
            (Some(a), Some(b)) => StepOutcome::WaitFor(a.min(b)),
            (Some(wait), None) | (None, Some(wait)) => StepOutcome::WaitFor(wait),
            (None, None) => StepOutcome::Idle,
        })
    }

    /// Hands the chosen move to the model. A missing or illegal move forfeits
    /// the game for `side`.
    fn submit(&mut self, side: Side, mv: Option<Move>) -> CheckersResult<()> {
        self.turn_clocks[side.index()].pause();
        let Some(mv) = mv else {
            warn!("{side} produced no move");
            return self.model.forfeit("no move chosen");
        };
        match self.model.make_move(&mv) {
            Ok(()) => Ok(()),
            Err(CheckersError::IllegalMove(mv)) => {
                warn!("{side} played illegal move {mv}");
                self.model.forfeit(&format!("invalid move {mv}"))
            }
            Err(err) => Err(err),
        }
    }

    fn active_side(&self) -> CheckersResult<Side> {
        self.model
            .active_side()
            .ok_or(CheckersError::WrongState {
                operation: "find the side to move",
                state: self.model.state(),
            })
    }

    /// Cancels any computation and, if the game is still running, crashes
    /// it with `reason`. A no-op for games that have not started or ended.
    pub fn terminate(&mut self, reason: &str) {
        self.agent.cancel();
        if matches!(self.model.state(), ModelState::Ready | ModelState::Waiting) {
            if let Err(err) = self.model.crash_game(reason) {
                error!("failed to terminate game: {err}");
            }
        }
    }
}
