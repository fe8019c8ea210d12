//! Game state machine.
//!
//! `GameModel` owns the live board, the side to move and the lifecycle state:
//!
//! ```text
//! ANTE --start--> READY --begin turn--> WAITING --move--> READY | FINISHED
//!   |                |                     |--forfeit--> FINISHED
//!   +--> FINISHED    +-------crash---------+--crash----> INVALID
//! ```
//!
//! Every transition emits a `GameEvent` to the game listeners and then a
//! state notification to the state listeners. Calling an operation from a
//! state that does not allow it returns `CheckersError::WrongState`.

use std::fmt;
use std::time::Duration;

use log::debug;

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::game::game_event::{GameEvent, GameEventKind};
use crate::game_state::checkers_rules::DEFAULT_DRAW_PLY_LIMIT;
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::execute;
use crate::move_generation::legal_move_checks::is_valid_move;
use crate::move_generation::legal_move_generator::is_loser;
use crate::moves::checkers_move::Move;
use crate::time_management::game_clock::GameClock;

/// Game budget per side when no clock is supplied.
pub const DEFAULT_GAME_TIME: Duration = Duration::from_secs(300);

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelState {
    Ante,
    Ready,
    Waiting,
    Finished,
    Invalid,
}

impl ModelState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, ModelState::Finished | ModelState::Invalid)
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModelState::Ante => "ANTE",
            ModelState::Ready => "READY",
            ModelState::Waiting => "WAITING",
            ModelState::Finished => "FINISHED",
            ModelState::Invalid => "INVALID",
        })
    }
}

pub type StateListener = Box<dyn FnMut(ModelState) + Send>;
pub type GameListener = Box<dyn FnMut(&GameEvent) + Send>;

pub struct GameModel {
    board: BoardState,
    side: Side,
    state: ModelState,
    winner: Side,
    ply: u32,
    last_capture_ply: u32,
    draw_ply_limit: u32,
    clock: GameClock,
    player_names: [String; 2],
    state_listeners: Vec<StateListener>,
    game_listeners: Vec<GameListener>,
}

impl GameModel {
    /// A game in ANTE with `side` to move first on `board`.
    pub fn new(player_names: [String; 2], board: BoardState, side: Side) -> Self {
        Self {
            board,
            side,
            state: ModelState::Ante,
            winner: Side::Neither,
            ply: 0,
            last_capture_ply: 0,
            draw_ply_limit: DEFAULT_DRAW_PLY_LIMIT,
            clock: GameClock::new([Some(DEFAULT_GAME_TIME); 2], side),
            player_names,
            state_listeners: Vec::new(),
            game_listeners: Vec::new(),
        }
    }

    /// Replaces the game clock. The clock's active side should match the
    /// side to move.
    pub fn set_clock(&mut self, clock: GameClock) {
        self.clock = clock;
    }

    pub fn set_draw_ply_limit(&mut self, limit: u32) {
        self.draw_ply_limit = limit;
    }

    pub fn add_state_listener(&mut self, listener: StateListener) {
        self.state_listeners.push(listener);
    }

    pub fn add_game_listener(&mut self, listener: GameListener) {
        self.game_listeners.push(listener);
    }

    fn require(&self, operation: &'static str, allowed: &[ModelState]) -> CheckersResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(CheckersError::WrongState {
                operation,
                state: self.state,
            })
        }
    }

    fn fire_game_changed(&mut self, kind: GameEventKind, detail: String) {
        let event = GameEvent::new(kind, detail);
        debug!("game event {event}");
        for listener in self.game_listeners.iter_mut() {
            listener(&event);
        }
    }

    fn fire_state_changed(&mut self) {
        let state = self.state;
        for listener in self.state_listeners.iter_mut() {
            listener(state);
        }
    }

    /// ANTE -> READY, or straight to FINISHED when the first mover is stuck.
    pub fn start_game(&mut self) -> CheckersResult<()> {
        self.require("start the game", &[ModelState::Ante])?;
        let detail = format!("{} {}", self.player_names[0], self.player_names[1]);
        self.fire_game_changed(GameEventKind::Start, detail);

        if is_loser(&self.board, self.side) {
            self.declare_winner(self.side.opposite());
        } else {
            self.state = ModelState::Ready;
        }
        self.fire_state_changed();
        Ok(())
    }

    /// READY -> WAITING; starts the active side's game clock.
    pub fn start_waiting(&mut self) -> CheckersResult<()> {
        self.require("begin a turn", &[ModelState::Ready])?;
        self.state = ModelState::Waiting;
        self.clock.resume();
        self.fire_game_changed(GameEventKind::Wait, self.side.to_string());
        self.fire_state_changed();
        Ok(())
    }

    /// WAITING -> READY or FINISHED.
    ///
    /// Returns `IllegalMove` without changing anything when `mv` is not legal
    /// for the side to move.
    pub fn make_move(&mut self, mv: &Move) -> CheckersResult<()> {
        self.require("make a move", &[ModelState::Waiting])?;
        if !is_valid_move(&self.board, self.side, mv) {
            return Err(CheckersError::IllegalMove(mv.clone()));
        }

        let turn_time = self.clock.turn_time(self.side);
        let detail = format!("{} {} ({} ms)", self.side, mv, turn_time.as_millis());

        let _ = execute(&mut self.board, mv);
        self.side = self.side.opposite();
        self.ply += 1;
        if !mv.is_walk() {
            self.last_capture_ply = self.ply;
        }
        self.state = ModelState::Ready;

        self.clock.press();
        self.clock.pause();
        self.fire_game_changed(GameEventKind::Move, detail);

        if is_loser(&self.board, self.side) {
            self.declare_winner(self.side.opposite());
        } else if self.ply - self.last_capture_ply >= self.draw_ply_limit {
            self.declare_winner(Side::Neither);
        }
        self.fire_state_changed();
        Ok(())
    }

    /// WAITING -> FINISHED with the opponent of the side to move as winner.
    pub fn forfeit(&mut self, reason: &str) -> CheckersResult<()> {
        self.require("forfeit", &[ModelState::Waiting])?;
        self.clock.press();
        self.clock.pause();
        let detail = format!("{} (reason: {reason})", self.side);
        self.fire_game_changed(GameEventKind::Forfeit, detail);
        self.declare_winner(self.side.opposite());
        self.fire_state_changed();
        Ok(())
    }

    /// READY or WAITING -> INVALID. No winner is recorded.
    pub fn crash_game(&mut self, reason: &str) -> CheckersResult<()> {
        self.require("crash the game", &[ModelState::Ready, ModelState::Waiting])?;
        self.clock.pause();
        self.winner = Side::Neither;
        self.state = ModelState::Invalid;
        self.fire_game_changed(GameEventKind::Crash, format!("(reason: {reason})"));
        self.fire_state_changed();
        Ok(())
    }

    fn declare_winner(&mut self, side: Side) {
        self.clock.pause();
        self.winner = side;
        self.state = ModelState::Finished;
        if side == Side::Neither {
            self.fire_game_changed(GameEventKind::Draw, String::new());
        } else {
            self.fire_game_changed(GameEventKind::Win, side.to_string());
        }
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> ModelState {
        self.state
    }

    /// Side to move; `None` once the game is over.
    #[inline]
    pub fn active_side(&self) -> Option<Side> {
        (!self.state.is_terminal()).then_some(self.side)
    }

    /// Winner of a finished game, `Side::Neither` for a draw.
    #[inline]
    pub fn winner(&self) -> Option<Side> {
        (self.state == ModelState::Finished).then_some(self.winner)
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn last_capture_ply(&self) -> u32 {
        self.last_capture_ply
    }

    #[inline]
    pub fn draw_ply_limit(&self) -> u32 {
        self.draw_ply_limit
    }

    pub fn player_name(&self, side: Side) -> &str {
        self.player_names
            .get(side.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The game clock; queries fold elapsed time in, hence `&mut`.
    #[inline]
    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }
}

impl fmt::Debug for GameModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameModel")
            .field("state", &self.state)
            .field("side", &self.side)
            .field("ply", &self.ply)
            .field("last_capture_ply", &self.last_capture_ply)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("location should parse")
    }

    fn names() -> [String; 2] {
        ["Alice".to_owned(), "Bob".to_owned()]
    }

    fn recorded(model: &mut GameModel) -> Arc<Mutex<Vec<String>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        model.add_game_listener(Box::new(move |event: &GameEvent| {
            sink.lock().expect("event sink").push(event.to_string());
        }));
        events
    }

    #[test]
    fn walk_through_one_turn() {
        let mut model = GameModel::new(names(), BoardState::new_game(), Side::Red);
        let events = recorded(&mut model);

        model.start_game().expect("start from ANTE");
        assert_eq!(model.state(), ModelState::Ready);
        model.start_waiting().expect("wait from READY");
        assert_eq!(model.state(), ModelState::Waiting);

        model
            .make_move(&"c3-d4".parse().expect("move should parse"))
            .expect("legal opening move");
        assert_eq!(model.state(), ModelState::Ready);
        assert_eq!(model.active_side(), Some(Side::Black));
        assert_eq!(model.ply(), 1);

        let events = events.lock().expect("event sink");
        assert_eq!(events[0], "START Alice Bob");
        assert_eq!(events[1], "WAIT RED");
        assert!(events[2].starts_with("MOVE RED c3-d4 ("), "{}", events[2]);
        assert!(events[2].ends_with(" ms)"));
    }

    #[test]
    fn wrong_state_calls_are_rejected() {
        let mut model = GameModel::new(names(), BoardState::new_game(), Side::Red);
        assert!(matches!(
            model.start_waiting(),
            Err(CheckersError::WrongState {
                state: ModelState::Ante,
                ..
            })
        ));
        assert!(model.forfeit("too early").is_err());
        assert!(model.crash_game("too early").is_err());
        model.start_game().expect("start from ANTE");
        assert!(model.start_game().is_err());
        assert!(model
            .make_move(&"c3-d4".parse().expect("move should parse"))
            .is_err());
    }

    #[test]
    fn illegal_move_leaves_model_untouched() {
        let mut model = GameModel::new(names(), BoardState::new_game(), Side::Red);
        model.start_game().expect("start");
        model.start_waiting().expect("wait");
        let mv: Move = "c3-c4".parse().expect("move should parse");
        assert!(matches!(model.make_move(&mv), Err(CheckersError::IllegalMove(_))));
        assert_eq!(model.state(), ModelState::Waiting);
        assert_eq!(model.board(), &BoardState::new_game());
    }

    #[test]
    fn stuck_first_mover_loses_at_start() {
        let board = BoardState::from_placements(&[
            (sq("a1"), Piece::RedPawn),
            (sq("b2"), Piece::BlackPawn),
            (sq("c3"), Piece::BlackPawn),
        ]);
        let mut model = GameModel::new(names(), board, Side::Red);
        model.start_game().expect("start");
        assert_eq!(model.state(), ModelState::Finished);
        assert_eq!(model.winner(), Some(Side::Black));
        assert_eq!(model.active_side(), None);
    }

    #[test]
    fn capturing_last_piece_wins() {
        let board = BoardState::from_placements(&[
            (sq("c3"), Piece::RedPawn),
            (sq("d4"), Piece::BlackPawn),
        ]);
        let mut model = GameModel::new(names(), board, Side::Red);
        let events = recorded(&mut model);
        model.start_game().expect("start");
        model.start_waiting().expect("wait");
        model
            .make_move(&"c3-e5".parse().expect("move should parse"))
            .expect("capture is legal");
        assert_eq!(model.winner(), Some(Side::Red));
        assert_eq!(model.last_capture_ply(), 1);
        let events = events.lock().expect("event sink");
        assert_eq!(events.last().map(String::as_str), Some("WIN RED"));
    }

    #[test]
    fn capture_free_limit_draws() {
        let board = BoardState::from_placements(&[
            (sq("a1"), Piece::RedKing),
            (sq("h8"), Piece::BlackKing),
        ]);
        let mut model = GameModel::new(names(), board, Side::Red);
        model.set_draw_ply_limit(4);
        model.start_game().expect("start");
        let script = ["a1-b2", "h8-g7", "b2-a1", "g7-h8"];
        for text in script {
            model.start_waiting().expect("wait");
            model
                .make_move(&text.parse().expect("move should parse"))
                .expect("king walk is legal");
        }
        assert_eq!(model.state(), ModelState::Finished);
        assert_eq!(model.winner(), Some(Side::Neither));
        assert_eq!(model.ply(), 4);
    }

    #[test]
    fn huge_draw_limit_never_draws() {
        let board = BoardState::from_placements(&[
            (sq("c3"), Piece::RedPawn),
            (sq("d4"), Piece::BlackPawn),
            (sq("h8"), Piece::BlackPawn),
        ]);
        let mut model = GameModel::new(names(), board, Side::Red);
        model.set_draw_ply_limit(u32::MAX);
        model.start_game().expect("start");
        model.start_waiting().expect("wait");
        model
            .make_move(&"c3-e5".parse().expect("move should parse"))
            .expect("capture is legal");
        assert_eq!(model.state(), ModelState::Ready);
        assert_eq!(model.last_capture_ply(), 1);
    }

    #[test]
    fn forfeit_and_crash_paths() {
        let mut model = GameModel::new(names(), BoardState::new_game(), Side::Red);
        let states = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&states);
        model.add_state_listener(Box::new(move |state: ModelState| {
            sink.lock().expect("state sink").push(state);
        }));
        let events = recorded(&mut model);
        model.start_game().expect("start");
        model.start_waiting().expect("wait");
        model.forfeit("invalid move c3-c4").expect("forfeit while waiting");
        assert_eq!(model.winner(), Some(Side::Black));
        assert!(model.crash_game("late").is_err());
        assert_eq!(
            events.lock().expect("event sink")[2],
            "FORFEIT RED (reason: invalid move c3-c4)"
        );
        assert_eq!(
            *states.lock().expect("state sink"),
            vec![ModelState::Ready, ModelState::Waiting, ModelState::Finished]
        );

        let mut crashed = GameModel::new(names(), BoardState::new_game(), Side::Red);
        crashed.start_game().expect("start");
        crashed.crash_game("shutdown").expect("crash from READY");
        assert_eq!(crashed.state(), ModelState::Invalid);
        assert_eq!(crashed.winner(), None);
    }
}
