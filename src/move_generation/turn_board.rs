//! Turn-scoped board wrapper for search.
//!
//! `TurnBoard` binds a board, the side to move and a stack of undo frames so
//! that a search can `execute` and `revert_last` without managing revert
//! logs itself. The forced-jump answer is cached per position; each frame
//! remembers the cached value that was in place before its move, so undo
//! restores the cache together with the squares.

use std::fmt;

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::execute;
use crate::move_generation::legal_move_checks::{can_walk, has_jump, is_forced_jump, is_valid_move};
use crate::move_generation::legal_move_generator::enumerate_moves_with_forced;
use crate::moves::checkers_move::Move;

#[derive(Debug, Clone)]
struct TurnFrame {
    log: RevertLog,
    forced_jump: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct TurnBoard {
    board: BoardState,
    side: Side,
    frames: Vec<TurnFrame>,
    forced_jump: Option<bool>,
}

impl TurnBoard {
    /// Wraps a private copy of `board` with `side` to move.
    pub fn new(board: &BoardState, side: Side) -> Self {
        Self {
            board: *board,
            side,
            frames: Vec::with_capacity(32),
            forced_jump: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of executed moves that can still be reverted.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether the side to move must capture. Computed once per position.
    pub fn is_forced_jump(&mut self) -> bool {
        match self.forced_jump {
            Some(forced) => forced,
            None => {
                let forced = is_forced_jump(&self.board, self.side);
                self.forced_jump = Some(forced);
                forced
            }
        }
    }

    /// Cached forced-jump value, if it has been computed for this position.
    #[inline]
    pub fn cached_forced_jump(&self) -> Option<bool> {
        self.forced_jump
    }

    #[inline]
    pub fn has_jump(&self, src: Square) -> bool {
        has_jump(&self.board, self.side, src)
    }

    pub fn moves(&mut self) -> Vec<Move> {
        let forced = self.is_forced_jump();
        enumerate_moves_with_forced(&self.board, self.side, forced)
    }

    pub fn is_valid_move(&mut self, mv: &Move) -> bool {
        if mv.is_walk() {
            return self.board.get(mv.source()).side() == self.side
                && !self.is_forced_jump()
                && can_walk(&self.board, mv.source(), mv.destination());
        }
        is_valid_move(&self.board, self.side, mv)
    }

    #[inline]
    pub fn is_loser(&mut self) -> bool {
        self.moves().is_empty()
    }

    /// Plays `mv` for the side to move, then hands the turn to the opponent.
    /// The move is not validated.
    pub fn execute(&mut self, mv: &Move) {
        let log = execute(&mut self.board, mv);
        self.frames.push(TurnFrame {
            log,
            forced_jump: self.forced_jump.take(),
        });
        self.side = self.side.opposite();
    }

    /// Undoes the most recent `execute`, restoring squares, side and the
    /// forced-jump cache.
    pub fn revert_last(&mut self) -> CheckersResult<()> {
        let mut frame = self.frames.pop().ok_or(CheckersError::EmptyRevertStack)?;
        frame.log.unwind(&mut self.board);
        self.forced_jump = frame.forced_jump;
        self.side = self.side.opposite();
        Ok(())
    }
}

impl fmt::Display for TurnBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} to move", self.board, self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("location should parse")
    }

    #[test]
    fn execute_flips_side_and_revert_restores_everything() {
        let start = BoardState::new_game();
        let mut turn = TurnBoard::new(&start, Side::Red);
        assert!(!turn.is_forced_jump());

        let mv: Move = "c3-d4".parse().expect("move should parse");
        turn.execute(&mv);
        assert_eq!(turn.side(), Side::Black);
        assert_eq!(turn.cached_forced_jump(), None);

        turn.revert_last().expect("one move to revert");
        assert_eq!(turn.side(), Side::Red);
        assert_eq!(turn.board(), &start);
        assert_eq!(turn.cached_forced_jump(), Some(false));
    }

    #[test]
    fn cache_is_invalidated_by_each_execute() {
        let board = BoardState::from_placements(&[
            (sq("c3"), Piece::RedPawn),
            (sq("f6"), Piece::BlackPawn),
        ]);
        let mut turn = TurnBoard::new(&board, Side::Red);
        assert!(!turn.is_forced_jump());

        turn.execute(&"c3-d4".parse().expect("move should parse"));
        assert!(!turn.is_forced_jump());
        turn.execute(&"f6-e5".parse().expect("move should parse"));
        assert_eq!(turn.cached_forced_jump(), None);
        assert!(turn.is_forced_jump());
        assert_eq!(turn.moves().len(), 1);

        turn.revert_last().expect("black move to revert");
        assert_eq!(turn.cached_forced_jump(), Some(false));
        assert_eq!(turn.side(), Side::Black);
        turn.revert_last().expect("red move to revert");
        assert_eq!(turn.board(), &board);
    }

    #[test]
    fn revert_on_empty_stack_is_an_error() {
        let mut turn = TurnBoard::new(&BoardState::new_game(), Side::Red);
        assert!(matches!(
            turn.revert_last(),
            Err(CheckersError::EmptyRevertStack)
        ));
    }

    #[test]
    fn validity_agrees_with_free_function() {
        let board = BoardState::new_game();
        let mut turn = TurnBoard::new(&board, Side::Red);
        for mv in turn.moves() {
            assert!(turn.is_valid_move(&mv));
            assert!(is_valid_move(&board, Side::Red, &mv));
        }
        assert!(!turn.is_valid_move(&"f6-e5".parse().expect("move should parse")));
    }
}
