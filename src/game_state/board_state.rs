//! Mutable board container.
//!
//! `BoardState` is the central model for the engine. It stores one `Piece`
//! per addressable index; only the 32 dark squares are ever occupied in a
//! legal game, but all 64 indices are addressed so square arithmetic stays
//! trivial.

use std::fmt;
use std::str::FromStr;

use crate::checkers_errors::CheckersError;
use crate::game_state::checkers_rules::INITIAL_BLACK_SQUARES;
use crate::game_state::checkers_types::*;
use crate::utils::board_text::{parse_board_state, render_board_state};

/// The 64 board squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    squares: [Piece; SQUARE_COUNT],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            squares: [Piece::Blank; SQUARE_COUNT],
        }
    }
}

impl BoardState {
    /// A board with no pieces.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::new_empty();
        for &sq in &INITIAL_BLACK_SQUARES {
            board.squares[usize::from(sq)] = Piece::BlackPawn;
            board.squares[SQUARE_COUNT - 1 - usize::from(sq)] = Piece::RedPawn;
        }
        board
    }

    /// Builds a board from `(square, piece)` placements on an empty board.
    pub fn from_placements(placements: &[(Square, Piece)]) -> Self {
        let mut board = Self::new_empty();
        for &(sq, piece) in placements {
            board.set(sq, piece);
        }
        board
    }

    #[inline]
    pub fn from_text(text: &str) -> Result<Self, CheckersError> {
        parse_board_state(text)
    }

    #[inline]
    pub fn to_text(&self) -> String {
        render_board_state(self)
    }

    /// Piece at `square`; out-of-range indices read as blank.
    #[inline]
    pub fn get(&self, square: Square) -> Piece {
        self.squares
            .get(usize::from(square))
            .copied()
            .unwrap_or(Piece::Blank)
    }

    /// Overwrites `square`. Out-of-range indices are ignored.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        if let Some(slot) = self.squares.get_mut(usize::from(square)) {
            *slot = piece;
        }
    }

    /// Squares holding a piece of `side`.
    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(move |(_, piece)| !piece.is_blank() && piece.side() == side)
            .map(|(sq, _)| sq as Square)
    }

    /// Number of pieces of the given kind on the board.
    pub fn count(&self, piece: Piece) -> usize {
        self.squares.iter().filter(|&&p| p == piece).count()
    }

    /// Material balance from red's point of view: pawns count one, kings two.
    pub fn material_score(&self) -> i32 {
        self.squares
            .iter()
            .map(|piece| match piece {
                Piece::RedPawn => 1,
                Piece::RedKing => 2,
                Piece::BlackPawn => -1,
                Piece::BlackKing => -2,
                Piece::Blank => 0,
            })
            .sum()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Piece] {
        &self.squares
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for BoardState {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_board_state(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::checkers_rules::STARTING_POSITION;

    #[test]
    fn new_game_matches_starting_text() {
        let parsed = BoardState::from_text(STARTING_POSITION).expect("starting text should parse");
        assert_eq!(BoardState::new_game(), parsed);
    }

    #[test]
    fn new_game_places_twelve_pawns_per_side_on_dark_squares() {
        let board = BoardState::new_game();
        assert_eq!(board.count(Piece::RedPawn), 12);
        assert_eq!(board.count(Piece::BlackPawn), 12);
        assert!(board.squares_of(Side::Red).all(is_playable_square));
        assert!(board.squares_of(Side::Black).all(is_playable_square));
    }

    #[test]
    fn material_score_weights_kings_double() {
        assert_eq!(BoardState::new_game().material_score(), 0);
        let board = BoardState::from_placements(&[
            (1, Piece::RedKing),
            (10, Piece::BlackPawn),
            (12, Piece::RedPawn),
        ]);
        assert_eq!(board.material_score(), 2);
    }

    #[test]
    fn out_of_range_access_is_blank() {
        let mut board = BoardState::new_game();
        board.set(64, Piece::RedKing);
        assert_eq!(board.get(64), Piece::Blank);
        assert_eq!(board, BoardState::new_game());
    }
}
