//! Core value types for the checkers board.
//!
//! Pieces are encoded so that a pawn and a king of the same side share the
//! same residue modulo 4, and that residue equals the side index. The blank
//! square has residue 2, which is also the index of `Side::Neither`.

use std::fmt;
use std::str::FromStr;

use crate::checkers_errors::CheckersError;

pub use crate::game_state::board_state::BoardState;
pub use crate::game_state::undo_state::RevertLog;

/// Board width in squares.
pub const BOARD_WIDTH: usize = 8;
/// Board height in squares.
pub const BOARD_HEIGHT: usize = 8;
/// Number of addressable board indices.
pub const SQUARE_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// Board square index (`0..=63`, row-major, row 0 is rank 8).
pub type Square = u8;

/// Side of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red = 0,
    Black = 1,
    /// Used for draws and unknown results, never for an actual mover.
    Neither = 2,
}

impl Side {
    /// Both sides that can move, in index order.
    pub const PLAYERS: [Side; 2] = [Side::Red, Side::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
            Side::Neither => Side::Neither,
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Red => "RED",
            Side::Black => "BLK",
            Side::Neither => "NEITHER",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RED" => Ok(Side::Red),
            "BLK" => Ok(Side::Black),
            "NEITHER" => Ok(Side::Neither),
            _ => Err(CheckersError::InvalidSide(s.to_owned())),
        }
    }
}

/// Content of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Piece {
    RedPawn = 0,
    BlackPawn = 1,
    #[default]
    Blank = 2,
    RedKing = 4,
    BlackKing = 5,
}

impl Piece {
    /// Side owning this piece, `Side::Neither` for a blank square.
    #[inline]
    pub const fn side(self) -> Side {
        match (self as u8) % 4 {
            0 => Side::Red,
            1 => Side::Black,
            _ => Side::Neither,
        }
    }

    #[inline]
    pub const fn is_blank(self) -> bool {
        matches!(self, Piece::Blank)
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        matches!(self, Piece::RedPawn | Piece::BlackPawn)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::RedKing | Piece::BlackKing)
    }

    /// Row step a pawn of this colour must take; kings and blanks return 0.
    #[inline]
    pub const fn forward_row_step(self) -> i8 {
        match self {
            Piece::RedPawn => -1,
            Piece::BlackPawn => 1,
            _ => 0,
        }
    }

    /// Text symbol used by the board format.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Piece::RedPawn => 'r',
            Piece::RedKing => 'R',
            Piece::BlackPawn => 'b',
            Piece::BlackKing => 'B',
            Piece::Blank => '-',
        }
    }

    #[inline]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(Piece::Blank),
            'r' => Some(Piece::RedPawn),
            'R' => Some(Piece::RedKing),
            'b' => Some(Piece::BlackPawn),
            'B' => Some(Piece::BlackKing),
            _ => None,
        }
    }
}

#[inline]
pub const fn square_row(square: Square) -> i8 {
    (square as usize / BOARD_WIDTH) as i8
}

#[inline]
pub const fn square_col(square: Square) -> i8 {
    (square as usize % BOARD_WIDTH) as i8
}

/// Square reached by stepping `(d_row, d_col)` from `square`, if on the board.
#[inline]
pub fn offset_square(square: Square, d_row: i8, d_col: i8) -> Option<Square> {
    if usize::from(square) >= SQUARE_COUNT {
        return None;
    }
    let row = square_row(square) + d_row;
    let col = square_col(square) + d_col;
    if !(0..BOARD_HEIGHT as i8).contains(&row) || !(0..BOARD_WIDTH as i8).contains(&col) {
        return None;
    }
    Some((row as usize * BOARD_WIDTH + col as usize) as Square)
}

/// True for the 32 dark squares pieces may stand on.
#[inline]
pub const fn is_playable_square(square: Square) -> bool {
    (square_row(square) + square_col(square)) % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_residue_matches_side() {
        assert_eq!(Piece::RedPawn.side(), Side::Red);
        assert_eq!(Piece::RedKing.side(), Side::Red);
        assert_eq!(Piece::BlackPawn.side(), Side::Black);
        assert_eq!(Piece::BlackKing.side(), Side::Black);
        assert_eq!(Piece::Blank.side(), Side::Neither);
        assert!(Piece::Blank.is_blank());
    }

    #[test]
    fn side_text_round_trip() {
        for side in [Side::Red, Side::Black, Side::Neither] {
            let parsed: Side = side.to_string().parse().expect("side should parse");
            assert_eq!(parsed, side);
        }
        assert!("BLACK".parse::<Side>().is_err());
    }

    #[test]
    fn offset_square_stays_on_board() {
        assert_eq!(offset_square(9, -1, -1), Some(0));
        assert_eq!(offset_square(8, 1, -1), None);
        assert_eq!(offset_square(7, -1, 1), None);
        assert_eq!(offset_square(63, 1, 1), None);
        assert_eq!(offset_square(64, 0, 0), None);
    }

    #[test]
    fn playable_squares_are_dark() {
        assert!(is_playable_square(1));
        assert!(!is_playable_square(0));
        assert!(is_playable_square(8));
        assert_eq!((0..64u8).filter(|&sq| is_playable_square(sq)).count(), 32);
    }
}
