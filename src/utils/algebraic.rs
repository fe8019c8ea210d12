//! Square conversions for algebraic board coordinates.
//!
//! Converts between human-readable coordinates (e.g., `c3`) and internal
//! square indices. Rank 8 is array row 0, so `a8` is square 0 and `h1` is
//! square 63.

use crate::checkers_errors::CheckersError;
use crate::game_state::checkers_types::{Square, BOARD_HEIGHT, BOARD_WIDTH, SQUARE_COUNT};

/// Convert algebraic notation (for example: "c3") to a square index.
///
/// The file letter may be upper or lower case.
#[inline]
pub fn algebraic_to_square(location: &str) -> Result<Square, CheckersError> {
    let invalid = || CheckersError::InvalidLocation(location.to_owned());
    let bytes = location.as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    let col = usize::from(file - b'a');
    let row = BOARD_HEIGHT - usize::from(rank - b'0');
    Ok((row * BOARD_WIDTH + col) as Square)
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "c3").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, CheckersError> {
    if usize::from(square) >= SQUARE_COUNT {
        return Err(CheckersError::InvalidLocation(square.to_string()));
    }

    let col = usize::from(square) % BOARD_WIDTH;
    let row = usize::from(square) / BOARD_WIDTH;
    let file_char = char::from(b'a' + col as u8);
    let rank_char = char::from(b'0' + (BOARD_HEIGHT - row) as u8);

    Ok(format!("{file_char}{rank_char}"))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn corner_squares_convert() {
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), 0);
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse"), 63);
        assert_eq!(algebraic_to_square("B8").expect("B8 should parse"), 1);
        assert_eq!(square_to_algebraic(0).expect("0 should convert"), "a8");
        assert_eq!(square_to_algebraic(63).expect("63 should convert"), "h1");
    }

    #[test]
    fn every_square_round_trips() {
        for sq in 0..64u8 {
            let text = square_to_algebraic(sq).expect("square should convert");
            assert_eq!(algebraic_to_square(&text).expect("text should parse"), sq);
        }
    }

    #[test]
    fn malformed_locations_are_rejected() {
        for text in ["", "a", "a9", "a0", "i3", "c33", "3c"] {
            assert!(algebraic_to_square(text).is_err(), "{text} should not parse");
        }
        assert!(square_to_algebraic(64).is_err());
    }
}
