//! Board text format.
//!
//! A board is written as 64 piece symbols (`- r R b B`) in row-major order,
//! rank 8 first. Whitespace between symbols is ignored when parsing; the
//! renderer separates symbols with spaces and ends each row with a newline.

use std::fs;
use std::path::Path;

use crate::checkers_errors::CheckersError;
use crate::game_state::checkers_types::*;

/// Parses board text. Fewer or more than 64 symbols, or any unknown
/// symbol, is an error.
pub fn parse_board_state(text: &str) -> Result<BoardState, CheckersError> {
    let mut board = BoardState::new_empty();
    let mut count = 0usize;
    for symbol in text.chars().filter(|c| !c.is_whitespace()) {
        let piece = Piece::from_symbol(symbol).ok_or(CheckersError::InvalidBoardSymbol(symbol))?;
        if count >= SQUARE_COUNT {
            return Err(CheckersError::BoardTooLong);
        }
        board.set(count as Square, piece);
        count += 1;
    }
    if count < SQUARE_COUNT {
        return Err(CheckersError::BoardTooShort(count));
    }
    Ok(board)
}

pub fn render_board_state(board: &BoardState) -> String {
    let mut out = String::with_capacity(SQUARE_COUNT * 2);
    for (index, piece) in board.as_slice().iter().enumerate() {
        out.push(piece.symbol());
        out.push(if index % BOARD_WIDTH == BOARD_WIDTH - 1 {
            '\n'
        } else {
            ' '
        });
    }
    out
}

/// Reads and parses a board file.
pub fn load_board_state(path: impl AsRef<Path>) -> Result<BoardState, CheckersError> {
    let text = fs::read_to_string(path)?;
    parse_board_state(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::checkers_rules::STARTING_POSITION;

    #[test]
    fn starting_position_renders_back_to_its_text() {
        let board = parse_board_state(STARTING_POSITION).expect("starting text should parse");
        assert_eq!(render_board_state(&board), STARTING_POSITION);
    }

    #[test]
    fn whitespace_is_ignored() {
        let compact: String = STARTING_POSITION.split_whitespace().collect();
        assert_eq!(compact.len(), 64);
        assert_eq!(
            parse_board_state(&compact).expect("compact text should parse"),
            BoardState::new_game()
        );
    }

    #[test]
    fn format_errors_are_reported() {
        assert!(matches!(
            parse_board_state("- r R b B"),
            Err(CheckersError::BoardTooShort(5))
        ));
        let too_long = format!("{STARTING_POSITION}-");
        assert!(matches!(
            parse_board_state(&too_long),
            Err(CheckersError::BoardTooLong)
        ));
        let bad = STARTING_POSITION.replacen('b', "x", 1);
        assert!(matches!(
            parse_board_state(&bad),
            Err(CheckersError::InvalidBoardSymbol('x'))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_board_state("/nonexistent/board.txt"),
            Err(CheckersError::Io(_))
        ));
    }
}
