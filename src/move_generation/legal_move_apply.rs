//! Reversible board mutations.
//!
//! Each primitive records the prior content of every square it overwrites
//! into a `RevertLog`; `revert` replays that log backwards. None of these
//! functions validate their input.

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_checks::jumped_square;
use crate::moves::checkers_move::Move;

/// Moves the piece on `src` to `dst`.
pub fn walk(board: &mut BoardState, src: Square, dst: Square, log: &mut RevertLog) {
    log.record(board, src);
    log.record(board, dst);
    board.set(dst, board.get(src));
    board.set(src, Piece::Blank);
}

/// Moves the piece on `src` to `dst` and removes the piece it jumps over.
pub fn jump(board: &mut BoardState, src: Square, dst: Square, log: &mut RevertLog) {
    let middle = jumped_square(src, dst);
    log.record(board, src);
    log.record(board, dst);
    log.record(board, middle);
    board.set(dst, board.get(src));
    board.set(src, Piece::Blank);
    board.set(middle, Piece::Blank);
}

/// Promotes red pawns on the top row and black pawns on the bottom row.
pub fn crown_kings(board: &mut BoardState, log: &mut RevertLog) {
    let last = (SQUARE_COUNT - BOARD_WIDTH) as Square;
    for col in 0..BOARD_WIDTH as Square {
        if board.get(col) == Piece::RedPawn {
            log.record(board, col);
            board.set(col, Piece::RedKing);
        }
        if board.get(last + col) == Piece::BlackPawn {
            log.record(board, last + col);
            board.set(last + col, Piece::BlackKing);
        }
    }
}

/// Plays `mv` (a walk, or every jump in sequence) and crowns afterwards.
///
/// Pawns reaching the back rank mid-sequence are only crowned once the whole
/// sequence has been played. The returned log undoes exactly this call.
pub fn execute(board: &mut BoardState, mv: &Move) -> RevertLog {
    let mut log = RevertLog::new();
    if mv.is_walk() {
        walk(board, mv.source(), mv.destination(), &mut log);
    } else {
        for (src, dst) in mv.steps() {
            jump(board, src, dst, &mut log);
        }
    }
    crown_kings(board, &mut log);
    log
}

/// Restores every square recorded in `log`, consuming it.
#[inline]
pub fn revert(board: &mut BoardState, mut log: RevertLog) {
    log.unwind(board);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("location should parse")
    }

    #[test]
    fn double_jump_removes_both_captures_and_reverts() {
        let original = BoardState::from_placements(&[
            (sq("a1"), Piece::RedPawn),
            (sq("b2"), Piece::BlackPawn),
            (sq("d4"), Piece::BlackPawn),
        ]);
        let mut board = original;
        let mv: Move = "a1-c3-e5".parse().expect("move should parse");

        let log = execute(&mut board, &mv);
        assert_eq!(board.get(sq("e5")), Piece::RedPawn);
        assert_eq!(board.get(sq("a1")), Piece::Blank);
        assert_eq!(board.get(sq("b2")), Piece::Blank);
        assert_eq!(board.get(sq("d4")), Piece::Blank);
        assert_eq!(board.count(Piece::BlackPawn), 0);

        revert(&mut board, log);
        assert_eq!(board, original);
    }

    #[test]
    fn pawn_reaching_back_rank_is_crowned_and_revert_restores_pawn() {
        let original = BoardState::from_placements(&[(sq("b7"), Piece::RedPawn)]);
        let mut board = original;
        let mv: Move = "b7-a8".parse().expect("move should parse");

        let log = execute(&mut board, &mv);
        assert_eq!(board.get(sq("a8")), Piece::RedKing);

        revert(&mut board, log);
        assert_eq!(board.get(sq("b7")), Piece::RedPawn);
        assert_eq!(board, original);
    }

    #[test]
    fn black_pawn_crowns_on_bottom_row() {
        let mut board = BoardState::from_placements(&[(sq("c2"), Piece::BlackPawn)]);
        let mv: Move = "c2-d1".parse().expect("move should parse");
        let _ = execute(&mut board, &mv);
        assert_eq!(board.get(sq("d1")), Piece::BlackKing);
    }

    #[test]
    fn crowning_waits_for_end_of_sequence() {
        let original = BoardState::from_placements(&[
            (sq("d6"), Piece::RedPawn),
            (sq("c7"), Piece::BlackPawn),
            (sq("a7"), Piece::BlackPawn),
        ]);
        let mut board = original;
        let mv: Move = "d6-b8".parse().expect("move should parse");
        let log = execute(&mut board, &mv);
        assert_eq!(board.get(sq("b8")), Piece::RedKing);
        assert_eq!(board.get(sq("a7")), Piece::BlackPawn);
        revert(&mut board, log);
        assert_eq!(board, original);
    }
}
