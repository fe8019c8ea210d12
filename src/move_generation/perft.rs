//! Move-generation node counting.
//!
//! Walks the legal move tree to a fixed depth on a `TurnBoard`, counting
//! leaves, captures and promotions. Used by regression tests and the
//! criterion bench.

use crate::checkers_errors::CheckersResult;
use crate::game_state::checkers_types::*;
use crate::move_generation::turn_board::TurnBoard;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
    }
}

/// Leaf statistics of the move tree below `board` with `side` to move.
pub fn perft(board: &BoardState, side: Side, depth: u8) -> CheckersResult<PerftCounts> {
    let mut turn = TurnBoard::new(board, side);
    perft_recurse(&mut turn, depth)
}

fn perft_recurse(turn: &mut TurnBoard, depth: u8) -> CheckersResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in turn.moves() {
        let kings_before = king_count(turn.board());
        let pieces_before = piece_count(turn.board());
        turn.execute(&mv);
        if depth == 1 {
            total.nodes += 1;
            if piece_count(turn.board()) < pieces_before {
                total.captures += 1;
            }
            if king_count(turn.board()) > kings_before {
                total.promotions += 1;
            }
        } else {
            total.merge(perft_recurse(turn, depth - 1)?);
        }
        turn.revert_last()?;
    }
    Ok(total)
}

#[inline]
fn king_count(board: &BoardState) -> usize {
    board.count(Piece::RedKing) + board.count(Piece::BlackKing)
}

#[inline]
fn piece_count(board: &BoardState) -> usize {
    SQUARE_COUNT - board.count(Piece::Blank)
}
