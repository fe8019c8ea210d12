//! Legality predicates shared by validation and move enumeration.
//!
//! Every check here reads the board only. `is_valid_move` replays jump
//! sequences on a private copy, so the caller's board is never touched.

use crate::game_state::checkers_rules::DIAGONALS;
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::jump;
use crate::moves::checkers_move::{diagonal_distance, Move};

/// True iff the move has exactly two squares one diagonal step apart.
#[inline]
pub fn is_walk(mv: &Move) -> bool {
    mv.is_walk()
}

/// A pawn may only travel towards the opponent's back rank.
#[inline]
fn direction_allowed(piece: Piece, src: Square, dst: Square) -> bool {
    match piece.forward_row_step() {
        0 => true,
        step => (square_row(dst) - square_row(src)).signum() == step,
    }
}

#[inline]
fn on_board(square: Square) -> bool {
    usize::from(square) < SQUARE_COUNT
}

/// Single diagonal step from `src` onto an empty `dst`.
pub fn can_walk(board: &BoardState, src: Square, dst: Square) -> bool {
    if !on_board(src) || !on_board(dst) {
        return false;
    }
    if diagonal_distance(src, dst) != Some(1) {
        return false;
    }
    let piece = board.get(src);
    if piece.is_blank() || !board.get(dst).is_blank() {
        return false;
    }
    direction_allowed(piece, src, dst)
}

/// Capture from `src` over an opposing piece onto an empty `dst` two
/// diagonal squares away.
pub fn can_jump(board: &BoardState, src: Square, dst: Square) -> bool {
    if !on_board(src) || !on_board(dst) {
        return false;
    }
    if diagonal_distance(src, dst) != Some(2) {
        return false;
    }
    let piece = board.get(src);
    if piece.is_blank() {
        return false;
    }
    let middle = board.get(jumped_square(src, dst));
    if middle.is_blank() || middle.side() == piece.side() {
        return false;
    }
    if !board.get(dst).is_blank() {
        return false;
    }
    direction_allowed(piece, src, dst)
}

/// Square captured by a jump between two squares two diagonal steps apart.
#[inline]
pub fn jumped_square(src: Square, dst: Square) -> Square {
    (src + dst) / 2
}

/// Whether the piece at `src` belongs to `side` and can capture along any
/// diagonal.
pub fn has_jump(board: &BoardState, side: Side, src: Square) -> bool {
    if board.get(src).side() != side || side == Side::Neither {
        return false;
    }
    DIAGONALS.iter().any(|&(d_row, d_col)| {
        offset_square(src, 2 * d_row, 2 * d_col).is_some_and(|dst| can_jump(board, src, dst))
    })
}

/// Whether `side` is obliged to capture this turn. Rescans the board on
/// every call; `TurnBoard` keeps a cached copy for search loops.
pub fn is_forced_jump(board: &BoardState, side: Side) -> bool {
    board.squares_of(side).any(|sq| has_jump(board, side, sq))
}

/// Full legality test for `mv` played by `side`.
///
/// A jump sequence must be legal step by step and must end on a square from
/// which no further capture is possible.
pub fn is_valid_move(board: &BoardState, side: Side, mv: &Move) -> bool {
    if side == Side::Neither || board.get(mv.source()).side() != side {
        return false;
    }

    if mv.is_walk() {
        return !is_forced_jump(board, side) && can_walk(board, mv.source(), mv.destination());
    }

    let mut scratch = *board;
    let mut log = RevertLog::new();
    for (src, dst) in mv.steps() {
        if !can_jump(&scratch, src, dst) {
            return false;
        }
        jump(&mut scratch, src, dst, &mut log);
    }
    !has_jump(&scratch, side, mv.destination())
}
