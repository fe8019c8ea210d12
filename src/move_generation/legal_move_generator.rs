//! Legal move enumeration.
//!
//! When a capture is available only maximal jump sequences are returned,
//! found by a depth-first search that plays each jump on the board and
//! undoes it on backtrack. Otherwise every single-step walk is returned.
//! Callers must not rely on the order of the result.

use crate::game_state::checkers_rules::DIAGONALS;
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::jump;
use crate::move_generation::legal_move_checks::{can_jump, can_walk, is_forced_jump};
use crate::moves::checkers_move::{Move, MoveBuilder};

/// All legal moves for `side`.
pub fn enumerate_moves(board: &BoardState, side: Side) -> Vec<Move> {
    if is_forced_jump(board, side) {
        find_jump_moves(board, side)
    } else {
        find_walk_moves(board, side)
    }
}

/// Moves for a side whose forced-jump status is already known.
pub fn enumerate_moves_with_forced(board: &BoardState, side: Side, forced_jump: bool) -> Vec<Move> {
    if forced_jump {
        find_jump_moves(board, side)
    } else {
        find_walk_moves(board, side)
    }
}

/// Every single diagonal step available to `side`, ignoring captures.
pub fn find_walk_moves(board: &BoardState, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for src in board.squares_of(side) {
        for &(d_row, d_col) in &DIAGONALS {
            let Some(dst) = offset_square(src, d_row, d_col) else {
                continue;
            };
            if can_walk(board, src, dst) {
                moves.push(Move::from_path(&[src, dst]));
            }
        }
    }
    moves
}

/// Every maximal capture sequence available to `side`.
pub fn find_jump_moves(board: &BoardState, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut scratch = *board;
    let mut log = RevertLog::new();
    let mut path = MoveBuilder::new();
    let sources: Vec<Square> = board.squares_of(side).collect();
    for src in sources {
        path.push(src);
        extend_jumps(&mut scratch, &mut path, &mut log, &mut moves);
        path.pop();
    }
    moves
}

fn extend_jumps(
    board: &mut BoardState,
    path: &mut MoveBuilder,
    log: &mut RevertLog,
    moves: &mut Vec<Move>,
) {
    let Some(from) = path.last() else {
        return;
    };
    let mut extended = false;
    for &(d_row, d_col) in &DIAGONALS {
        let Some(to) = offset_square(from, 2 * d_row, 2 * d_col) else {
            continue;
        };
        if !can_jump(board, from, to) {
            continue;
        }
        extended = true;
        let mark = log.len();
        path.push(to);
        jump(board, from, to, log);
        extend_jumps(board, path, log, moves);
        log.unwind_to(board, mark);
        path.pop();
    }
    if !extended {
        if let Some(mv) = path.to_move() {
            moves.push(mv);
        }
    }
}

/// A side with no legal move has lost.
#[inline]
pub fn is_loser(board: &BoardState, side: Side) -> bool {
    enumerate_moves(board, side).is_empty()
}
