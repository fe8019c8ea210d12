//! Undo records for board mutations.

use crate::game_state::checkers_types::{BoardState, Piece, Square};

/// Single undo record: the previous content of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoEntry {
    pub square: Square,
    pub previous: Piece,
}

/// Ordered record of square overwrites produced by `walk`, `jump` and
/// crowning. Replaying it backwards restores the board exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevertLog {
    entries: Vec<UndoEntry>,
}

impl RevertLog {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(16),
        }
    }

    /// Records the current content of `square` before it is overwritten.
    #[inline]
    pub fn record(&mut self, board: &BoardState, square: Square) {
        self.entries.push(UndoEntry {
            square,
            previous: board.get(square),
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pops entries until only `len` remain, restoring each onto `board`.
    pub fn unwind_to(&mut self, board: &mut BoardState, len: usize) {
        while self.entries.len() > len {
            if let Some(entry) = self.entries.pop() {
                board.set(entry.square, entry.previous);
            }
        }
    }

    /// Restores every recorded square, newest first, and empties the log.
    #[inline]
    pub fn unwind(&mut self, board: &mut BoardState) {
        self.unwind_to(board, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwind_to_restores_only_entries_above_the_mark() {
        let mut board = BoardState::new_empty();
        let mut log = RevertLog::new();

        log.record(&board, 10);
        board.set(10, Piece::BlackPawn);
        let mark = log.len();
        log.record(&board, 10);
        board.set(10, Piece::BlackKing);
        log.record(&board, 21);
        board.set(21, Piece::RedPawn);

        log.unwind_to(&mut board, mark);
        assert_eq!(log.len(), mark);
        assert_eq!(board.get(10), Piece::BlackPawn);
        assert!(board.get(21).is_blank());

        log.unwind(&mut board);
        assert!(log.is_empty());
        assert_eq!(board, BoardState::new_empty());
    }
}
