//! Canonical checkers-rule constants.
//!
//! This module stores static rule-related literals such as the starting
//! position and the capture-free ply limit used for draws.

use crate::game_state::checkers_types::{Side, Square};

/// Side that makes the first move of a standard game.
pub const INITIAL_SIDE: Side = Side::Red;

/// Consecutive plies without a capture after which the game is drawn.
pub const DEFAULT_DRAW_PLY_LIMIT: u32 = 100;

/// Squares holding black pawns at the start. Red pawns mirror them through
/// the board centre (`63 - sq`).
pub const INITIAL_BLACK_SQUARES: [Square; 12] = [1, 3, 5, 7, 8, 10, 12, 14, 17, 19, 21, 23];

/// Starting position in board text format (rank 8 first).
pub const STARTING_POSITION: &str = "\
- b - b - b - b
b - b - b - b -
- b - b - b - b
- - - - - - - -
- - - - - - - -
r - r - r - r -
- r - r - r - r
r - r - r - r -
";

/// The four diagonal directions as `(d_row, d_col)`.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
