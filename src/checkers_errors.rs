//! Errors used throughout the checkers engine.
//!
//! This module defines the canonical error type returned by board parsing,
//! rules checks, the game model and the turn scheduling machinery. The enum
//! `CheckersError` is used as the single error type across the crate to
//! simplify propagation and matching.
//!
//! Usage guidelines:
//! - Parsing and loading functions return the format variants
//!   (`InvalidBoardSymbol`, `InvalidLocation`, ...). These are recoverable and
//!   suitable for presenting to end users.
//! - `IllegalMove` is returned by the game model when a submitted move fails
//!   validation. The turn controller converts it into a forfeit of the side
//!   that produced it.
//! - `WrongState`, `ResultNotReady` and `EmptyRevertStack` indicate a bug in
//!   the caller. They are reported loudly and never retried.

use thiserror::Error;

use crate::game::game_model::ModelState;
use crate::moves::checkers_move::Move;

/// Unified error type for the checkers engine.
#[derive(Debug, Error)]
pub enum CheckersError {
    /// A board text contained a character outside `- r R b B`.
    ///
    /// Payload: the offending character.
    #[error("'{0}' is not a valid checkers piece")]
    InvalidBoardSymbol(char),

    /// A board text ended before all 64 squares were read.
    ///
    /// Payload: the number of squares that were read.
    #[error("board text ended after {0} of 64 squares")]
    BoardTooShort(usize),

    /// A board text contained more than 64 piece symbols.
    #[error("board text has more than 64 squares")]
    BoardTooLong,

    /// A location could not be parsed from algebraic notation, or an index
    /// was outside the board.
    ///
    /// Payload: the original text for diagnostics.
    #[error("{0} is not a valid location")]
    InvalidLocation(String),

    /// A move string was malformed.
    #[error("{0} is not a valid move")]
    InvalidMoveText(String),

    /// A move must contain at least two locations.
    ///
    /// Payload: the number of locations supplied.
    #[error("a move needs at least two locations, got {0}")]
    MoveTooShort(usize),

    /// A side name other than `RED`, `BLK` or `NEITHER`.
    #[error("{0} is not a valid side")]
    InvalidSide(String),

    /// A submitted move failed validation for the active side.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// A lifecycle method was called from a state that does not allow it.
    #[error("cannot {operation} while the game is {state}")]
    WrongState {
        operation: &'static str,
        state: ModelState,
    },

    /// The final result of a computation was read before it finished.
    #[error("the computation has not finished yet")]
    ResultNotReady,

    /// `revert_last` was called with nothing to undo.
    #[error("the revert stack holds no executed move")]
    EmptyRevertStack,

    /// No player constructor is registered under this name.
    #[error("no player named {0} is registered")]
    UnknownPlayer(String),

    /// The configuration file could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a board or configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used by every fallible engine operation.
pub type CheckersResult<T> = Result<T, CheckersError>;
