//! Move value type and the push/pop buffer used while searching jumps.
//!
//! A `Move` is an ordered sequence of at least two board squares. Once built
//! it cannot be changed; `MoveBuilder` is the mutable counterpart used by the
//! jump search, which extends and shrinks the path as it backtracks.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::checkers_errors::CheckersError;
use crate::game_state::checkers_types::{square_col, square_row, Square, SQUARE_COUNT};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Inline capacity covers every walk and jump sequences of up to seven captures.
type Path = SmallVec<[Square; 8]>;

/// Immutable ordered list of board squares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    path: Path,
}

impl Move {
    /// Builds a move, rejecting paths shorter than two squares or squares off
    /// the board.
    pub fn new<I>(locations: I) -> Result<Self, CheckersError>
    where
        I: IntoIterator<Item = Square>,
    {
        let path: Path = locations.into_iter().collect();
        if path.len() < 2 {
            return Err(CheckersError::MoveTooShort(path.len()));
        }
        if let Some(&bad) = path.iter().find(|&&sq| usize::from(sq) >= SQUARE_COUNT) {
            return Err(CheckersError::InvalidLocation(bad.to_string()));
        }
        Ok(Self { path })
    }

    /// Path known to be well formed by construction.
    #[inline]
    pub(crate) fn from_path(path: &[Square]) -> Self {
        debug_assert!(path.len() >= 2);
        Self {
            path: Path::from_slice(path),
        }
    }

    #[inline]
    pub fn locations(&self) -> &[Square] {
        &self.path
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always false: a move holds at least two squares.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    #[inline]
    pub fn source(&self) -> Square {
        self.path[0]
    }

    #[inline]
    pub fn destination(&self) -> Square {
        self.path[self.path.len() - 1]
    }

    /// Consecutive `(from, to)` pairs of the path.
    pub fn steps(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// True iff the move has exactly two squares one diagonal step apart.
    #[inline]
    pub fn is_walk(&self) -> bool {
        self.path.len() == 2 && diagonal_distance(self.path[0], self.path[1]) == Some(1)
    }
}

/// Number of diagonal steps between two squares, if they share a diagonal.
#[inline]
pub fn diagonal_distance(a: Square, b: Square) -> Option<u8> {
    let d_row = (square_row(a) - square_row(b)).unsigned_abs();
    let d_col = (square_col(a) - square_col(b)).unsigned_abs();
    (d_row == d_col && d_row > 0).then_some(d_row)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &sq) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            match square_to_algebraic(sq) {
                Ok(text) => f.write_str(&text)?,
                Err(_) => f.write_str("??")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = CheckersError;

    /// Parses `c3-d4` or `c3-e5-c7` style text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(CheckersError::InvalidMoveText(s.to_owned()));
        }
        let path = text
            .split('-')
            .map(algebraic_to_square)
            .collect::<Result<Path, _>>()
            .map_err(|_| CheckersError::InvalidMoveText(s.to_owned()))?;
        Move::new(path)
    }
}

/// Growable path used while searching capture sequences.
#[derive(Debug, Clone, Default)]
pub struct MoveBuilder {
    path: Path,
}

impl MoveBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, square: Square) {
        self.path.push(square);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Square> {
        self.path.pop()
    }

    #[inline]
    pub fn last(&self) -> Option<Square> {
        self.path.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Snapshot of the current path, if it is long enough to be a move.
    pub fn to_move(&self) -> Option<Move> {
        (self.path.len() >= 2).then(|| Move::from_path(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders_jump_sequence() {
        let mv: Move = "c3-e5-c7".parse().expect("jump text should parse");
        assert_eq!(mv.locations(), &[42, 28, 10]);
        assert_eq!(mv.to_string(), "c3-e5-c7");
        assert!(!mv.is_walk());
    }

    #[test]
    fn walk_detection_requires_adjacent_diagonal() {
        let walk: Move = "c3-d4".parse().expect("walk should parse");
        assert!(walk.is_walk());
        let two_apart: Move = "c3-e5".parse().expect("jump should parse");
        assert!(!two_apart.is_walk());
        let straight: Move = "c3-c4".parse().expect("syntax is still valid");
        assert!(!straight.is_walk());
    }

    #[test]
    fn rejects_short_or_malformed_moves() {
        assert!(matches!(
            "c3".parse::<Move>(),
            Err(CheckersError::MoveTooShort(1))
        ));
        assert!("c3-".parse::<Move>().is_err());
        assert!("c3_d4".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        assert!(Move::new([1, 64]).is_err());
    }

    #[test]
    fn builder_push_pop_tracks_path() {
        let mut builder = MoveBuilder::new();
        builder.push(42);
        assert!(builder.to_move().is_none());
        builder.push(28);
        builder.push(10);
        assert_eq!(builder.to_move().expect("path is long enough").len(), 3);
        assert_eq!(builder.pop(), Some(10));
        assert_eq!(builder.last(), Some(28));
    }
}
