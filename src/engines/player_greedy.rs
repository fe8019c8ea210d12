//! One-ply material player.
//!
//! Plays every legal move on a scratch board, scores the result with
//! `material_score` from its own side's point of view, and picks uniformly
//! among the best. The first legal move is published immediately so a
//! cancelled search still has something to offer.

use log::{debug, info};
use rand::prelude::IndexedRandom;

use crate::engines::player_trait::{Player, PlayerOptions, SearchContext};
use crate::game_state::checkers_types::{BoardState, Side};
use crate::move_generation::turn_board::TurnBoard;
use crate::moves::checkers_move::Move;

pub struct GreedyPlayer {
    side: Side,
    options: PlayerOptions,
}

impl GreedyPlayer {
    pub fn new(side: Side, options: &PlayerOptions) -> Self {
        Self {
            side,
            options: options.clone(),
        }
    }

    pub fn boxed(side: Side, options: &PlayerOptions) -> Box<dyn Player> {
        Box::new(Self::new(side, options))
    }

    #[inline]
    fn score_for_side(&self, board: &BoardState) -> i32 {
        match self.side {
            Side::Black => -board.material_score(),
            _ => board.material_score(),
        }
    }
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn calculate_move(&mut self, board: &BoardState, ctx: &SearchContext) {
        let mut turn = TurnBoard::new(board, self.side);
        let legal_moves = turn.moves();
        let Some(first) = legal_moves.first() else {
            return;
        };
        ctx.set_move(first.clone());

        let mut best_value = i32::MIN;
        let mut best_moves: Vec<Move> = Vec::new();
        for mv in &legal_moves {
            if ctx.should_stop() {
                break;
            }
            turn.execute(mv);
            let value = self.score_for_side(turn.board());
            if turn.revert_last().is_err() {
                break;
            }

            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv.clone());
                ctx.set_move(mv.clone());
            } else if value == best_value {
                best_moves.push(mv.clone());
            }
        }

        let mut rng = rand::rng();
        if let Some(picked) = best_moves.as_slice().choose(&mut rng) {
            if self.options.verbose {
                info!("{} greedy_player score {best_value} picked {picked}", self.side);
            } else {
                debug!("{} greedy_player score {best_value} picked {picked}", self.side);
            }
            ctx.set_move(picked.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::checkers_types::Piece;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn greedy_prefers_the_longer_capture() {
        let sq = |text: &str| algebraic_to_square(text).expect("location should parse");
        let board = BoardState::from_placements(&[
            (sq("a1"), Piece::RedPawn),
            (sq("b2"), Piece::BlackPawn),
            (sq("d4"), Piece::BlackPawn),
            (sq("g3"), Piece::RedPawn),
            (sq("f4"), Piece::BlackPawn),
            (sq("c7"), Piece::BlackPawn),
        ]);
        let mut player = GreedyPlayer::new(Side::Red, &PlayerOptions::default());
        let ctx = SearchContext::new();
        player.calculate_move(&board, &ctx);
        let mv = ctx.best_move().expect("captures are available");
        assert_eq!(mv.to_string(), "a1-c3-e5");
    }

    #[test]
    fn greedy_stops_when_asked() {
        let mut player = GreedyPlayer::new(Side::Black, &PlayerOptions::default());
        let ctx = SearchContext::new();
        ctx.request_stop();
        player.calculate_move(&BoardState::new_game(), &ctx);
        assert!(ctx.best_move().is_some());
    }
}
