//! Random-move player.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use log::{debug, info};
use rand::prelude::IndexedRandom;

use crate::engines::player_trait::{Player, PlayerOptions, SearchContext};
use crate::game_state::checkers_types::{BoardState, Side};
use crate::move_generation::legal_move_generator::enumerate_moves;

pub struct RandomPlayer {
    side: Side,
    options: PlayerOptions,
}

impl RandomPlayer {
    pub fn new(side: Side, options: &PlayerOptions) -> Self {
        Self {
            side,
            options: options.clone(),
        }
    }

    pub fn boxed(side: Side, options: &PlayerOptions) -> Box<dyn Player> {
        Box::new(Self::new(side, options))
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn calculate_move(&mut self, board: &BoardState, ctx: &SearchContext) {
        let legal_moves = enumerate_moves(board, self.side);
        let mut rng = rand::rng();
        let Some(picked) = legal_moves.as_slice().choose(&mut rng) else {
            return;
        };

        if self.options.verbose {
            info!("{} random_player legal_moves {} picked {picked}", self.side, legal_moves.len());
        } else {
            debug!("{} random_player legal_moves {} picked {picked}", self.side, legal_moves.len());
        }
        ctx.set_move(picked.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_valid_move;

    #[test]
    fn random_player_publishes_a_legal_move() {
        let board = BoardState::new_game();
        for side in Side::PLAYERS {
            let mut player = RandomPlayer::new(side, &PlayerOptions::default());
            let ctx = SearchContext::new();
            player.calculate_move(&board, &ctx);
            let mv = ctx.best_move().expect("opening has legal moves");
            assert!(is_valid_move(&board, side, &mv));
        }
    }
}
