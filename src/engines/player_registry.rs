//! Name-to-constructor table for players.

use std::collections::BTreeMap;

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::engines::player_greedy::GreedyPlayer;
use crate::engines::player_random::RandomPlayer;
use crate::engines::player_trait::{Player, PlayerOptions};
use crate::game_state::checkers_types::Side;

pub type PlayerFactory = fn(Side, &PlayerOptions) -> Box<dyn Player>;

#[derive(Clone, Default)]
pub struct PlayerRegistry {
    factories: BTreeMap<String, PlayerFactory>,
}

impl PlayerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled `Random` and `Greedy` players.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("Random", RandomPlayer::boxed);
        registry.register("Greedy", GreedyPlayer::boxed);
        registry
    }

    /// Adds or replaces the constructor registered under `name`.
    pub fn register(&mut self, name: &str, factory: PlayerFactory) {
        self.factories.insert(name.to_owned(), factory);
    }

    pub fn create(
        &self,
        name: &str,
        side: Side,
        options: &PlayerOptions,
    ) -> CheckersResult<Box<dyn Player>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CheckersError::UnknownPlayer(name.to_owned()))?;
        Ok(factory(side, options))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}
