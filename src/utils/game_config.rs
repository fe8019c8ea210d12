//! Match configuration.
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! below. Time limits and depth limits are given per side as `[red, black]`
//! and a negative value disables the limit.
//!
//! ```toml
//! red_player = "Greedy"
//! black_player = "Random"
//! turn_limit_ms = [3000, 3000]
//! game_time_ms = [7200000, 7200000]
//! draw_ply_limit = 100
//! initial_board = "boards/endgame.txt"
//! initial_side = "BLK"
//! depth_limit = [4, -1]
//! verbose = false
//! start_delay_ms = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::controller::turn_controller::TurnController;
use crate::engines::player_registry::PlayerRegistry;
use crate::engines::player_trait::PlayerOptions;
use crate::engines::turn_agent::share_player;
use crate::game::game_model::GameModel;
use crate::game_state::checkers_rules::{DEFAULT_DRAW_PLY_LIMIT, INITIAL_SIDE};
use crate::game_state::checkers_types::{BoardState, Side};
use crate::time_management::game_clock::GameClock;
use crate::utils::board_text::load_board_state;

pub const DEFAULT_TURN_LIMIT_MS: i64 = 3_000;
pub const DEFAULT_GAME_TIME_MS: i64 = 2 * 60 * 60 * 1000;
pub const DEFAULT_START_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub red_player: String,
    pub black_player: String,
    pub turn_limit_ms: [i64; 2],
    pub game_time_ms: [i64; 2],
    pub draw_ply_limit: u32,
    pub initial_board: Option<PathBuf>,
    pub initial_side: String,
    pub depth_limit: [i64; 2],
    pub verbose: bool,
    pub start_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            red_player: "Random".to_owned(),
            black_player: "Greedy".to_owned(),
            turn_limit_ms: [DEFAULT_TURN_LIMIT_MS; 2],
            game_time_ms: [DEFAULT_GAME_TIME_MS; 2],
            draw_ply_limit: DEFAULT_DRAW_PLY_LIMIT,
            initial_board: None,
            initial_side: INITIAL_SIDE.to_string(),
            depth_limit: [-1; 2],
            verbose: false,
            start_delay_ms: DEFAULT_START_DELAY_MS,
        }
    }
}

#[inline]
fn limit_from_ms(ms: i64) -> Option<Duration> {
    u64::try_from(ms).ok().map(Duration::from_millis)
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> CheckersResult<Self> {
        toml::from_str(text).map_err(|e| CheckersError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> CheckersResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn player_name(&self, side: Side) -> &str {
        match side {
            Side::Black => &self.black_player,
            _ => &self.red_player,
        }
    }

    pub fn turn_limit(&self, side: Side) -> Option<Duration> {
        self.turn_limit_ms
            .get(side.index())
            .and_then(|&ms| limit_from_ms(ms))
    }

    pub fn game_time(&self, side: Side) -> Option<Duration> {
        self.game_time_ms
            .get(side.index())
            .and_then(|&ms| limit_from_ms(ms))
    }

    pub fn player_options(&self, side: Side) -> PlayerOptions {
        PlayerOptions {
            depth_limit: self
                .depth_limit
                .get(side.index())
                .and_then(|&d| u32::try_from(d).ok()),
            verbose: self.verbose,
        }
    }

    #[inline]
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn first_side(&self) -> CheckersResult<Side> {
        match self.initial_side.parse()? {
            Side::Neither => Err(CheckersError::InvalidSide(self.initial_side.clone())),
            side => Ok(side),
        }
    }

    /// The configured board file, or the standard opening.
    pub fn initial_board_state(&self) -> CheckersResult<BoardState> {
        match &self.initial_board {
            Some(path) => load_board_state(path),
            None => Ok(BoardState::new_game()),
        }
    }

    /// Builds the players, the model and its clocks for one game.
    pub fn build_controller(&self, registry: &PlayerRegistry) -> CheckersResult<TurnController> {
        let side = self.first_side()?;
        let board = self.initial_board_state()?;
        let [red, black] = Side::PLAYERS
            .map(|s| registry.create(self.player_name(s), s, &self.player_options(s)));
        let (red, black) = (red?, black?);

        let mut model = GameModel::new(
            [red.name().to_owned(), black.name().to_owned()],
            board,
            side,
        );
        model.set_clock(GameClock::new(Side::PLAYERS.map(|s| self.game_time(s)), side));
        model.set_draw_ply_limit(self.draw_ply_limit);

        Ok(TurnController::new(
            model,
            [share_player(red), share_player(black)],
            Side::PLAYERS.map(|s| self.turn_limit(s)),
        ))
    }
}
