//! Crate root module declarations for the Plum Checkers engine project.
//!
//! This file exposes the rules engine, the game model and its clocks, the
//! turn scheduling layer, the bundled players, and the text and config
//! helpers so the binary, tests, and benchmarks can import stable module
//! paths.

pub mod checkers_errors;

pub mod game_state {
    pub mod board_state;
    pub mod checkers_rules;
    pub mod checkers_types;
    pub mod undo_state;
}

pub mod moves {
    pub mod checkers_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod turn_board;
}

pub mod time_management {
    pub mod countdown_clock;
    pub mod game_clock;
}

pub mod game {
    pub mod game_event;
    pub mod game_model;
}

pub mod engines {
    pub mod player_greedy;
    pub mod player_random;
    pub mod player_registry;
    pub mod player_trait;
    pub mod turn_agent;
}

pub mod controller {
    pub mod game_runner;
    pub mod turn_controller;
}

pub mod utils {
    pub mod algebraic;
    pub mod board_text;
    pub mod event_logger;
    pub mod game_config;
}
