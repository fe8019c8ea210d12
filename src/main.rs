//! Headless match runner: plays one game between two registered players.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use plum_checkers::controller::game_runner::GameRunner;
use plum_checkers::engines::player_registry::PlayerRegistry;
use plum_checkers::game::game_model::{GameModel, ModelState};
use plum_checkers::game_state::checkers_types::Side;
use plum_checkers::utils::board_text::render_board_state;
use plum_checkers::utils::event_logger::EventLogger;
use plum_checkers::utils::game_config::GameConfig;

const END_POLL: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player for RED (registry name)
    red: Option<String>,

    /// Player for BLACK (registry name)
    black: Option<String>,

    /// Per-turn limit in milliseconds for both sides; negative disables
    #[arg(long, allow_hyphen_values = true)]
    turntime: Option<i64>,

    /// Game time per side in milliseconds; negative disables
    #[arg(long, allow_hyphen_values = true)]
    gametime: Option<i64>,

    /// Board text file to start from
    #[arg(long)]
    initbs: Option<PathBuf>,

    /// Side to move first (RED or BLK)
    #[arg(long)]
    initside: Option<String>,

    /// Depth limits for RED and BLACK; negative means none
    #[arg(long, num_args = 2, value_names = ["RED", "BLACK"], allow_hyphen_values = true)]
    depthlimit: Option<Vec<i64>>,

    /// TOML config file; command-line options override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose players and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// List the registered players and exit
    #[arg(long)]
    list_players: bool,
}

impl Args {
    /// Loads the config file, if any, and layers the command line over it.
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(self, config: &mut GameConfig) {
        if let Some(red) = self.red {
            config.red_player = red;
        }
        if let Some(black) = self.black {
            config.black_player = black;
        }
        if let Some(ms) = self.turntime {
            config.turn_limit_ms = [ms; 2];
        }
        if let Some(ms) = self.gametime {
            config.game_time_ms = [ms; 2];
        }
        if self.initbs.is_some() {
            config.initial_board = self.initbs;
        }
        if let Some(side) = self.initside {
            config.initial_side = side;
        }
        if let Some([red, black]) = self.depthlimit.as_deref() {
            config.depth_limit = [*red, *black];
        }
        config.verbose |= self.verbose;
    }
}

fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool) {
    let log_level = log_level(verbose);
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();
}

fn result_text(model: &GameModel) -> &'static str {
    match (model.state(), model.winner()) {
        (ModelState::Finished, Some(Side::Neither)) => "DRAW",
        (ModelState::Finished, Some(side)) => side.as_str(),
        _ => "INVALID",
    }
}

fn main() {
    let args = Args::parse();
    let cli_verbose = args.verbose;
    let list_players = args.list_players;
    let config = args.into_config();
    init_logging(config.as_ref().map_or(cli_verbose, |config| config.verbose));

    if let Err(e) = config.and_then(|config| run(config, list_players)) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: GameConfig, list_players: bool) -> Result<()> {
    let registry = PlayerRegistry::with_defaults();
    if list_players {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut controller = config
        .build_controller(&registry)
        .context("failed to set up the game")?;
    controller
        .model_mut()
        .add_game_listener(EventLogger.listener());
    info!(
        "starting position, {} to move\n{}",
        controller.model().active_side().unwrap_or(Side::Neither),
        render_board_state(controller.model().board())
    );

    let runner = GameRunner::new(controller).context("failed to start the game timer")?;
    runner.loop_later(config.start_delay());
    while runner.wait_for_end(END_POLL).is_none() {}

    let (result, board) = runner.with_model(|model| (result_text(model), *model.board()));
    info!("final position\n{}", render_board_state(&board));
    println!("RESULT {result}");
    Ok(())
}
