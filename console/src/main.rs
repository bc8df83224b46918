mod config;
mod display;
mod input;
mod match_runner;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use rolling_common::config::Validate;
use rolling_common::games::SessionRng;
use rolling_common::games::rolling::{Difficulty, Player};
use rolling_common::{log, logger};

use config::{Config, ConfigManager, GameMode, get_config_manager};
use input::LineInput;
use match_runner::{MatchOutcome, MatchRunner, SeriesTally, shows_board};

#[derive(Parser)]
#[command(name = "rolling_console", about = "Rolling tic-tac-toe: three marks each, the oldest one vanishes")]
struct Args {
    /// YAML config to use instead of the one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    mode: Option<GameMode>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    bot_symbol: Option<Player>,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of games to play back to back; a tally is printed when more than one.
    #[arg(long, default_value_t = 1)]
    games: u32,
    #[arg(long)]
    use_log_prefix: bool,
    /// Write the effective config (after command line overrides) back to the config file.
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(bot_symbol) = self.bot_symbol {
            config.bot_symbol = bot_symbol;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let manager = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path.clone()),
        None => get_config_manager(),
    };
    let mut config = manager.get_config().inspect_err(|e| log!("Failed to load config: {}", e))?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.save_config {
        manager.set_config(&config)?;
        log!("Config saved to {}", manager.content_provider().file_path().display());
    }

    let rng = SessionRng::from_optional_seed(config.seed);
    log!(
        "Mode {}, difficulty {}, seed {}",
        config.mode,
        config.difficulty,
        rng.seed()
    );

    let stdin = io::stdin();
    let input = LineInput::new(stdin.lock());
    let mut runner = MatchRunner::new(&config, rng, input, io::stdout())
        .with_board_rendering(shows_board(config.mode, args.games));

    let mut tally = SeriesTally::default();
    for game in 1..=args.games {
        let outcome = runner.play_game()?;
        let (x_count, o_count) = runner.state().move_counts();
        log!("Game {}: {} (X {} marks, O {} marks on board)", game, outcome, x_count, o_count);
        tally.record(&outcome);
        if matches!(outcome, MatchOutcome::Quit { .. }) {
            break;
        }
    }

    if args.games > 1 {
        println!("{}", tally);
    }

    Ok(())
}
