use rolling_common::config::Validate;
use rolling_common::games::rolling::{Difficulty, Player};
use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, GameMode, PlayerNames, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "rolling_console_config.yaml";
const MAX_BOT_DELAY_MS: u64 = 5000;
const MAX_TURNS_LIMIT: u32 = 1000;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Side played by the bot in `vs_bot` mode.
    pub bot_symbol: Player,
    pub player_names: PlayerNames,
    pub bot_delay_ms: u64,
    /// Bots can shuffle marks around forever; games stop after this many placements.
    pub max_turns: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.player_names.validate()?;
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms must not exceed {} (got {})",
                MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        if self.max_turns == 0 || self.max_turns > MAX_TURNS_LIMIT {
            return Err(format!(
                "max_turns must be between 1 and {} (got {})",
                MAX_TURNS_LIMIT, self.max_turns
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GameMode::VsBot,
            difficulty: Difficulty::Medium,
            bot_symbol: Player::O,
            player_names: PlayerNames::default(),
            bot_delay_ms: 500,
            max_turns: 200,
            seed: None,
        }
    }
}
