mod config;
mod game_mode;
mod player_names;

pub(crate) use rolling_common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use config::{Config, get_config_manager};
pub use game_mode::GameMode;
use player_names::PlayerNames;
