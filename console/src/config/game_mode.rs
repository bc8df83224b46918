use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum GameMode {
    /// Two people sharing the terminal.
    Pvp,
    /// One person against the bot.
    VsBot,
    /// Two bots, nobody at the keyboard.
    BotVsBot,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Pvp => "pvp",
            GameMode::VsBot => "vs_bot",
            GameMode::BotVsBot => "bot_vs_bot",
        };
        write!(f, "{}", name)
    }
}
