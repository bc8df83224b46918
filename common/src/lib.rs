pub mod config;
pub mod games;
pub mod logger;

pub use games::SessionRng;
pub use games::rolling::{Agent, Difficulty, MoveResult, Player, RollingGameState};
