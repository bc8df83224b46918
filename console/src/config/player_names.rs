use rolling_common::config::Validate;
use rolling_common::games::rolling::Player;
use serde::{Deserialize, Serialize};

const MAX_NAME_LENGTH: usize = 24;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PlayerNames {
    pub x: String,
    pub o: String,
}

impl PlayerNames {
    pub fn name_of(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

impl Validate for PlayerNames {
    fn validate(&self) -> Result<(), String> {
        for (player, name) in [(Player::X, &self.x), (Player::O, &self.o)] {
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("Name for player {} must not be empty", player));
            }
            if name.chars().count() > MAX_NAME_LENGTH {
                return Err(format!(
                    "Name for player {} must not exceed {} characters",
                    player, MAX_NAME_LENGTH
                ));
            }
        }
        Ok(())
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            x: "Player X".to_string(),
            o: "Player O".to_string(),
        }
    }
}
