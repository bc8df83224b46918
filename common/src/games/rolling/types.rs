use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIDE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;
pub const CENTER_CELL: usize = 4;
pub const DEFAULT_CAPACITY: usize = 3;
pub const MAX_CAPACITY: usize = 4;

pub type Board = [Mark; CELL_COUNT];
pub type WinningLine = [usize; BOARD_SIDE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

impl FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(format!("Unknown player symbol '{}', expected X or O", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn owner(self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

/// Result of [`RollingGameState::apply_move`](super::RollingGameState::apply_move).
///
/// `evicted` is the cell that was cleared to make room for the new mark; renderers
/// use it to wipe that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Placed { evicted: Option<usize> },
    Rejected,
}

impl MoveResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, MoveResult::Placed { .. })
    }

    pub fn evicted(&self) -> Option<usize> {
        match self {
            MoveResult::Placed { evicted } => *evicted,
            MoveResult::Rejected => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent().opponent(), Player::O);
    }

    #[test]
    fn test_mark_owner() {
        assert_eq!(Mark::from(Player::X).owner(), Some(Player::X));
        assert_eq!(Mark::Empty.owner(), None);
    }

    #[test]
    fn test_difficulty_parses_case_insensitive() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_player_parses_lowercase() {
        assert_eq!("o".parse::<Player>(), Ok(Player::O));
        assert!("Z".parse::<Player>().is_err());
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let yaml = serde_yaml_ng::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(yaml.trim(), "hard");
    }
}
