mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{empty_board, get_available_cells};
pub use bot_controller::{Agent, evaluate_board, PREFERRED_CELLS, SEARCH_DEPTH};
pub use game_state::{RollingGameState, SimulatedMove};
pub use types::{
    BOARD_SIDE, Board, CELL_COUNT, CENTER_CELL, DEFAULT_CAPACITY, Difficulty, MAX_CAPACITY, Mark,
    MoveResult, Player, WinningLine,
};
pub use win_detector::{WIN_COMBINATIONS, check_win, has_won};
