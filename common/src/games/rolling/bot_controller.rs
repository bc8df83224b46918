use crate::games::SessionRng;
use super::board::get_available_cells;
use super::game_state::RollingGameState;
use super::types::{Board, CENTER_CELL, Difficulty, Player};
use super::win_detector::{WIN_COMBINATIONS, has_won};

/// Fallback order for the medium bot: center, corners, edges.
pub const PREFERRED_CELLS: [usize; 9] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

/// Plies searched by the hard bot before falling back to [`evaluate_board`]. Marks keep
/// rotating, so the game tree never bottoms out in a full board.
pub const SEARCH_DEPTH: i32 = 3;

const WIN_SCORE: i32 = 10;
const CENTER_BONUS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    symbol: Player,
    opponent: Player,
    difficulty: Difficulty,
}

impl Agent {
    pub fn new(symbol: Player, difficulty: Difficulty) -> Self {
        Self {
            symbol,
            opponent: symbol.opponent(),
            difficulty,
        }
    }

    pub fn symbol(&self) -> Player {
        self.symbol
    }

    /// Picks a cell for this agent's symbol, or `None` when the board has no free cell.
    /// Only the easy tier draws from `rng`.
    pub fn choose_move(&self, state: &RollingGameState, rng: &mut SessionRng) -> Option<usize> {
        let available_cells = state.available_cells();
        if available_cells.is_empty() {
            return None;
        }

        match self.difficulty {
            Difficulty::Easy => self.calculate_random_move(&available_cells, rng),
            Difficulty::Medium => Some(self.calculate_greedy_move(state, &available_cells)),
            Difficulty::Hard => Some(self.calculate_minimax_move(state, &available_cells)),
        }
    }

    fn calculate_random_move(&self, available_cells: &[usize], rng: &mut SessionRng) -> Option<usize> {
        rng.choose(available_cells).copied()
    }

    fn calculate_greedy_move(&self, state: &RollingGameState, available_cells: &[usize]) -> usize {
        if let Some(cell) = find_winning_move(state, self.symbol, available_cells) {
            return cell;
        }

        if let Some(cell) = find_winning_move(state, self.opponent, available_cells) {
            return cell;
        }

        PREFERRED_CELLS
            .iter()
            .copied()
            .find(|cell| available_cells.contains(cell))
            .unwrap_or(available_cells[0])
    }

    fn calculate_minimax_move(&self, state: &RollingGameState, available_cells: &[usize]) -> usize {
        let mut best_cell = available_cells[0];
        let mut best_score = i32::MIN;

        for &cell in available_cells {
            let score = self.minimax(state, cell, self.symbol, 0, false);
            if score > best_score {
                best_score = score;
                best_cell = cell;
            }
        }

        best_cell
    }

    /// Scores `mover` playing `cell`. Every ply is simulated against the real position in
    /// `state`; only the set of replies comes from the simulated board.
    /// `is_maximizing` tells whose reply comes next: this agent's when true.
    fn minimax(
        &self,
        state: &RollingGameState,
        cell: usize,
        mover: Player,
        depth: i32,
        is_maximizing: bool,
    ) -> i32 {
        let board = state.simulate_move(cell, mover).board;

        if has_won(&board, self.symbol) {
            return WIN_SCORE - depth;
        }
        if has_won(&board, self.opponent) {
            return depth - WIN_SCORE;
        }

        if depth >= SEARCH_DEPTH {
            return evaluate_board(&board, self.symbol);
        }

        let replies = get_available_cells(&board);
        if replies.is_empty() {
            return 0;
        }

        if is_maximizing {
            replies
                .iter()
                .map(|&reply| self.minimax(state, reply, self.symbol, depth + 1, false))
                .max()
                .unwrap_or(0)
        } else {
            replies
                .iter()
                .map(|&reply| self.minimax(state, reply, self.opponent, depth + 1, true))
                .min()
                .unwrap_or(0)
        }
    }
}

fn find_winning_move(state: &RollingGameState, player: Player, cells: &[usize]) -> Option<usize> {
    cells
        .iter()
        .copied()
        .find(|&cell| has_won(&state.simulate_move(cell, player).board, player))
}

/// Static score of `board` from `bot`'s point of view: every line still open to one side
/// counts that side's marks in it, and holding the center adds a bonus.
pub fn evaluate_board(board: &Board, bot: Player) -> i32 {
    let bot_mark = bot.mark();
    let opponent_mark = bot.opponent().mark();
    let mut score = 0;

    for line in WIN_COMBINATIONS.iter() {
        let bot_count = line.iter().filter(|&&cell| board[cell] == bot_mark).count() as i32;
        let opponent_count = line
            .iter()
            .filter(|&&cell| board[cell] == opponent_mark)
            .count() as i32;

        if opponent_count == 0 {
            score += bot_count;
        }
        if bot_count == 0 {
            score -= opponent_count;
        }
    }

    if board[CENTER_CELL] == bot_mark {
        score += CENTER_BONUS;
    }

    score
}
