use std::collections::VecDeque;

use super::board::{empty_board, get_available_cells};
use super::types::{Board, DEFAULT_CAPACITY, MAX_CAPACITY, Mark, MoveResult, Player, WinningLine};
use super::win_detector::check_win;

/// Board and history after a hypothetical move, as produced by
/// [`RollingGameState::simulate_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedMove {
    pub board: Board,
    pub moves: VecDeque<usize>,
    pub evicted: Option<usize>,
}

/// Rolling tic-tac-toe: every player keeps at most `capacity` marks on the board, and
/// placing one more removes that player's oldest mark.
///
/// Each history queue lists the cells holding that player's marks, oldest first. A cell
/// is in a player's queue exactly when the board holds that player's mark there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingGameState {
    board: Board,
    x_moves: VecDeque<usize>,
    o_moves: VecDeque<usize>,
    current_player: Player,
    capacity: usize,
    last_winner: Option<Player>,
}

impl Default for RollingGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingGameState {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Capacities outside `1..=MAX_CAPACITY` are clamped; with more than four marks each
    /// the board could fill up and stop accepting moves.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CAPACITY);
        Self {
            board: empty_board(),
            x_moves: VecDeque::with_capacity(capacity),
            o_moves: VecDeque::with_capacity(capacity),
            current_player: Player::X,
            capacity,
            last_winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last_winner(&self) -> Option<Player> {
        self.last_winner
    }

    pub fn moves_of(&self, player: Player) -> &VecDeque<usize> {
        match player {
            Player::X => &self.x_moves,
            Player::O => &self.o_moves,
        }
    }

    pub fn current_moves(&self) -> &VecDeque<usize> {
        self.moves_of(self.current_player)
    }

    fn moves_of_mut(&mut self, player: Player) -> &mut VecDeque<usize> {
        match player {
            Player::X => &mut self.x_moves,
            Player::O => &mut self.o_moves,
        }
    }

    /// Out-of-range cells are never available.
    pub fn is_available(&self, cell: usize) -> bool {
        self.board.get(cell).is_some_and(|mark| mark.is_empty())
    }

    pub fn available_cells(&self) -> Vec<usize> {
        get_available_cells(&self.board)
    }

    pub fn move_counts(&self) -> (usize, usize) {
        (self.x_moves.len(), self.o_moves.len())
    }

    /// Places the current player's mark. The turn is not advanced; callers check for a
    /// winner first and then call [`advance_turn`](Self::advance_turn).
    pub fn apply_move(&mut self, cell: usize) -> MoveResult {
        if !self.is_available(cell) {
            return MoveResult::Rejected;
        }

        let player = self.current_player;
        let capacity = self.capacity;
        let mut evicted = None;

        if self.moves_of(player).len() >= capacity
            && let Some(oldest) = self.moves_of_mut(player).pop_front()
        {
            self.board[oldest] = Mark::Empty;
            // a removed mark may have been part of the line that won
            self.last_winner = None;
            evicted = Some(oldest);
        }

        self.board[cell] = player.mark();
        self.moves_of_mut(player).push_back(cell);

        MoveResult::Placed { evicted }
    }

    pub fn check_winner(&mut self, player: Player) -> Option<WinningLine> {
        let line = check_win(&self.board, player);
        if line.is_some() {
            self.last_winner = Some(player);
        }
        line
    }

    pub fn advance_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Marks that disappear on their owner's next placement, X first.
    pub fn fading_marks(&self) -> Vec<(Player, usize)> {
        [Player::X, Player::O]
            .into_iter()
            .filter_map(|player| {
                let moves = self.moves_of(player);
                if moves.len() >= self.capacity {
                    moves.front().map(|&cell| (player, cell))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Board and history of `player` after it plays `cell`, with the eviction rule
    /// applied. `player` does not have to be the one to move and `cell` is not checked
    /// for availability.
    ///
    /// Panics if `cell` is out of range.
    pub fn simulate_move(&self, cell: usize, player: Player) -> SimulatedMove {
        let mut board = self.board;
        let mut moves = self.moves_of(player).clone();
        let mut evicted = None;

        if moves.len() >= self.capacity
            && let Some(oldest) = moves.pop_front()
        {
            board[oldest] = Mark::Empty;
            evicted = Some(oldest);
        }

        board[cell] = player.mark();
        moves.push_back(cell);

        SimulatedMove {
            board,
            moves,
            evicted,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::with_capacity(self.capacity);
    }

    #[cfg(test)]
    pub(crate) fn from_moves(x_moves: &[usize], o_moves: &[usize], current_player: Player) -> Self {
        let mut state = Self::new();
        for &cell in x_moves {
            state.board[cell] = Mark::X;
            state.x_moves.push_back(cell);
        }
        for &cell in o_moves {
            state.board[cell] = Mark::O;
            state.o_moves.push_back(cell);
        }
        state.current_player = current_player;
        state
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}
