use super::types::{Board, Player, WinningLine};

/// Rows, then columns, then the two diagonals. Callers rely on this order when several
/// lines are complete at once.
pub const WIN_COMBINATIONS: [WinningLine; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board, player: Player) -> Option<WinningLine> {
    let mark = player.mark();
    WIN_COMBINATIONS
        .iter()
        .find(|line| line.iter().all(|&cell| board[cell] == mark))
        .copied()
}

pub fn has_won(board: &Board, player: Player) -> bool {
    check_win(board, player).is_some()
}
