use super::types::{Board, CELL_COUNT, Mark};

pub fn empty_board() -> Board {
    [Mark::Empty; CELL_COUNT]
}

pub fn get_available_cells(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}
