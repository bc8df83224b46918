use rolling_common::games::rolling::{BOARD_SIDE, Player, RollingGameState, WinningLine};

fn cell_symbol(state: &RollingGameState, fading: &[(Player, usize)], cell: usize) -> String {
    match state.board()[cell].owner() {
        // marks about to vanish are drawn in lowercase
        Some(player) if fading.contains(&(player, cell)) => player.to_string().to_lowercase(),
        Some(player) => player.to_string(),
        None => (cell + 1).to_string(),
    }
}

pub fn render_board(state: &RollingGameState) -> String {
    let fading = state.fading_marks();
    let rows: Vec<String> = (0..BOARD_SIDE)
        .map(|row| {
            (0..BOARD_SIDE)
                .map(|col| format!(" {} ", cell_symbol(state, &fading, row * BOARD_SIDE + col)))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

pub fn render_counter(state: &RollingGameState) -> String {
    let (x_count, o_count) = state.move_counts();
    let capacity = state.capacity();
    format!("X: {}/{}  |  O: {}/{}", x_count, capacity, o_count, capacity)
}

pub fn render_line(line: &WinningLine) -> String {
    line.iter()
        .map(|cell| (cell + 1).to_string())
        .collect::<Vec<_>>()
        .join("-")
}
