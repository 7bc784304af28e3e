//! Four-in-a-row test through a single cell.
//!
//! Scans outward from one cell along the four axes, at most three cells in
//! each direction, so the cost does not depend on how full the board is.

use crate::board::{GameState, Player};

/// Axis directions as (column step, row step); each is scanned both ways.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Counts up to three contiguous `player` discs from (`col`, `row`),
/// excluding the starting cell, stepping by (`dc`, `dr`).
fn run_length(state: &GameState, col: usize, row: usize, player: Player, dc: isize, dr: isize) -> usize {
    let mut count = 0;
    let mut c = col as isize + dc;
    let mut r = row as isize + dr;
    while count < 3 && c >= 0 && r >= 0 && state.cell_at(c as usize, r as usize) == Some(player) {
        count += 1;
        c += dc;
        r += dr;
    }
    count
}

/// Returns true if `player` owning (`col`, `row`) would complete four in a row.
///
/// The cell itself is treated as owned by `player` whatever it holds, so this
/// works both for a disc already placed and for a hypothetical drop.
pub fn makes_four(state: &GameState, col: usize, row: usize, player: Player) -> bool {
    AXES.iter().any(|&(dc, dr)| {
        1 + run_length(state, col, row, player, dc, dr) + run_length(state, col, row, player, -dc, -dr)
            >= 4
    })
}

/// Returns true if the most recent move completed four in a row.
pub fn is_win(state: &GameState) -> bool {
    match state.last_move() {
        Some((col, row)) => match state.cell_at(col, row) {
            Some(player) => makes_four(state, col, row, player),
            None => false,
        },
        None => false,
    }
}

/// Returns true if `player` dropping a disc into `col` would complete four.
///
/// The board is not modified. Returns false for a full or out-of-range column.
pub fn completes_four(state: &GameState, col: usize, player: Player) -> bool {
    state.is_legal(col) && makes_four(state, col, state.height(col), player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(moves: &[usize]) -> GameState {
        GameState::from_moves(moves).unwrap()
    }

    #[test]
    fn no_win_on_empty_board() {
        assert!(!is_win(&GameState::new()));
    }

    #[test]
    fn vertical_four_wins() {
        let s = state(&[0, 1, 0, 1, 0, 1, 0]);
        assert!(is_win(&s));
        assert!(!is_win(&state(&[0, 1, 0, 1, 0, 1])));
    }

    #[test]
    fn horizontal_four_wins_when_completed_in_the_middle() {
        // Player One: 0, 1, 3 then 2 fills the gap.
        let s = state(&[0, 0, 1, 1, 3, 3, 2]);
        assert!(is_win(&s));
    }

    #[test]
    fn rising_diagonal_wins() {
        // One builds (0,0) (1,1) (2,2) (3,3).
        let s = state(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 5, 3]);
        assert_eq!(s.cell_at(3, 3), Some(Player::One));
        assert!(is_win(&s));
    }

    #[test]
    fn falling_diagonal_wins() {
        // One builds (6,0) (5,1) (4,2) (3,3).
        let s = state(&[6, 5, 5, 4, 4, 3, 4, 3, 3, 1, 3]);
        assert_eq!(s.cell_at(3, 3), Some(Player::One));
        assert!(is_win(&s));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let s = state(&[0, 6, 1, 6, 2]);
        assert!(!is_win(&s));
    }

    #[test]
    fn completes_four_detects_both_sides_threats() {
        let s = state(&[0, 6, 1, 6, 2]);
        assert_eq!(s.to_move(), Player::Two);
        assert!(completes_four(&s, 3, Player::One));
        assert!(!completes_four(&s, 3, Player::Two));
        assert!(!completes_four(&s, 4, Player::One));
        // Hypothetical test leaves the board untouched.
        assert_eq!(s.height(3), 0);
    }

    #[test]
    fn completes_four_rejects_full_column() {
        let s = state(&[0, 0, 0, 0, 0, 0]);
        assert!(!completes_four(&s, 0, Player::One));
        assert!(!completes_four(&s, 7, Player::One));
    }
}
