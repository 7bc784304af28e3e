//! Game outcome detection.
//!
//! The last-move test runs after every applied move inside the search and
//! only looks at lines through the newest disc. The all-lines scan is for
//! highlighting a finished game and is never called during search.

pub mod four;
pub mod lines;

pub use four::{completes_four, is_win, makes_four};
pub use lines::{windows, winning_positions, WINDOW_COUNT};

use crate::board::GameState;

/// Returns true if the board is full and the last move did not win.
pub fn is_draw(state: &GameState) -> bool {
    state.is_full() && !is_win(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{COLS, ROWS};

    /// A full board with no four-in-a-row anywhere.
    ///
    /// Columns 0-5 read 1,1,1,2,2,2 or 2,2,2,1,1,1 from the bottom,
    /// alternating by column; column 6 alternates disc by disc.
    fn drawn_game_moves() -> Vec<usize> {
        let mut moves = Vec::new();
        for pair in [(0, 1), (2, 3), (4, 5)] {
            for _ in 0..3 {
                moves.extend([pair.0, pair.1]);
            }
            for _ in 0..3 {
                moves.extend([pair.1, pair.0]);
            }
        }
        for _ in 0..ROWS {
            moves.push(6);
        }
        moves
    }

    #[test]
    fn empty_board_is_not_drawn() {
        assert!(!is_draw(&GameState::new()));
    }

    #[test]
    fn full_board_without_four_is_drawn() {
        let state = GameState::from_moves(&drawn_game_moves()).unwrap();
        assert!(state.is_full());
        assert_eq!(state.legal_moves().len(), 0);
        assert!(winning_positions(&state).is_empty());
        assert!(!is_win(&state));
        assert!(is_draw(&state));
        assert_eq!(state.move_count(), COLS * ROWS);
    }
}
