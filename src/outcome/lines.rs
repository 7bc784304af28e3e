//! Enumeration of every four-cell line on the board.
//!
//! Used to highlight the discs of a finished game. Scans all windows, so it
//! is kept out of the search hot path.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::board::{GameState, COLS, ROWS};

/// Number of length-4 windows on a 7x6 board.
pub const WINDOW_COUNT: usize = 69;

/// A line of four cells as (column, row) pairs.
pub type Window = [(usize, usize); 4];

static WINDOWS: LazyLock<Vec<Window>> = LazyLock::new(build_windows);

/// Builds all vertical, horizontal and diagonal windows.
fn build_windows() -> Vec<Window> {
    let mut windows = Vec::with_capacity(WINDOW_COUNT);

    for col in 0..COLS {
        for row in 0..ROWS - 3 {
            windows.push([(col, row), (col, row + 1), (col, row + 2), (col, row + 3)]);
        }
    }

    for col in 0..COLS - 3 {
        for row in 0..ROWS {
            windows.push([(col, row), (col + 1, row), (col + 2, row), (col + 3, row)]);
        }
    }

    for col in 0..COLS - 3 {
        for row in 0..ROWS - 3 {
            windows.push([
                (col, row),
                (col + 1, row + 1),
                (col + 2, row + 2),
                (col + 3, row + 3),
            ]);
            windows.push([
                (col, row + 3),
                (col + 1, row + 2),
                (col + 2, row + 1),
                (col + 3, row),
            ]);
        }
    }

    debug_assert_eq!(windows.len(), WINDOW_COUNT);
    windows
}

/// Returns every length-4 window on the board.
pub fn windows() -> &'static [Window] {
    &WINDOWS
}

/// Returns the cells of every line of four same-owner discs.
///
/// Meaningful right after a win; on a board with no four-in-a-row the set
/// is empty.
pub fn winning_positions(state: &GameState) -> BTreeSet<(usize, usize)> {
    let mut positions = BTreeSet::new();
    for window in WINDOWS.iter() {
        let (c0, r0) = window[0];
        let owner = match state.cell_at(c0, r0) {
            Some(p) => p,
            None => continue,
        };
        if window.iter().all(|&(c, r)| state.cell_at(c, r) == Some(owner)) {
            positions.extend(window.iter().copied());
        }
    }
    positions
}
