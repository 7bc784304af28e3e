//! Search depth budgets.
//!
//! The branching factor is the number of open columns, so the adaptive
//! policy searches deeper as columns fill up.

use crate::board::{GameState, CELL_COUNT, CENTER_COL};

/// Adaptive stages as (open columns below, depth). The first matching stage
/// wins; positions with more open columns use [`ADAPTIVE_BASE_DEPTH`].
pub const ADAPTIVE_STAGES: [(usize, u32); 2] = [(3, 20), (5, 10)];

/// Depth used while five or more columns are open.
pub const ADAPTIVE_BASE_DEPTH: u32 = 6;

/// Maps a position to a search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Always search this many plies below each root move.
    Fixed(u32),
    /// Staged depth by open columns.
    Adaptive,
}

impl DepthPolicy {
    /// Returns the depth budget for `state`, never more than the plies
    /// left before the board is full.
    pub fn depth(self, state: &GameState) -> u32 {
        let budget = match self {
            DepthPolicy::Fixed(depth) => depth,
            DepthPolicy::Adaptive => adaptive_depth(state.open_columns()),
        };
        budget.min(remaining_plies(state))
    }
}

/// Returns the adaptive depth for a position with `open_columns` open.
pub fn adaptive_depth(open_columns: usize) -> u32 {
    ADAPTIVE_STAGES
        .iter()
        .find(|&&(below, _)| open_columns < below)
        .map(|&(_, depth)| depth)
        .unwrap_or(ADAPTIVE_BASE_DEPTH)
}

/// Returns the number of discs that can still be dropped.
pub fn remaining_plies(state: &GameState) -> u32 {
    (CELL_COUNT - state.move_count()) as u32
}

/// Returns the center column on an empty board, where no search is needed.
pub fn opening_move(state: &GameState) -> Option<usize> {
    (state.move_count() == 0).then_some(CENTER_COL)
}
