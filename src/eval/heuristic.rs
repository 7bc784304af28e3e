//! Heuristic move scoring.
//!
//! Cheap, non-recursive scores for a candidate column. They never decide a
//! game on their own: the root uses them to presort moves before search and
//! to break ties among moves the search cannot separate.
//!
//! Scores are "higher is better" for whichever side is about to play.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{GameState, CENTER_COL, COLS, ROWS};

/// Positional weights by (row, column), favoring the central sub-board.
const WEIGHT_TABLE: [[i32; COLS]; ROWS] = [
    [0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0],
];

/// A static move evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Every move scores 0; ordering is left to the shuffle.
    Constant,
    /// `-|3 - col|`: central columns take part in more lines.
    CenterDistance,
    /// Distance from the center in both axes, `-|3 - col| - |2.5 - row|`,
    /// kept doubled so it stays integral.
    CenterDistanceAndHeight,
    /// Lookup in a fixed table of positional weights.
    WeightTable,
}

impl Heuristic {
    /// Scores dropping a disc into `col` on the current board.
    ///
    /// Full or out-of-range columns score `i32::MIN`.
    pub fn score(self, state: &GameState, col: usize) -> i32 {
        if !state.is_legal(col) {
            return i32::MIN;
        }
        let row = state.height(col) as i32;
        let col_dist = (CENTER_COL as i32 - col as i32).abs();
        match self {
            Heuristic::Constant => 0,
            Heuristic::CenterDistance => -col_dist,
            Heuristic::CenterDistanceAndHeight => -(2 * col_dist) - (ROWS as i32 - 1 - 2 * row).abs(),
            Heuristic::WeightTable => WEIGHT_TABLE[row as usize][col],
        }
    }

    /// Returns the protocol name of this heuristic.
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::Constant => "constant",
            Heuristic::CenterDistance => "center",
            Heuristic::CenterDistanceAndHeight => "center-height",
            Heuristic::WeightTable => "weights",
        }
    }

    /// Parses a heuristic from its protocol name.
    pub fn from_name(name: &str) -> Option<Heuristic> {
        match name {
            "constant" => Some(Heuristic::Constant),
            "center" => Some(Heuristic::CenterDistance),
            "center-height" => Some(Heuristic::CenterDistanceAndHeight),
            "weights" => Some(Heuristic::WeightTable),
            _ => None,
        }
    }
}

/// Shuffles `moves`, then stably sorts them by descending heuristic score.
///
/// Equal-scored moves end up in random relative order, which keeps weak
/// heuristics from always preferring the leftmost column.
pub fn order_moves<R: Rng + ?Sized>(state: &GameState, moves: &mut [usize], heuristic: Heuristic, rng: &mut R) {
    moves.shuffle(rng);
    moves.sort_by_key(|&col| std::cmp::Reverse(heuristic.score(state, col)));
}

/// Picks one of the top-scored moves in `moves`, uniformly at random.
///
/// Returns `None` if `moves` is empty.
pub fn heuristic_move<R: Rng + ?Sized>(
    state: &GameState,
    moves: &[usize],
    heuristic: Heuristic,
    rng: &mut R,
) -> Option<usize> {
    let best = moves.iter().map(|&col| heuristic.score(state, col)).max()?;
    let top: Vec<usize> = moves
        .iter()
        .copied()
        .filter(|&col| heuristic.score(state, col) == best)
        .collect();
    top.choose(rng).copied()
}
