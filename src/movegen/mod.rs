//! Move generation.
//!
//! Legal-column iteration in search order, threat-blocking candidates for
//! the root fallback, and random legal moves for match openings.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{GameState, COLS};
use crate::outcome::completes_four;

/// Fixed center-first column order used at every interior search node.
///
/// Central columns take part in more lines, so trying them first produces
/// cutoffs sooner.
pub const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Returns the legal columns of `state` in [`MOVE_ORDER`], with `first`
/// moved to the front when it is legal.
///
/// The columns are collected up front, so the state can be mutated while
/// the iterator is consumed.
pub fn ordered_moves(state: &GameState, first: Option<usize>) -> impl Iterator<Item = usize> {
    let mut order = [0usize; COLS];
    let mut len = 0;
    let rest = MOVE_ORDER.into_iter().filter(|&col| Some(col) != first);
    for col in first.into_iter().chain(rest) {
        if state.is_legal(col) {
            order[len] = col;
            len += 1;
        }
    }
    order.into_iter().take(len)
}

/// Returns the columns where the opponent would complete four on their
/// next turn, ascending. Playing one of them blocks that threat.
pub fn blocking_moves(state: &GameState) -> Vec<usize> {
    let opponent = state.to_move().other();
    (0..COLS)
        .filter(|&col| completes_four(state, col, opponent))
        .collect()
}

/// Returns the columns where the side to move completes four immediately.
pub fn winning_moves(state: &GameState) -> Vec<usize> {
    let mover = state.to_move();
    (0..COLS)
        .filter(|&col| completes_four(state, col, mover))
        .collect()
}

/// Picks a uniformly random legal column, or `None` on a full board.
pub fn random_move(state: &GameState, rng: &mut impl Rng) -> Option<usize> {
    state.legal_moves().choose(rng).copied()
}
