//! Game state representation.
//!
//! Holds a Connect Four position together with the side to move and the
//! ordered move history. The search mutates one `GameState` in place and
//! restores it after every child, so apply and undo are exact inverses.
//!
//! Design: cells live in a fixed-size array indexed by `col * ROWS + row`,
//! with row 0 at the bottom. Two bitboards with a 7-bit stride per column are
//! maintained alongside the cells so the canonical key is O(1).

use std::ops::{Deref, DerefMut};

use thiserror::Error;

use super::player::Player;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Total number of cells (and the maximum number of moves in a game).
pub const CELL_COUNT: usize = COLS * ROWS;

/// The central column.
pub const CENTER_COL: usize = 3;

/// Bits per column in the key bitboards: one per row plus a sentinel.
const COL_STRIDE: usize = ROWS + 1;

/// One bit at the bottom of every column.
const BOTTOM_MASK: u64 = {
    let mut mask = 0u64;
    let mut col = 0;
    while col < COLS {
        mask |= 1 << (col * COL_STRIDE);
        col += 1;
    }
    mask
};

/// Errors raised by move application and undo.
///
/// Both are contract faults: callers must check legality before applying,
/// and the search never undoes more moves than it applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: column {0} is full or out of range")]
    IllegalMove(usize),

    #[error("cannot undo: move history is empty")]
    EmptyHistory,
}

/// A Connect Four position with side to move and move history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    cells: [Option<Player>; CELL_COUNT],
    heights: [u8; COLS],
    history: Vec<u8>,
    to_move: Player,
    /// Discs of Player One, 7-bit stride per column.
    first_bits: u64,
    /// Occupied cells, 7-bit stride per column.
    mask: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates an empty board with Player One to move.
    pub fn new() -> Self {
        GameState {
            cells: [None; CELL_COUNT],
            heights: [0; COLS],
            history: Vec::with_capacity(CELL_COUNT),
            to_move: Player::One,
            first_bits: 0,
            mask: 0,
        }
    }

    /// Builds a position by playing `moves` from the empty board.
    pub fn from_moves(moves: &[usize]) -> Result<Self, MoveError> {
        let mut state = GameState::new();
        for &col in moves {
            state.apply(col)?;
        }
        Ok(state)
    }

    /// Returns the owner of the cell at (`col`, `row`), row 0 being the bottom.
    pub fn cell_at(&self, col: usize, row: usize) -> Option<Player> {
        if col >= COLS || row >= ROWS {
            return None;
        }
        self.cells[col * ROWS + row]
    }

    /// Returns the number of discs in `col`.
    pub fn height(&self, col: usize) -> usize {
        self.heights[col] as usize
    }

    /// Returns true if a disc can be dropped into `col`.
    pub fn is_legal(&self, col: usize) -> bool {
        col < COLS && (self.heights[col] as usize) < ROWS
    }

    /// Returns the legal columns in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&c| self.is_legal(c)).collect()
    }

    /// Returns the number of columns that still accept a disc.
    pub fn open_columns(&self) -> usize {
        (0..COLS).filter(|&c| self.is_legal(c)).count()
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the number of moves played so far.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the columns played so far, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.history.iter().map(|&c| c as usize)
    }

    /// Returns true once all 42 cells are occupied.
    pub fn is_full(&self) -> bool {
        self.history.len() == CELL_COUNT
    }

    /// Returns the (column, row) of the most recently placed disc.
    pub fn last_move(&self) -> Option<(usize, usize)> {
        let col = *self.history.last()? as usize;
        Some((col, self.heights[col] as usize - 1))
    }

    /// Drops a disc for the side to move into `col`.
    pub fn apply(&mut self, col: usize) -> Result<(), MoveError> {
        if !self.is_legal(col) {
            return Err(MoveError::IllegalMove(col));
        }
        let row = self.heights[col] as usize;
        let bit = 1u64 << (col * COL_STRIDE + row);

        self.cells[col * ROWS + row] = Some(self.to_move);
        self.mask |= bit;
        if self.to_move == Player::One {
            self.first_bits |= bit;
        }
        self.heights[col] += 1;
        self.history.push(col as u8);
        self.to_move = self.to_move.other();
        Ok(())
    }

    /// Reverses the most recent `apply`, returning the column it played.
    pub fn undo(&mut self) -> Result<usize, MoveError> {
        let col = self.history.pop().ok_or(MoveError::EmptyHistory)? as usize;
        self.heights[col] -= 1;
        let row = self.heights[col] as usize;
        let bit = 1u64 << (col * COL_STRIDE + row);

        self.cells[col * ROWS + row] = None;
        self.mask &= !bit;
        self.first_bits &= !bit;
        self.to_move = self.to_move.other();
        Ok(col)
    }

    /// Applies a move and returns a guard that undoes it when dropped.
    ///
    /// The guard dereferences to the state, so the child position can be
    /// searched through it. Every exit path out of the guard's scope,
    /// including an early `break` on a cutoff, restores the parent.
    pub fn play_scoped(&mut self, col: usize) -> Result<Played<'_>, MoveError> {
        self.apply(col)?;
        Ok(Played { state: self })
    }

    /// Returns a key uniquely determined by the cell contents.
    ///
    /// Each column contributes Player One's discs plus a sentinel bit just
    /// above its top disc, so the key fits in 49 bits. The side to move is
    /// implied by the disc count.
    pub fn key(&self) -> u64 {
        self.first_bits + self.mask + BOTTOM_MASK
    }
}

/// A move applied through [`GameState::play_scoped`], undone on drop.
pub struct Played<'a> {
    state: &'a mut GameState,
}

impl Deref for Played<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &*self.state
    }
}

impl DerefMut for Played<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        &mut *self.state
    }
}

impl Drop for Played<'_> {
    fn drop(&mut self) {
        let undone = self.state.undo();
        debug_assert!(undone.is_ok(), "scoped move lost its history entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = GameState::new();
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.to_move(), Player::One);
        assert_eq!(state.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(state.last_move(), None);
        for col in 0..COLS {
            for row in 0..ROWS {
                assert_eq!(state.cell_at(col, row), None);
            }
        }
    }

    #[test]
    fn apply_stacks_discs_and_alternates_turn() {
        let mut state = GameState::new();
        state.apply(3).unwrap();
        state.apply(3).unwrap();
        assert_eq!(state.cell_at(3, 0), Some(Player::One));
        assert_eq!(state.cell_at(3, 1), Some(Player::Two));
        assert_eq!(state.height(3), 2);
        assert_eq!(state.to_move(), Player::One);
        assert_eq!(state.last_move(), Some((3, 1)));
        assert_eq!(state.history().collect::<Vec<_>>(), vec![3, 3]);
    }

    #[test]
    fn apply_rejects_full_and_out_of_range_columns() {
        let mut state = GameState::from_moves(&[0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(state.apply(0), Err(MoveError::IllegalMove(0)));
        assert_eq!(state.apply(7), Err(MoveError::IllegalMove(7)));
        assert_eq!(state.move_count(), 6);
        assert!(!state.legal_moves().contains(&0));
        assert_eq!(state.open_columns(), 6);
    }

    #[test]
    fn undo_on_empty_history_fails() {
        let mut state = GameState::new();
        assert_eq!(state.undo(), Err(MoveError::EmptyHistory));
    }

    #[test]
    fn undo_restores_previous_state() {
        let mut state = GameState::from_moves(&[3, 2, 4]).unwrap();
        let before = state.clone();
        state.apply(5).unwrap();
        assert_eq!(state.undo(), Ok(5));
        assert_eq!(state, before);
        assert_eq!(state.key(), before.key());
    }

    #[test]
    fn scoped_play_undoes_on_drop() {
        let mut state = GameState::from_moves(&[3]).unwrap();
        let before = state.clone();
        {
            let child = state.play_scoped(4).unwrap();
            assert_eq!(child.move_count(), 2);
            assert_eq!(child.cell_at(4, 0), Some(Player::Two));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn scoped_play_rejects_illegal_column() {
        let mut state = GameState::new();
        assert!(state.play_scoped(9).is_err());
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn key_distinguishes_owner_and_height() {
        let a = GameState::from_moves(&[0, 1]).unwrap();
        let b = GameState::from_moves(&[1, 0]).unwrap();
        let c = GameState::from_moves(&[0, 0]).unwrap();
        assert_ne!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_ne!(GameState::new().key(), a.key());
    }

    #[test]
    fn key_is_independent_of_move_order() {
        let a = GameState::from_moves(&[0, 1, 2, 3]).unwrap();
        let b = GameState::from_moves(&[2, 3, 0, 1]).unwrap();
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn full_board_has_no_legal_moves() {
        let mut moves = Vec::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                moves.push(col);
            }
        }
        let state = GameState::from_moves(&moves).unwrap();
        assert!(state.is_full());
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.move_count(), CELL_COUNT);
    }
}
