//! Board representation and game-state types.
//!
//! Contains the Connect Four grid, disc ownership, and the move
//! application/undo protocol used by the search.

pub mod player;
pub mod state;

pub use player::Player;
pub use state::{GameState, MoveError, Played, CELL_COUNT, CENTER_COL, COLS, ROWS};
