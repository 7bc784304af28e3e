//! Fourstack engine library.
//!
//! Exposes the board representation, win detection, search, difficulty
//! levels, and protocol modules for use by integration tests, the self-play
//! runner, and the binary entry point.

pub mod board;
pub mod difficulty;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod outcome;
pub mod protocol;
pub mod search;
pub mod selfplay;

pub use board::{GameState, MoveError, Player};
pub use difficulty::{choose_move, choose_move_with, Difficulty};
pub use engine::Engine;
