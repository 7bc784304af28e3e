//! Position notation for the CFI protocol.
//!
//! A position is the move list from the empty board:
//!
//! ```text
//! startpos [moves <col> <col> ...]
//! ```
//!
//! Columns are 0-6. A token with several digits is read as consecutive
//! moves, so `moves 3 3 4` and `moves 334` are the same position.

use thiserror::Error;

use crate::board::{GameState, MoveError};
use crate::outcome::is_win;

/// Errors produced while parsing a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("expected 'startpos', got '{0}'")]
    ExpectedStartpos(String),

    #[error("expected 'moves' after startpos, got '{0}'")]
    ExpectedMoves(String),

    #[error("invalid column '{0}'")]
    InvalidColumn(String),

    #[error("move {ply}: {source}")]
    Illegal { ply: usize, source: MoveError },

    #[error("move {0} is played after the game was already won")]
    AfterWin(usize),
}

/// Parses the tokens following `position` into a game state.
pub fn parse_position(tokens: &[&str]) -> Result<GameState, PositionError> {
    let mut iter = tokens.iter();
    match iter.next() {
        Some(&"startpos") => {}
        Some(other) => return Err(PositionError::ExpectedStartpos(other.to_string())),
        None => return Err(PositionError::ExpectedStartpos(String::new())),
    }
    match iter.next() {
        None => return Ok(GameState::new()),
        Some(&"moves") => {}
        Some(other) => return Err(PositionError::ExpectedMoves(other.to_string())),
    }

    let mut state = GameState::new();
    for token in iter {
        for ch in token.chars() {
            let col = ch
                .to_digit(10)
                .ok_or_else(|| PositionError::InvalidColumn(token.to_string()))? as usize;
            let ply = state.move_count() + 1;
            if is_win(&state) {
                return Err(PositionError::AfterWin(ply));
            }
            state
                .apply(col)
                .map_err(|source| PositionError::Illegal { ply, source })?;
        }
    }
    Ok(state)
}

/// Encodes a state's move list in compact form, e.g. `startpos moves 334`.
pub fn encode_position(state: &GameState) -> String {
    if state.move_count() == 0 {
        return "startpos".to_string();
    }
    let moves: String = state
        .history()
        .filter_map(|c| char::from_digit(c as u32, 10))
        .collect();
    format!("startpos moves {}", moves)
}
