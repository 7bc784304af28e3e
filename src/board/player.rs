//! Players and disc ownership.
//!
//! Player One always makes the first move of a game.

use serde::{Deserialize, Serialize};

/// One of the two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the opposing player.
    pub const fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the single-character protocol abbreviation.
    pub const fn cfi_char(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_an_involution() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
        assert_eq!(Player::One.other().other(), Player::One);
    }

    #[test]
    fn cfi_chars_are_distinct() {
        assert_eq!(Player::One.cfi_char(), '1');
        assert_eq!(Player::Two.cfi_char(), '2');
    }
}
