//! CFI protocol handling.
//!
//! This module implements parsing for the CFI (Connect Four Interface) line
//! protocol: the command parser for the main loop and the move-list position
//! notation.

pub mod parser;
pub mod position;

pub use parser::{parse_command, Command, GoParams};
pub use position::{encode_position, parse_position, PositionError};
