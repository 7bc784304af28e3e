//! Move evaluation.
//!
//! Static scores for candidate columns, used for root move ordering and
//! tie-breaking. The deep search never calls into this module.

pub mod heuristic;

pub use heuristic::{heuristic_move, order_moves, Heuristic};
