//! Game-tree search and move selection.
//!
//! Negamax with alpha-beta pruning over the in-place game state, a
//! per-decision transposition cache, depth budgets by game phase, and the
//! root selector that ties them together with the heuristic fallbacks.

pub mod cache;
pub mod depth;
pub mod negamax;
pub mod root;

pub use cache::{Bound, CacheEntry, CacheStats, TranspositionCache, MIN_CACHE_DEPTH};
pub use depth::{adaptive_depth, opening_move, remaining_plies, DepthPolicy};
pub use negamax::{Searcher, INFINITY, WIN_BASE};
pub use root::{build_pool, select_move, select_move_in_pool, Decision, DecisionReason, RootOptions, SearchPlan};
