//! Negamax search with alpha-beta pruning.
//!
//! Every call returns a value from the point of view of the side to move.
//! There is no static evaluation: a search either proves a win or loss
//! within its depth, or reports 0.
//!
//! Children are visited by applying a move on the shared state through a
//! scoped guard, so the parent position is restored on every exit path,
//! including the early break on a cutoff.

use crate::board::GameState;
use crate::movegen::ordered_moves;
use crate::outcome::is_win;

use super::cache::{Bound, CacheStats, TranspositionCache};

/// Base magnitude of a proven win or loss. The remaining depth is added so
/// faster wins and slower losses score better.
pub const WIN_BASE: i32 = 1000;

/// Window bound larger than any reachable score.
pub const INFINITY: i32 = 10_000;

/// Recursive searcher owning the cache for one decision.
#[derive(Debug)]
pub struct Searcher {
    cache: Option<TranspositionCache>,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Creates a searcher with an empty transposition cache.
    pub fn new() -> Self {
        Searcher {
            cache: Some(TranspositionCache::new()),
            nodes: 0,
        }
    }

    /// Creates a searcher that never caches. Results are identical to a
    /// caching searcher, only slower.
    pub fn without_cache() -> Self {
        Searcher {
            cache: None,
            nodes: 0,
        }
    }

    /// Creates a searcher, caching or not.
    pub fn with_cache(enabled: bool) -> Self {
        if enabled {
            Self::new()
        } else {
            Self::without_cache()
        }
    }

    /// Clears the cache and node counter before a new decision.
    pub fn reset(&mut self) {
        if let Some(cache) = &mut self.cache {
            cache.clear();
        }
        self.nodes = 0;
    }

    /// Number of positions visited since the last reset.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Cache counters since the last reset (all zero without a cache).
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.as_ref().map(|c| c.stats()).unwrap_or_default()
    }

    /// Returns the depth-bounded value of `state` for the side to move.
    ///
    /// `state` is mutated during the search and restored before returning.
    pub fn search(&mut self, state: &mut GameState, depth: u32, alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        // The previous mover completed four: a loss for the side to move.
        if is_win(state) {
            return -(WIN_BASE + depth as i32);
        }
        if state.is_full() {
            return 0;
        }
        if depth == 0 {
            return 0;
        }

        let key = state.key();
        let mut hint = None;
        if let Some(cache) = &mut self.cache {
            if let Some(value) = cache.probe(key, depth, alpha, beta) {
                return value;
            }
            hint = cache.best_move(key);
        }

        let alpha_orig = alpha;
        let mut alpha = alpha;
        let mut best_move = None;

        for col in ordered_moves(state, hint) {
            let value = {
                let Ok(mut child) = state.play_scoped(col) else {
                    continue;
                };
                -self.search(&mut child, depth - 1, -beta, -alpha)
            };
            if value > alpha {
                alpha = value;
                best_move = Some(col);
            }
            if alpha >= beta {
                break;
            }
        }

        if let Some(cache) = &mut self.cache {
            let bound = if alpha <= alpha_orig {
                Bound::Upper
            } else if alpha >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            cache.store(key, depth, alpha, bound, best_move);
        }
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Plain negamax: no pruning, no cache.
    fn brute_force(state: &mut GameState, depth: u32) -> i32 {
        if is_win(state) {
            return -(WIN_BASE + depth as i32);
        }
        if state.is_full() || depth == 0 {
            return 0;
        }
        let mut best = -INFINITY;
        for col in state.legal_moves() {
            state.apply(col).unwrap();
            let value = -brute_force(state, depth - 1);
            state.undo().unwrap();
            best = best.max(value);
        }
        best
    }

    /// Plays random moves from the empty board, stopping before a win.
    fn random_position(rng: &mut SmallRng, plies: usize) -> GameState {
        let mut state = GameState::new();
        for _ in 0..plies {
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            let col = moves[rng.gen_range(0..moves.len())];
            state.apply(col).unwrap();
            if is_win(&state) {
                state.undo().unwrap();
                break;
            }
        }
        state
    }

    #[test]
    fn side_to_move_sees_previous_win_as_loss() {
        let mut state = GameState::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        let mut searcher = Searcher::new();
        assert_eq!(searcher.search(&mut state, 3, -INFINITY, INFINITY), -(WIN_BASE + 3));
    }

    #[test]
    fn depth_zero_is_neutral() {
        let mut state = GameState::from_moves(&[3, 3, 2]).unwrap();
        let mut searcher = Searcher::new();
        assert_eq!(searcher.search(&mut state, 0, -INFINITY, INFINITY), 0);
    }

    #[test]
    fn finds_immediate_win() {
        // One to move with 0,1,2 on the bottom row.
        let mut state = GameState::from_moves(&[0, 6, 1, 6, 2, 5]).unwrap();
        let mut searcher = Searcher::new();
        assert_eq!(searcher.search(&mut state, 1, -INFINITY, INFINITY), WIN_BASE);
    }

    #[test]
    fn prefers_faster_wins() {
        let mut state = GameState::from_moves(&[0, 6, 1, 6, 2, 5]).unwrap();
        let mut searcher = Searcher::new();
        // Winning at once keeps the full remaining depth in the score.
        assert_eq!(searcher.search(&mut state, 5, -INFINITY, INFINITY), WIN_BASE + 4);
    }

    #[test]
    fn search_restores_state() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..10 {
            let mut state = random_position(&mut rng, 12);
            let before = state.clone();
            let mut searcher = Searcher::new();
            searcher.search(&mut state, 5, -INFINITY, INFINITY);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn pruned_search_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..25 {
            let plies = rng.gen_range(8..30);
            let mut state = random_position(&mut rng, plies);
            for depth in 1..=4 {
                let expected = brute_force(&mut state, depth);
                let mut searcher = Searcher::new();
                let got = searcher.search(&mut state, depth, -INFINITY, INFINITY);
                assert_eq!(got, expected, "depth {} moves {:?}", depth, state.history().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn cache_does_not_change_values() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..20 {
            let plies = rng.gen_range(4..24);
            let mut state = random_position(&mut rng, plies);
            let mut cached = Searcher::new();
            let mut plain = Searcher::without_cache();
            let a = cached.search(&mut state, 6, -INFINITY, INFINITY);
            let b = plain.search(&mut state, 6, -INFINITY, INFINITY);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn cache_saves_nodes() {
        let mut state = GameState::from_moves(&[3, 3, 2, 4]).unwrap();
        let mut cached = Searcher::new();
        let mut plain = Searcher::without_cache();
        cached.search(&mut state, 7, -INFINITY, INFINITY);
        plain.search(&mut state, 7, -INFINITY, INFINITY);
        assert!(cached.nodes() < plain.nodes());
        assert!(cached.cache_stats().hits > 0);
        assert_eq!(plain.cache_stats(), CacheStats::default());
    }

    #[test]
    fn cached_best_move_is_tried_first() {
        // One to move wins vertically in column 6, last in the default order.
        let mut state = GameState::from_moves(&[6, 0, 6, 1, 6, 0]).unwrap();
        let key = state.key();
        let mut searcher = Searcher::new();
        assert_eq!(searcher.search(&mut state, 2, -INFINITY, INFINITY), WIN_BASE + 1);
        let cache = searcher.cache.as_ref().unwrap();
        assert_eq!(cache.best_move(key), Some(6));

        // A deeper search misses the cached value but takes the hint: the
        // winning child fails high at once, so only two nodes are visited.
        let before = searcher.nodes();
        assert_eq!(searcher.search(&mut state, 3, -INFINITY, 500), WIN_BASE + 2);
        assert_eq!(searcher.nodes() - before, 2);
    }

    #[test]
    fn reset_clears_counters() {
        let mut state = GameState::from_moves(&[3]).unwrap();
        let mut searcher = Searcher::new();
        searcher.search(&mut state, 4, -INFINITY, INFINITY);
        assert!(searcher.nodes() > 0);
        searcher.reset();
        assert_eq!(searcher.nodes(), 0);
        assert_eq!(searcher.cache_stats(), CacheStats::default());
    }
}
