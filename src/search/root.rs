//! Root move selection.
//!
//! Orders the root moves by a heuristic, searches each one with negamax,
//! and keeps the first move reaching the best value. When every move loses
//! within the horizon, the selector falls back to blocking the opponent's
//! immediate win, and failing that to the heuristic alone.
//!
//! The transposition cache lives in a `Searcher` created here for each
//! decision, so nothing carries over between calls.

use rand::Rng;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::board::GameState;
use crate::eval::{heuristic_move, order_moves, Heuristic};
use crate::movegen::blocking_moves;
use crate::outcome::is_win;

use super::cache::CacheStats;
use super::depth::{opening_move, DepthPolicy};
use super::negamax::{Searcher, INFINITY};

/// How a single decision is made: depth budget, ordering heuristic, and
/// whether to search at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlan {
    pub depth: DepthPolicy,
    pub heuristic: Heuristic,
    /// When false, the heuristic alone picks the move.
    pub use_search: bool,
    /// Answer the first move of a game with the center column.
    pub center_opening: bool,
}

/// Execution options that do not change which move is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootOptions {
    /// Worker threads for root moves; 1 searches sequentially.
    pub threads: usize,
    /// Enables the transposition cache.
    pub use_cache: bool,
}

impl Default for RootOptions {
    fn default() -> Self {
        RootOptions {
            threads: 1,
            use_cache: true,
        }
    }
}

/// Why the selector returned its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Center column on an empty board.
    Opening,
    /// Exactly one legal move.
    OnlyMove,
    /// Heuristic only, no search.
    Heuristic,
    /// Best non-losing move found by search.
    Search,
    /// Every move loses; blocks the opponent's immediate win.
    Block,
    /// Every move loses and nothing can be blocked.
    Fallback,
}

impl DecisionReason {
    /// Returns the name used in `info` lines.
    pub const fn name(self) -> &'static str {
        match self {
            DecisionReason::Opening => "opening",
            DecisionReason::OnlyMove => "only",
            DecisionReason::Heuristic => "heuristic",
            DecisionReason::Search => "search",
            DecisionReason::Block => "block",
            DecisionReason::Fallback => "fallback",
        }
    }
}

/// The outcome of one root decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    pub reason: DecisionReason,
    /// Best search value, when a search ran.
    pub score: Option<i32>,
    /// Depth searched below each root move, when a search ran.
    pub depth: Option<u32>,
    pub nodes: u64,
    pub cache: CacheStats,
}

impl Decision {
    fn without_search(column: usize, reason: DecisionReason) -> Self {
        Decision {
            column,
            reason,
            score: None,
            depth: None,
            nodes: 0,
            cache: CacheStats::default(),
        }
    }
}

/// Best root move and value with search statistics.
struct RootResult {
    column: usize,
    value: i32,
    nodes: u64,
    cache: CacheStats,
}

/// Builds the worker pool for parallel root search, or `None` when
/// `threads` is 1 or the pool cannot be created.
pub fn build_pool(threads: usize) -> Option<ThreadPool> {
    if threads <= 1 {
        return None;
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            eprintln!("failed to build search thread pool, searching sequentially: {}", e);
            None
        }
    }
}

/// Chooses a move for the side to move in `state` following `plan`.
///
/// Returns `None` when the game is over: the board is full or the last
/// move completed four. `state` is searched in place and restored before
/// returning. With `options.threads > 1` a pool is built for this call;
/// callers deciding repeatedly should keep one and use
/// [`select_move_in_pool`].
pub fn select_move<R: Rng + ?Sized>(
    state: &mut GameState,
    plan: &SearchPlan,
    options: &RootOptions,
    rng: &mut R,
) -> Option<Decision> {
    if is_win(state) || state.is_full() {
        return None;
    }
    let pool = build_pool(options.threads);
    select_move_in_pool(state, plan, options, pool.as_ref(), rng)
}

/// Like [`select_move`], searching root moves on `pool` when one is given.
pub fn select_move_in_pool<R: Rng + ?Sized>(
    state: &mut GameState,
    plan: &SearchPlan,
    options: &RootOptions,
    pool: Option<&ThreadPool>,
    rng: &mut R,
) -> Option<Decision> {
    let mut moves = state.legal_moves();
    if moves.is_empty() || is_win(state) {
        return None;
    }

    if plan.center_opening {
        if let Some(col) = opening_move(state) {
            return Some(Decision::without_search(col, DecisionReason::Opening));
        }
    }
    if moves.len() == 1 {
        return Some(Decision::without_search(moves[0], DecisionReason::OnlyMove));
    }
    if !plan.use_search {
        let col = heuristic_move(state, &moves, plan.heuristic, rng)?;
        return Some(Decision::without_search(col, DecisionReason::Heuristic));
    }

    let depth = plan.depth.depth(state);
    order_moves(state, &mut moves, plan.heuristic, rng);

    let result = match pool {
        Some(pool) => search_parallel(pool, state, &moves, depth, options),
        None => search_sequential(state, &moves, depth, options),
    };

    let (column, reason) = if result.value >= 0 {
        (result.column, DecisionReason::Search)
    } else {
        let blocks = blocking_moves(state);
        match heuristic_move(state, &blocks, plan.heuristic, rng) {
            Some(col) => (col, DecisionReason::Block),
            None => (
                heuristic_move(state, &moves, plan.heuristic, rng).unwrap_or(result.column),
                DecisionReason::Fallback,
            ),
        }
    };

    Some(Decision {
        column,
        reason,
        score: Some(result.value),
        depth: Some(depth),
        nodes: result.nodes,
        cache: result.cache,
    })
}

/// Searches root moves in order, narrowing the window as the best value
/// improves. Only a strictly better value replaces the current best.
fn search_sequential(state: &mut GameState, moves: &[usize], depth: u32, options: &RootOptions) -> RootResult {
    let mut searcher = Searcher::with_cache(options.use_cache);
    let mut alpha = -INFINITY;
    let mut best = moves[0];

    for &col in moves {
        let value = {
            let Ok(mut child) = state.play_scoped(col) else {
                continue;
            };
            -searcher.search(&mut child, depth, -INFINITY, -alpha)
        };
        if value > alpha {
            alpha = value;
            best = col;
        }
    }

    RootResult {
        column: best,
        value: alpha,
        nodes: searcher.nodes(),
        cache: searcher.cache_stats(),
    }
}

/// Searches root moves concurrently. Each worker owns a copy of the board
/// and a private cache, and searches with a full window so every value is
/// exact; the first move in order with the best value wins, matching the
/// sequential choice.
fn search_parallel(
    pool: &ThreadPool,
    state: &GameState,
    moves: &[usize],
    depth: u32,
    options: &RootOptions,
) -> RootResult {
    let results: Vec<(usize, i32, u64, CacheStats)> = pool.install(|| {
        moves
            .par_iter()
            .map(|&col| {
                let mut local = state.clone();
                let mut searcher = Searcher::with_cache(options.use_cache);
                let value = match local.apply(col) {
                    Ok(()) => -searcher.search(&mut local, depth, -INFINITY, INFINITY),
                    Err(_) => -INFINITY,
                };
                (col, value, searcher.nodes(), searcher.cache_stats())
            })
            .collect()
    });

    let mut best = RootResult {
        column: moves[0],
        value: -INFINITY,
        nodes: 0,
        cache: CacheStats::default(),
    };
    for (col, value, nodes, cache) in results {
        if value > best.value {
            best.value = value;
            best.column = col;
        }
        best.nodes += nodes;
        best.cache.merge(cache);
    }
    best
}
