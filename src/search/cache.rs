//! Transposition cache for the negamax search.
//!
//! Maps canonical position keys to values computed during one top-level
//! decision. Win scores encode the remaining depth, so an entry is only
//! reused at exactly the depth it was computed at.
//!
//! Values produced by a cutoff are only bounds on the true value. They are
//! tagged as such and reused only when the bound settles the current window.

use std::collections::HashMap;

/// Entries computed with less remaining depth than this are not stored.
pub const MIN_CACHE_DEPTH: u32 = 2;

/// How a stored value relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window.
    Exact,
    /// Fail-high: the true value is at least the stored value.
    Lower,
    /// Fail-low: the true value is at most the stored value.
    Upper,
}

/// A cached search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub depth: u32,
    pub value: i32,
    pub bound: Bound,
    pub best_move: Option<u8>,
}

/// Probe and store counters, reported in `info` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

impl CacheStats {
    /// Adds another set of counters into this one.
    pub fn merge(&mut self, other: CacheStats) {
        self.probes += other.probes;
        self.hits += other.hits;
        self.stores += other.stores;
    }
}

/// Position -> value memo scoped to a single decision.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<u64, CacheEntry>,
    stats: CacheStats,
}

impl TranspositionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Returns the best move recorded for `key` at any depth.
    pub fn best_move(&self, key: u64) -> Option<usize> {
        self.entries.get(&key)?.best_move.map(usize::from)
    }

    /// Returns the exact value stored for `key` at exactly `depth`.
    pub fn get(&self, key: u64, depth: u32) -> Option<i32> {
        self.entries
            .get(&key)
            .filter(|e| e.depth == depth && e.bound == Bound::Exact)
            .map(|e| e.value)
    }

    /// Stores an exact value for `key` at `depth`, overwriting any entry.
    pub fn put(&mut self, key: u64, depth: u32, value: i32) {
        self.store(key, depth, value, Bound::Exact, None);
    }

    /// Stores a search result with its bound type and best move.
    ///
    /// Results below [`MIN_CACHE_DEPTH`] are dropped; they are cheaper to
    /// recompute than to hash.
    pub fn store(&mut self, key: u64, depth: u32, value: i32, bound: Bound, best_move: Option<usize>) {
        if depth < MIN_CACHE_DEPTH {
            return;
        }
        self.stats.stores += 1;
        self.entries.insert(
            key,
            CacheEntry {
                depth,
                value,
                bound,
                best_move: best_move.map(|c| c as u8),
            },
        );
    }

    /// Looks up a value usable inside the window (`alpha`, `beta`).
    ///
    /// Hits require the same depth. Exact entries always answer; a lower
    /// bound answers only at or above `beta`, an upper bound only at or
    /// below `alpha`.
    pub fn probe(&mut self, key: u64, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        self.stats.probes += 1;
        let entry = self.entries.get(&key)?;
        if entry.depth != depth {
            return None;
        }
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.value >= beta,
            Bound::Upper => entry.value <= alpha,
        };
        if usable {
            self.stats.hits += 1;
            Some(entry.value)
        } else {
            None
        }
    }
}
