//! Engine state management.
//!
//! Holds the current game, engine options, and the random source, and runs
//! move selection for the `go` command. This is also the in-process API for
//! a GUI or CLI front end: it tracks one game, validates moves, and reports
//! wins and draws.

use std::collections::{BTreeSet, HashMap};
use std::io::{self, Write};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::ThreadPool;

use crate::board::{GameState, MoveError, Player};
use crate::difficulty::Difficulty;
use crate::eval::Heuristic;
use crate::outcome;
use crate::protocol::{parse_position, PositionError};
use crate::search::{build_pool, select_move_in_pool, Decision, DepthPolicy, RootOptions};

/// Difficulty used until the `Difficulty` option is set.
const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Hard;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: GameState,
    pub options: HashMap<String, String>,
    rng: SmallRng,
    /// Root search workers, rebuilt only when the thread count changes.
    pool: Option<ThreadPool>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine on an empty board with an entropy-seeded RNG.
    pub fn new() -> Self {
        Engine {
            position: GameState::new(),
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
            pool: None,
        }
    }

    /// Creates an engine whose random choices are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Engine {
            rng: SmallRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Resets the board for a new game. Options are kept.
    pub fn new_game(&mut self) {
        self.position = GameState::new();
    }

    /// Sets the current position from the tokens after `position`.
    /// The previous position is kept on failure.
    pub fn set_position(&mut self, args: &[&str]) -> Result<(), PositionError> {
        self.position = parse_position(args)?;
        Ok(())
    }

    /// Sets an engine option. A `Seed` option reseeds the RNG immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(seed)) => self.rng = SmallRng::seed_from_u64(seed),
                _ => eprintln!("invalid Seed value: {:?}", value),
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the configured difficulty (default: hard).
    pub fn difficulty(&self) -> Difficulty {
        self.options
            .get("Difficulty")
            .and_then(|v| Difficulty::from_name(v))
            .unwrap_or(DEFAULT_DIFFICULTY)
    }

    /// Returns the configured root search threads (default 1).
    fn threads(&self) -> usize {
        self.options
            .get("Threads")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    /// Returns whether the transposition cache is enabled (default true).
    fn use_cache(&self) -> bool {
        self.options
            .get("Cache")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true)
    }

    /// Returns the fixed depth override, if set. Zero means no override.
    fn depth_override(&self) -> Option<u32> {
        self.options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&d| d > 0)
    }

    /// Returns the move-ordering heuristic override, if set.
    fn heuristic_override(&self) -> Option<Heuristic> {
        self.options.get("Heuristic").and_then(|v| Heuristic::from_name(v))
    }

    /// Returns true if `col` can be played in the current position.
    pub fn legal(&self, col: usize) -> bool {
        self.position.is_legal(col)
    }

    /// Plays `col` for the side to move.
    pub fn make_move(&mut self, col: usize) -> Result<(), MoveError> {
        self.position.apply(col)
    }

    /// Takes back the last move.
    pub fn undo_move(&mut self) -> Result<usize, MoveError> {
        self.position.undo()
    }

    /// Returns the owner of a cell, row 0 being the bottom.
    pub fn board_value(&self, col: usize, row: usize) -> Option<Player> {
        self.position.cell_at(col, row)
    }

    /// Returns true if the last move completed four in a row.
    pub fn is_win(&self) -> bool {
        outcome::is_win(&self.position)
    }

    /// Returns the cells of all completed lines.
    pub fn winning_positions(&self) -> BTreeSet<(usize, usize)> {
        outcome::winning_positions(&self.position)
    }

    /// Returns true if the board is full without a winner.
    pub fn is_draw(&self) -> bool {
        outcome::is_draw(&self.position)
    }

    /// Chooses a move for the side to move using the configured options.
    ///
    /// `depth` overrides the difficulty's depth policy for this decision. It
    /// is capped at the plies left on the board like every other budget.
    pub fn engine_move(&mut self, depth: Option<u32>) -> Option<Decision> {
        let mut plan = self.difficulty().profile().pick_plan(&mut self.rng);
        if let Some(d) = depth.or_else(|| self.depth_override()) {
            plan.depth = DepthPolicy::Fixed(d);
        }
        if let Some(h) = self.heuristic_override() {
            plan.heuristic = h;
        }
        let options = RootOptions {
            threads: self.threads(),
            use_cache: self.use_cache(),
        };
        if options.threads > 1 {
            let current = self.pool.as_ref().map(ThreadPool::current_num_threads);
            if current != Some(options.threads) {
                self.pool = build_pool(options.threads);
            }
        }
        let pool = if options.threads > 1 { self.pool.as_ref() } else { None };
        select_move_in_pool(&mut self.position, &plan, &options, pool, &mut self.rng)
    }

    /// Handles the CFI handshake: writes id, options, protocol_version, and cfiok.
    pub fn handle_cfi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name fourstack")?;
        writeln!(out, "id author fourstack")?;
        writeln!(
            out,
            "option name Difficulty type combo default hard var easy var medium var hard"
        )?;
        writeln!(out, "option name Threads type spin default 1 min 1 max 64")?;
        writeln!(out, "option name Depth type spin default 0 min 0 max 42")?;
        writeln!(
            out,
            "option name Heuristic type combo default none var constant var center var center-height var weights"
        )?;
        writeln!(out, "option name Cache type check default true")?;
        writeln!(out, "option name Seed type spin default 0 min 0 max 18446744073709551615")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "cfiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `result` command: `result win <player> <col,row>...`,
    /// `result draw`, or `result none`.
    pub fn handle_result<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.is_win() {
            let winner = self.position.to_move().other();
            let cells: Vec<String> = self
                .winning_positions()
                .iter()
                .map(|(c, r)| format!("{},{}", c, r))
                .collect();
            writeln!(out, "result win {} {}", winner.cfi_char(), cells.join(" "))?;
        } else if self.is_draw() {
            writeln!(out, "result draw")?;
        } else {
            writeln!(out, "result none")?;
        }
        out.flush()
    }

    /// Handles the `go` command: writes an `info` line when a search ran,
    /// then `bestmove <col>`, or `bestmove none` once the game is over.
    pub fn handle_go<W: Write>(&mut self, out: &mut W, depth: Option<u32>) -> io::Result<()> {
        let start = Instant::now();
        let decision = self.engine_move(depth);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match decision {
            Some(d) => {
                if let (Some(depth), Some(score)) = (d.depth, d.score) {
                    writeln!(
                        out,
                        "info depth {} score {} nodes {} hits {} time {} reason {}",
                        depth,
                        score,
                        d.nodes,
                        d.cache.hits,
                        elapsed_ms,
                        d.reason.name()
                    )?;
                }
                writeln!(out, "bestmove {}", d.column)?;
            }
            None => {
                writeln!(out, "bestmove none")?;
            }
        }
        out.flush()
    }
}
