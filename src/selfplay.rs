//! Self-play matches between difficulty levels.
//!
//! Plays full games between two configured difficulties, alternating which
//! one moves first, and records the move list, winner, and thinking time of
//! each game. Records are written as JSONL for later analysis.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{GameState, Player};
use crate::difficulty::{choose_move_with, Difficulty};
use crate::movegen::random_move;
use crate::outcome::is_win;
use crate::protocol::encode_position;
use crate::search::RootOptions;

/// Configuration for a self-play match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play.
    pub games: usize,
    /// Difficulty of the first contestant. It moves first in even games.
    pub first: Difficulty,
    /// Difficulty of the second contestant.
    pub second: Difficulty,
    /// Random moves played at the start of each game for variety.
    pub random_plies: usize,
    /// Number of games played concurrently.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            games: 10,
            first: Difficulty::Hard,
            second: Difficulty::Medium,
            random_plies: 2,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Difficulty playing the first stone.
    pub one: Difficulty,
    /// Difficulty playing the second stone.
    pub two: Difficulty,
    /// The side played by the match's first contestant.
    pub first_plays: Player,
    /// Columns in move order.
    pub moves: Vec<usize>,
    /// Final position in protocol notation, replayable with `position`.
    pub position: String,
    /// The side that connected four, if any.
    pub winner: Option<Player>,
    /// Total engine thinking time in milliseconds.
    pub think_ms: u64,
}

impl GameRecord {
    /// Returns the winning difficulty, if the game was not drawn.
    pub fn winning_difficulty(&self) -> Option<Difficulty> {
        self.winner.map(|w| match w {
            Player::One => self.one,
            Player::Two => self.two,
        })
    }

    fn outcome_text(&self) -> String {
        match self.winner {
            Some(w) => format!("{} ({}) wins", w.cfi_char(), self.winning_difficulty().map_or("", Difficulty::name)),
            None => "draw".to_string(),
        }
    }
}

/// Plays one game to completion.
pub fn play_game(config: &MatchConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let first_plays = if game_id % 2 == 0 { Player::One } else { Player::Two };
    let (one, two) = match first_plays {
        Player::One => (config.first, config.second),
        Player::Two => (config.second, config.first),
    };
    let options = RootOptions::default();

    let mut state = GameState::new();
    let mut think_ms = 0u64;

    while !is_win(&state) && !state.is_full() {
        let col = if state.move_count() < config.random_plies {
            random_move(&state, rng)
        } else {
            let difficulty = match state.to_move() {
                Player::One => one,
                Player::Two => two,
            };
            let start = Instant::now();
            let decision = choose_move_with(&mut state, difficulty, &options, rng);
            think_ms += start.elapsed().as_millis() as u64;
            decision.map(|d| d.column)
        };
        let Some(col) = col else {
            break;
        };
        if let Err(e) = state.apply(col) {
            eprintln!("game {}: engine chose an illegal move: {}", game_id, e);
            break;
        }
    }

    let winner = is_win(&state).then(|| state.to_move().other());
    GameRecord {
        game_id,
        one,
        two,
        first_plays,
        moves: state.history().collect(),
        position: encode_position(&state),
        winner,
        think_ms,
    }
}

/// Runs a match, producing one record per game in completion order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_match(config: &MatchConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.games);
    run_match_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs a match, calling `on_game` with each completed game record.
pub fn run_match_with_callback<F>(config: &MatchConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_match_parallel(config, on_game);
    } else {
        run_match_sequential(config, on_game);
    }
}

fn game_rng(config: &MatchConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn run_match_sequential<F>(config: &MatchConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut game_rng(config, i));
        if !config.quiet {
            eprintln!(
                "Game {}/{}: {} after {} moves ({:.1}s)",
                i + 1,
                config.games,
                game.outcome_text(),
                game.moves.len(),
                game_start.elapsed().as_secs_f64(),
            );
        }
        on_game(game);
    }
}

/// Plays games concurrently and delivers them to the callback from a channel.
fn run_match_parallel<F>(config: &MatchConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to build match thread pool, playing sequentially: {}", e);
            run_match_sequential(config, on_game);
            return;
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();
    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut game_rng(&config_clone, i));
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        eprintln!(
                            "Game {}/{}: {} after {} moves ({:.1}s)",
                            n,
                            config_clone.games,
                            game.outcome_text(),
                            game.moves.len(),
                            game_start.elapsed().as_secs_f64(),
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    if handle.join().is_err() {
        eprintln!("match worker thread panicked");
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    Ok(())
}

/// Writes a single game record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Win, loss, and draw counts from the first contestant's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    /// Wins by whichever side moved first.
    pub starter_wins: usize,
    pub total_moves: usize,
}

/// Tallies a set of game records.
pub fn summarize(games: &[GameRecord]) -> MatchSummary {
    let mut summary = MatchSummary {
        games: games.len(),
        ..Default::default()
    };
    for game in games {
        summary.total_moves += game.moves.len();
        match game.winner {
            Some(w) if w == game.first_plays => summary.first_wins += 1,
            Some(_) => summary.second_wins += 1,
            None => summary.draws += 1,
        }
        if game.winner == Some(Player::One) {
            summary.starter_wins += 1;
        }
    }
    summary
}

/// Prints a summary of match results to stderr.
pub fn print_summary(config: &MatchConfig, games: &[GameRecord]) {
    let s = summarize(games);
    let pct = |n: usize| 100.0 * n as f64 / s.games.max(1) as f64;

    eprintln!("=== Match Summary ===");
    eprintln!("Games: {}", s.games);
    eprintln!("Avg moves/game: {:.1}", s.total_moves as f64 / s.games.max(1) as f64);
    eprintln!("  {:>6} (first):  {} ({:.1}%)", config.first.name(), s.first_wins, pct(s.first_wins));
    eprintln!("  {:>6} (second): {} ({:.1}%)", config.second.name(), s.second_wins, pct(s.second_wins));
    eprintln!("  draws:           {} ({:.1}%)", s.draws, pct(s.draws));
    eprintln!("Wins by the side moving first: {}", s.starter_wins);
}
