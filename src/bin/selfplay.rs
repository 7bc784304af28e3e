//! Self-play match CLI.
//!
//! Plays games between two difficulty levels and outputs the records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N          Number of games to play (default: 10)
//!   --first LEVEL      First contestant: easy, medium, hard (default: hard)
//!   --second LEVEL     Second contestant (default: medium)
//!   --random-plies N   Random opening moves per game (default: 2)
//!   --threads N        Number of parallel games (default: 4)
//!   --seed N           Random seed, 0 for entropy (default: 0)
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use fourstack::difficulty::Difficulty;
use fourstack::selfplay::{self, MatchConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = MatchConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" => {
                i += 1;
                config.games = parse_value(&args, i, flag);
            }
            "--first" => {
                i += 1;
                config.first = parse_difficulty(&args, i, flag);
            }
            "--second" => {
                i += 1;
                config.second = parse_difficulty(&args, i, flag);
            }
            "--random-plies" => {
                i += 1;
                config.random_plies = parse_value(&args, i, flag);
            }
            "--threads" => {
                i += 1;
                config.threads = parse_value(&args, i, flag);
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, flag);
            }
            "--output" => {
                i += 1;
                output_path = Some(value_at(&args, i, flag).to_string());
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, {} vs {}, {} random plies, {} threads",
            config.games, config.first, config.second, config.random_plies, config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_match(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&config, &games);
    }

    let result = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)?;
            writer.flush()
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer).and_then(|_| writer.flush())
        }
    };

    match (result, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !config.quiet => {
            eprintln!("Wrote {} games to {}", games.len(), path);
        }
        _ => {}
    }
}

fn value_at<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value_at(args, i, flag);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: {}", flag, raw);
            process::exit(1);
        }
    }
}

fn parse_difficulty(args: &[String], i: usize, flag: &str) -> Difficulty {
    let raw = value_at(args, i, flag);
    match Difficulty::from_name(raw) {
        Some(d) => d,
        None => {
            eprintln!("invalid {} value: {} (expected easy, medium, or hard)", flag, raw);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --first LEVEL     First contestant: easy, medium, hard (default: hard)");
    eprintln!("  --second LEVEL    Second contestant (default: medium)");
    eprintln!("  --random-plies N  Random opening moves per game (default: 2)");
    eprintln!("  --threads N       Number of parallel games (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
