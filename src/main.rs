//! Fourstack -- a Connect Four engine implementing the CFI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the CFI (Connect Four Interface) convention.

use std::io::{self, BufRead};

use fourstack::engine::Engine;
use fourstack::protocol::{parse_command, Command};

/// Runs the main CFI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            Command::Cfi => engine.handle_cfi(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Position { args } => {
                let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
                if let Err(e) = engine.set_position(&tokens) {
                    eprintln!("{}", e);
                }
                Ok(())
            }
            Command::Go(params) => engine.handle_go(&mut out, params.depth),
            Command::Result => engine.handle_result(&mut out),
            Command::Quit => break,
        };

        // Nobody is listening once stdout is gone.
        if let Err(e) = written {
            eprintln!("output error: {}", e);
            break;
        }
    }
}
