//! Integration tests for the fourstack engine binary.
//!
//! Tests the full CFI protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_fourstack");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start fourstack");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn bestmoves(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix("bestmove "))
        .collect()
}

/// Two to move; One threatens the bottom of column 3 and the cell above it.
const STACKED_THREAT: &str = "0416205142605";

/// A full board with no four in a row.
const DRAWN_BOARD: &str = "010101101010232323323232454545545454666666";

#[test]
fn cfi_handshake_with_protocol_version() {
    let lines = run_engine(&["cfi", "quit"]);

    assert!(lines.iter().any(|l| l == "id name fourstack"));
    assert!(lines.iter().any(|l| l.starts_with("id author ")));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));

    // cfiok must be the last line of the handshake
    assert_eq!(lines.last().map(String::as_str), Some("cfiok"));
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < lines.len() - 1, "protocol_version must appear before cfiok");
}

#[test]
fn cfi_handshake_includes_options() {
    let lines = run_engine(&["cfi", "quit"]);

    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert!(!option_lines.is_empty(), "handshake should include option declarations");
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
    assert!(option_lines.iter().any(|l| l.starts_with("option name Difficulty ")));
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "nonsense", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = run_engine(&["", "  ", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn go_on_empty_board_plays_center() {
    let lines = run_engine(&["cfi", "newgame", "position startpos", "go", "quit"]);
    assert_eq!(bestmoves(&lines), vec!["3"]);
}

#[test]
fn go_blocks_stacked_threat_at_every_difficulty() {
    for level in ["easy", "medium", "hard"] {
        let option = format!("setoption name Difficulty value {}", level);
        let position = format!("position startpos moves {}", STACKED_THREAT);
        let lines = run_engine(&[&option, "setoption name Seed value 3", &position, "go", "quit"]);
        let moves = bestmoves(&lines);
        assert_eq!(moves.len(), 1);
        // Easy may take its one-ply plan, which still sees the loss.
        assert_eq!(moves[0], "3", "difficulty {}", level);
    }
}

#[test]
fn go_reports_search_info_before_bestmove() {
    let lines = run_engine(&["position startpos moves 3 3", "go depth 5", "quit"]);
    assert_eq!(lines.len(), 2, "unexpected output: {:?}", lines);
    assert!(lines[0].starts_with("info depth 5 score "), "{}", lines[0]);
    assert!(lines[0].contains(" nodes "));
    assert!(lines[1].starts_with("bestmove "));
    let col: usize = lines[1]["bestmove ".len()..].parse().unwrap();
    assert!(col < 7);
}

#[test]
fn go_on_full_board_reports_none() {
    let position = format!("position startpos moves {}", DRAWN_BOARD);
    let lines = run_engine(&[&position, "go", "result", "quit"]);
    assert_eq!(lines, vec!["bestmove none".to_string(), "result draw".to_string()]);
}

#[test]
fn go_after_win_reports_none() {
    let lines = run_engine(&["position startpos moves 0101010", "go", "go depth 6", "quit"]);
    assert_eq!(lines, vec!["bestmove none".to_string(), "bestmove none".to_string()]);
}

#[test]
fn huge_go_depth_is_capped_at_remaining_plies() {
    // Eight plies remain: columns 4 and 5 have one free cell, column 6 is empty.
    let position = format!("position startpos moves {}", &DRAWN_BOARD[..34]);
    let lines = run_engine(&[&position, "go depth 4294967295", "quit"]);
    assert_eq!(lines.len(), 2, "unexpected output: {:?}", lines);
    assert!(lines[0].starts_with("info depth 8 score "), "{}", lines[0]);
    assert!(matches!(bestmoves(&lines)[..], ["4"] | ["5"] | ["6"]), "{:?}", lines);
}

#[test]
fn result_reports_win_cells() {
    let lines = run_engine(&["position startpos moves 0 1 0 1 0 1 0", "result", "quit"]);
    assert_eq!(lines, vec!["result win 1 0,0 0,1 0,2 0,3".to_string()]);
}

#[test]
fn malformed_position_does_not_crash() {
    let lines = run_engine(&[
        "position startpos moves 3",
        "position startpos moves 0000000",
        "position nonsense",
        "isready",
        "result",
        "quit",
    ]);
    // The last valid position is kept.
    assert_eq!(lines, vec!["readyok".to_string(), "result none".to_string()]);
}

#[test]
fn newgame_resets_position() {
    let lines = run_engine(&[
        "setoption name Difficulty value hard",
        "position startpos moves 0 1 0 1 0 1 0",
        "newgame",
        "go",
        "quit",
    ]);
    assert_eq!(bestmoves(&lines), vec!["3"]);
}

#[test]
fn eof_exits_cleanly() {
    let lines = run_engine(&["isready"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn minimal_session() {
    let lines = run_engine(&[
        "cfi",
        "setoption name Threads value 2",
        "setoption name Seed value 42",
        "isready",
        "newgame",
        "position startpos moves 3 2 4",
        "go depth 4",
        "quit",
    ]);
    assert!(lines.contains(&"cfiok".to_string()));
    assert!(lines.contains(&"readyok".to_string()));
    assert_eq!(bestmoves(&lines).len(), 1);
}
