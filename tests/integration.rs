//! Integration tests for the tafl replay binary.
//!
//! Spawns the binary, feeds a move list via stdin and checks the printed
//! plies, final board and outcome.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the replay tool with `args`, piping `moves` to stdin.
fn run_replay(args: &[&str], moves: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_tafl");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start tafl");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(moves.as_bytes()).unwrap();
    drop(stdin);

    child.wait_with_output().expect("failed to wait on child")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// One back-and-forth shuffle on 7x7 that returns to the starting position.
const SHUFFLE: &str = "d1-c1\nd3-c3\nc1-d1\nc3-d3\n";

#[test]
fn replays_moves_and_prints_the_board() {
    let output = run_replay(&["--size", "7"], "# opening\nd1-c1\n\nd3-c3\n");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "1. black d1-c1");
    assert_eq!(lines[1], "2. white d3-c3");
    assert_eq!(lines[2], "");
    // 7 board rows, the occurrence line, then the outcome
    assert_eq!(lines.len(), 3 + 7 + 2);
    assert_eq!(lines[10], "occurrences: 1");
    assert_eq!(lines.last().unwrap(), "outcome: ongoing");
}

#[test]
fn default_size_is_nine() {
    let output = run_replay(&[], "");
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "");
    assert_eq!(lines[1].split(' ').count(), 9);
    assert_eq!(lines.last().unwrap(), "outcome: ongoing");
}

#[test]
fn third_repetition_ends_the_game() {
    let moves = format!("{SHUFFLE}{SHUFFLE}d1-c1\n");
    let output = run_replay(&["--size", "7"], &moves);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    // the ninth move arrives after the game is decided and is not played
    assert!(lines.iter().any(|l| l == "8. white c3-d3"));
    assert!(!lines.iter().any(|l| l.starts_with("9.")));
    assert_eq!(lines.last().unwrap(), "outcome: white wins");
}

#[test]
fn illegal_move_is_rejected() {
    let output = run_replay(&["--size", "7"], "d1-c1\nd1-c1\n");
    assert_eq!(output.status.code(), Some(1));

    let lines = stdout_lines(&output);
    assert_eq!(lines, vec!["1. black d1-c1".to_string()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: white cannot play d1-c1"), "{stderr}");
}

#[test]
fn malformed_move_is_rejected() {
    let output = run_replay(&["--size", "7"], "d1c1\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));
}

#[test]
fn unsupported_size_is_rejected() {
    let output = run_replay(&["--size", "8"], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported board size 8"), "{stderr}");
}
