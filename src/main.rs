//! Tafl replay tool.
//!
//! Reads one move per line from stdin (`d1-d3`, capture suffixes are
//! ignored), plays them alternately starting with black and prints every
//! ply followed by the final board and outcome. Blank lines and lines
//! starting with `#` are skipped.
//!
//! Usage:
//!   tafl [--size N] [--config FILE] < moves.txt

use std::env;
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use tafl::board::Board;
use tafl::config::GameConfig;
use tafl::game::TaflGame;
use tafl::protocol::notation::{format_move_with_captures, parse_move};
use tracing::debug;

const DEFAULT_SIZE: usize = 9;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn usage() -> ! {
    eprintln!("Usage: tafl [--size N] [--config FILE] < moves.txt");
    process::exit(1);
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut size = DEFAULT_SIZE;
    let mut config = GameConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--size" => {
                i += 1;
                size = args.get(i).and_then(|v| v.parse().ok()).unwrap_or_else(|| usage());
            }
            "--config" => {
                i += 1;
                let path = args.get(i).unwrap_or_else(|| usage());
                let text = fs::read_to_string(path).unwrap_or_else(|e| fail(e));
                config = GameConfig::from_json(&text).unwrap_or_else(|e| fail(e));
            }
            _ => usage(),
        }
        i += 1;
    }

    let game = TaflGame::with_config(size, config).unwrap_or_else(|e| fail(e));
    let mut board = game.init_board();
    let mut side = TaflGame::initial_side();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stdin = io::stdin();
    let mut ply = 0;

    for line in stdin.lock().lines() {
        let line = line.unwrap_or_else(|e| fail(e));
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if board.outcome().is_over() {
            debug!(line, "ignoring move after the end of the game");
            break;
        }

        let played = parse_move(line)
            .map_err(|e| e.to_string())
            .and_then(|mv| board.apply_move(mv, side).map(|c| (mv, c)).map_err(|e| e.to_string()));
        let (mv, captured) = match played {
            Ok(played) => played,
            Err(e) => {
                let _ = out.flush();
                fail(e);
            }
        };
        ply += 1;
        debug!(ply, side = %side, captured = captured.len(), "applied move");
        if let Err(e) = writeln!(out, "{ply}. {side} {}", format_move_with_captures(mv, &captured)) {
            fail(e);
        }
        side = side.opponent();
    }

    if let Err(e) = print_result(&mut out, &board) {
        fail(e);
    }
}

fn print_result<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{board}")?;
    writeln!(out, "outcome: {}", board.outcome())?;
    out.flush()
}
