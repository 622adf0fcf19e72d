//! Self-play game generation CLI.
//!
//! Plays random Tafl games through the pruned action mask and writes the
//! records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --size N         Board size, 7, 9 or 11 (default: 9)
//!   --max-plies N    Abandon games after N plies (default: 300)
//!   --config FILE    JSON rule configuration
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tafl::config::GameConfig;
use tafl::selfplay::{self, SelfPlayConfig, Summary};
use tracing::{error, info};

fn init_tracing(quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {flag} value");
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_value(&args, i, "--games");
            }
            "--size" => {
                i += 1;
                config.size = parse_value(&args, i, "--size");
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = parse_value(&args, i, "--max-plies");
            }
            "--config" => {
                i += 1;
                config_path = Some(parse_value(&args, i, "--config"));
            }
            "--threads" => {
                i += 1;
                config.threads = parse_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_value(&args, i, "--output"));
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

    init_tracing(config.quiet);

    if let Some(path) = config_path {
        let loaded = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| GameConfig::from_json(&text).map_err(|e| e.to_string()));
        match loaded {
            Ok(game) => config.game = game,
            Err(e) => {
                error!(path = %path, "cannot load configuration: {e}");
                process::exit(1);
            }
        }
    }

    info!(
        games = config.num_games,
        size = config.size,
        max_plies = config.max_plies,
        threads = config.threads,
        "starting self-play"
    );

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("self-play failed: {e}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64() * 3600.0
        );
        eprintln!("{}", Summary::of(&games));
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        error!("failed to write output: {e}");
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        info!(games = games.len(), path = %path, "wrote records");
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --size N         Board size, 7, 9 or 11 (default: 9)");
    eprintln!("  --max-plies N    Abandon games after N plies (default: 300)");
    eprintln!("  --config FILE    JSON rule configuration");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
