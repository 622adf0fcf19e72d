//! Self-play game generation.
//!
//! Plays games by sampling uniformly among the actions of the (pruned)
//! action mask and records them for offline training. Every game gets its
//! own generator seeded from the run seed and the game id, so a run is
//! reproducible regardless of how many threads play it.

use std::fmt;
use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{Outcome, Side};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::TaflGame;
use crate::nn::{decode, Action};
use crate::protocol::notation::format_move_with_captures;

/// Notation recorded for the pass action.
pub const PASS: &str = "pass";

/// Errors that abort a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Board size.
    pub size: usize,
    /// Games still running after this many plies are abandoned.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
    /// Rules for every game of the run.
    pub game: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            size: 9,
            max_plies: 300,
            threads: 4,
            seed: 0,
            quiet: false,
            game: GameConfig::default(),
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub size: usize,
    /// Moves in notation with their captures, `pass` for a forfeit.
    pub moves: Vec<String>,
    /// `None` for draws and abandoned games.
    pub winner: Option<Side>,
    pub outcome: Outcome,
    pub plies: usize,
    pub white_pieces: u8,
    pub black_pieces: u8,
}

fn rng_for(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game to completion or to the ply cap.
pub fn play_game(
    game: &TaflGame,
    max_plies: usize,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, GameError> {
    let n = game.size();
    let mut board = game.init_board();
    let mut side = TaflGame::initial_side();
    let mut moves = Vec::new();

    while !board.outcome().is_over() && moves.len() < max_plies {
        let mask = game.legal_action_mask(&mut board, side);
        let actions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &set)| set.then_some(i))
            .collect();
        let Some(&action) = actions.choose(rng) else {
            break;
        };
        match decode(n, action) {
            Action::Move(mv) => {
                let captured = board.apply_move(mv, side)?;
                moves.push(format_move_with_captures(mv, &captured));
            }
            Action::Pass => {
                board.forfeit(side);
                moves.push(PASS.to_string());
            }
        }
        side = side.opponent();
    }

    if !board.outcome().is_over() {
        debug!(game_id, plies = moves.len(), "ply cap reached");
    }
    Ok(GameRecord {
        game_id,
        size: n,
        plies: moves.len(),
        moves,
        winner: board.outcome().winner(),
        outcome: board.outcome(),
        white_pieces: board.white_pieces(),
        black_pieces: board.black_pieces(),
    })
}

/// Plays one game and logs its result.
fn play_logged(
    game: &TaflGame,
    config: &SelfPlayConfig,
    game_id: usize,
) -> Result<GameRecord, GameError> {
    let start = Instant::now();
    let mut rng = rng_for(config, game_id);
    let record = play_game(game, config.max_plies, game_id, &mut rng)?;
    if !config.quiet {
        info!(
            game_id,
            outcome = %record.outcome,
            plies = record.plies,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "game finished"
        );
    }
    Ok(record)
}

/// Runs self-play generation, producing the records ordered by game id.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game
/// record as soon as it is available.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    let game = TaflGame::with_config(config.size, config.game)?;
    if config.threads > 1 {
        run_self_play_parallel(&game, config, on_game)
    } else {
        run_self_play_sequential(&game, config, on_game)
    }
}

fn run_self_play_sequential<F>(
    game: &TaflGame,
    config: &SelfPlayConfig,
    mut on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        on_game(play_logged(game, config, i)?);
    }
    Ok(())
}

/// Plays games on a rayon pool and hands them to `on_game` on the calling
/// thread through a channel.
fn run_self_play_parallel<F>(
    game: &TaflGame,
    config: &SelfPlayConfig,
    mut on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let (tx, rx) = mpsc::channel::<Result<GameRecord, GameError>>();

    std::thread::scope(|s| {
        s.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let _ = tx.send(play_logged(game, config, i));
                    });
            });
        });

        let mut first_error = None;
        for result in rx {
            match result {
                Ok(record) => on_game(record),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), |e| Err(e.into()))
    })
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub abandoned: usize,
    pub total_plies: usize,
}

impl Summary {
    pub fn of(games: &[GameRecord]) -> Summary {
        let mut summary = Summary { games: games.len(), ..Summary::default() };
        for game in games {
            summary.total_plies += game.plies;
            match game.outcome {
                Outcome::WhiteWins => summary.white_wins += 1,
                Outcome::BlackWins => summary.black_wins += 1,
                Outcome::Draw => summary.draws += 1,
                Outcome::Ongoing => summary.abandoned += 1,
            }
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.games.max(1) as f64;
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Avg plies/game: {:.1}", self.total_plies as f64 / total)?;
        writeln!(
            f,
            "White wins: {} ({:.1}%)",
            self.white_wins,
            100.0 * self.white_wins as f64 / total
        )?;
        writeln!(
            f,
            "Black wins: {} ({:.1}%)",
            self.black_wins,
            100.0 * self.black_wins as f64 / total
        )?;
        writeln!(f, "Draws: {}", self.draws)?;
        write!(f, "Abandoned at ply cap: {}", self.abandoned)
    }
}
