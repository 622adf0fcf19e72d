//! Tafl rules engine library.
//!
//! Exposes the board representation, move generation, move resolution, the
//! look-ahead predicates, the action codec and the game facade for use by a
//! search agent, the integration tests and the binaries.

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod nn;
pub mod protocol;
pub mod resolve;
pub mod selfplay;

pub use board::{Board, Coord, Move, Outcome, Side};
pub use config::{DrawClock, GameConfig};
pub use error::GameError;
pub use game::TaflGame;
