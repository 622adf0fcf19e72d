//! Error types surfaced by the engine.

use crate::board::{Move, Side};
use crate::protocol::notation::format_move;

/// Errors returned by board construction and move application.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("unsupported board size {0}, expected 7, 9 or 11")]
    InvalidSize(usize),

    #[error("{side} cannot play {}; legal moves: [{}]", format_move(*mv), format_moves(legal))]
    IllegalMove {
        side: Side,
        mv: Move,
        legal: Vec<Move>,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|m| format_move(*m)).collect::<Vec<_>>().join(", ")
}
