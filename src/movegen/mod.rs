//! Legal move generation.
//!
//! `side_moves` is the pure generator used by the look-ahead predicates.
//! `Board::legal_moves` wraps it for the side actually to move and records
//! the loss of a side left without any move.

pub mod movement;

pub use movement::{piece_moves, piece_moves_into};

use crate::board::{Board, Coord, Move, Side};

/// Generates every legal move for `side` without touching the board.
///
/// Cells are visited in row-major order and each piece's slides in
/// up/down/left/right order, so the result is deterministic.
pub fn side_moves(board: &Board, side: Side) -> Vec<Move> {
    let mask = side.piece_mask();
    let mut moves = Vec::new();
    for from in board.interior() {
        if board.tile(from).intersects(mask) {
            piece_moves_into(board, from, &mut moves);
        }
    }
    moves
}

/// Every cell that some piece of `side` could reach this ply.
pub fn reachable_cells(board: &Board, side: Side) -> Vec<Coord> {
    side_moves(board, side).into_iter().map(|m| m.to).collect()
}

impl Board {
    /// Generates the legal moves for the side to move.
    ///
    /// If `side` has no legal move the game ends immediately in the
    /// opponent's favour (unless it was already decided).
    pub fn legal_moves(&mut self, side: Side) -> Vec<Move> {
        let moves = side_moves(self, side);
        if moves.is_empty() {
            self.conclude(side.opponent().wins());
        }
        moves
    }

    /// Returns true if `side` may play `mv` in the current position.
    pub fn is_legal(&self, mv: Move, side: Side) -> bool {
        self.is_interior(mv.from)
            && self.is_interior(mv.to)
            && self.tile(mv.from).intersects(side.piece_mask())
            && piece_moves(self, mv.from).contains(&mv)
    }
}
