//! Sliding move generation for a single piece.
//!
//! Pieces slide any distance along a row or column. A slide may end on an
//! empty tile; the king may additionally end on a corner or on the throne.
//! An empty throne never blocks a slide, so ordinary pieces pass over it
//! without being able to stop there.

use crate::board::{Board, Coord, Direction, Move, Tile, ALL_DIRECTIONS};

/// Returns true if the piece on `tile` may stop on `target`.
#[inline]
fn can_land(is_king: bool, target: Tile) -> bool {
    target.is_empty()
        || (is_king && target.intersects(Tile::CORNER.bits() | Tile::THRONE.bits()))
}

/// Appends every slide of the piece at `from` in direction `dir`.
fn scan(board: &Board, from: Coord, dir: Direction, is_king: bool, out: &mut Vec<Move>) {
    let grid = board.grid();
    let mut steps = 1;
    while let Some(to) = from.step(dir, steps, grid) {
        let target = board.tile(to);
        if can_land(is_king, target) {
            out.push(Move::new(from, to));
        } else if target != Tile::THRONE {
            break;
        }
        steps += 1;
    }
}

/// Appends all legal slides of the piece standing on `from`.
///
/// Does nothing if `from` holds no piece. The caller is responsible for
/// checking that the piece belongs to the side to move.
pub fn piece_moves_into(board: &Board, from: Coord, out: &mut Vec<Move>) {
    let tile = board.tile(from);
    if tile.piece_bits() == 0 {
        return;
    }
    let is_king = tile.has_king();
    for dir in ALL_DIRECTIONS {
        scan(board, from, dir, is_king, out);
    }
}

/// Returns all legal slides of the piece standing on `from`.
pub fn piece_moves(board: &Board, from: Coord) -> Vec<Move> {
    let mut moves = Vec::new();
    piece_moves_into(board, from, &mut moves);
    moves
}
