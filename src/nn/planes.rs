//! Board -> feature-plane encoding for the external network.
//!
//! Produces `NUM_PLANES` planes of N×N values in row-major order, one plane
//! after the other:
//!   0  black pawn
//!   1  white pawn
//!   2  king
//!   3  throne (occupied or not)
//!   4  corner
//!   5  side to move (all ones when white moves, all zeros for black)

use crate::board::{Board, Side, Tile};

/// Number of planes per position.
pub const NUM_PLANES: usize = 6;

const PLANE_BLACK: usize = 0;
const PLANE_WHITE: usize = 1;
const PLANE_KING: usize = 2;
const PLANE_THRONE: usize = 3;
const PLANE_CORNER: usize = 4;
const PLANE_SIDE: usize = 5;

/// Encodes `board` with `side` to move.
pub fn encode_board(board: &Board, side: Side) -> Vec<f32> {
    let n = board.size();
    let area = n * n;
    let mut out = vec![0.0f32; NUM_PLANES * area];

    for (i, c) in board.interior().enumerate() {
        let tile = board.tile(c);
        if tile == Tile::BLACK {
            out[PLANE_BLACK * area + i] = 1.0;
        }
        if tile == Tile::WHITE {
            out[PLANE_WHITE * area + i] = 1.0;
        }
        if tile.has_king() {
            out[PLANE_KING * area + i] = 1.0;
        }
        if tile.has_throne() {
            out[PLANE_THRONE * area + i] = 1.0;
        }
        if tile == Tile::CORNER {
            out[PLANE_CORNER * area + i] = 1.0;
        }
    }
    if side == Side::White {
        out[PLANE_SIDE * area..].fill(1.0);
    }
    out
}
