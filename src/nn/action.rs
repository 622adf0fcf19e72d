//! Action codec.
//!
//! The action space of an N×N board has `N³·2 + 1` entries. Index
//! `(((x-1)·N + (y-1))·N + (to-1))·2 + kind` names the slide of the piece on
//! `(x, y)`: `kind` 0 keeps the row and `to` is the destination column,
//! `kind` 1 keeps the column and `to` is the destination row. The last index
//! is the pass sentinel, offered only when no move exists.
//!
//! Indices whose destination equals the origin decode to a null move; they
//! never appear in a mask.

use crate::board::{Coord, Move};

/// Number of actions for an `n`×`n` board.
#[inline]
pub const fn action_size(n: usize) -> usize {
    n * n * n * 2 + 1
}

/// Index of the pass sentinel.
#[inline]
pub const fn sentinel(n: usize) -> usize {
    n * n * n * 2
}

/// A decoded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Move),
    /// No move is available; playing it forfeits the game.
    Pass,
}

/// Slide kinds of the action layout.
const ALONG_ROW: usize = 0;
const ALONG_COLUMN: usize = 1;

/// The `(x, y, to, kind)` components of a non-sentinel index.
#[inline]
pub(crate) fn unpack(n: usize, index: usize) -> (usize, usize, usize, usize) {
    let kind = index % 2;
    let rest = index / 2;
    let to = rest % n + 1;
    let rest = rest / n;
    (rest / n + 1, rest % n + 1, to, kind)
}

#[inline]
pub(crate) fn pack(n: usize, x: usize, y: usize, to: usize, kind: usize) -> usize {
    (((x - 1) * n + (y - 1)) * n + (to - 1)) * 2 + kind
}

/// Encodes a straight slide.
pub fn encode_move(n: usize, mv: Move) -> usize {
    let (x, y) = (usize::from(mv.from.x), usize::from(mv.from.y));
    if mv.is_horizontal() {
        pack(n, x, y, usize::from(mv.to.y), ALONG_ROW)
    } else {
        pack(n, x, y, usize::from(mv.to.x), ALONG_COLUMN)
    }
}

pub fn encode(n: usize, action: Action) -> usize {
    match action {
        Action::Move(mv) => encode_move(n, mv),
        Action::Pass => sentinel(n),
    }
}

/// Decodes an action index.
///
/// # Panics
///
/// Panics if `index` is outside the action space of an `n`×`n` board.
pub fn decode(n: usize, index: usize) -> Action {
    assert!(
        index < action_size(n),
        "action index {index} out of range for a {n}x{n} board"
    );
    if index == sentinel(n) {
        return Action::Pass;
    }
    let (x, y, to, kind) = unpack(n, index);
    let from = Coord::new(x as u8, y as u8);
    let to = if kind == ALONG_ROW {
        Coord::new(x as u8, to as u8)
    } else {
        Coord::new(to as u8, y as u8)
    };
    Action::Move(Move::new(from, to))
}

/// Builds the action mask for `moves`: one entry per action, with only the
/// sentinel set when `moves` is empty.
pub fn action_mask(n: usize, moves: &[Move]) -> Vec<bool> {
    let mut mask = vec![false; action_size(n)];
    if moves.is_empty() {
        mask[sentinel(n)] = true;
    }
    for &mv in moves {
        mask[encode_move(n, mv)] = true;
    }
    mask
}
