//! Speculative moves for look-ahead.
//!
//! A speculative move only touches the grid and the king cache. Piece
//! counts, the occurrence table, the ply counters and the outcome are left
//! alone, so restoring the handful of cells recorded in the [`Undo`] token
//! brings the board back exactly.
//!
//! [`Speculation`] wraps the token in a guard that restores the board when
//! dropped, which covers every early return of the predicates using it.

use std::ops::{Deref, DerefMut};

use super::capture::sandwiched_pawns;
use crate::board::{Board, Coord, Move, Side, Tile};

/// Prior contents of every cell a speculative move changed.
#[derive(Debug, Clone)]
#[must_use = "an undo token that is dropped leaves the board modified"]
pub struct Undo {
    from: (Coord, Tile),
    to: (Coord, Tile),
    king: Coord,
    captured: Vec<(Coord, Tile)>,
}

impl Undo {
    pub fn has_captures(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl Board {
    /// Moves the piece for `mv` without validation or bookkeeping. With
    /// `captures_for` set, the pawns that side would sandwich are removed as
    /// well.
    pub fn apply_speculative(&mut self, mv: Move, captures_for: Option<Side>) -> Undo {
        let mut undo = Undo {
            from: (mv.from, self.tile(mv.from)),
            to: (mv.to, self.tile(mv.to)),
            king: self.king,
            captured: Vec::new(),
        };
        self.relocate(mv);
        if let Some(mover) = captures_for {
            for c in sandwiched_pawns(self, mv.to, mover) {
                undo.captured.push((c, self.tile(c)));
                self.set_tile(c, Tile::EMPTY);
            }
        }
        undo
    }

    /// Restores the cells recorded in `undo`. Tokens must be undone in the
    /// reverse order they were created.
    pub fn undo(&mut self, undo: Undo) {
        for &(c, tile) in undo.captured.iter().rev() {
            self.set_tile(c, tile);
        }
        self.set_tile(undo.to.0, undo.to.1);
        self.set_tile(undo.from.0, undo.from.1);
        self.king = undo.king;
    }

    /// Plays `mv` speculatively, leaving every neighbour in place.
    pub fn speculate(&mut self, mv: Move) -> Speculation<'_> {
        let undo = self.apply_speculative(mv, None);
        Speculation { board: self, undo: Some(undo) }
    }

    /// Plays `mv` speculatively for `mover`, including the pawns it
    /// captures.
    pub fn speculate_with_captures(&mut self, mv: Move, mover: Side) -> Speculation<'_> {
        let undo = self.apply_speculative(mv, Some(mover));
        Speculation { board: self, undo: Some(undo) }
    }
}

/// A board with one speculative move applied. Dropping the guard undoes the
/// move.
pub struct Speculation<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl Speculation<'_> {
    /// True if the speculative move removed any pawn.
    pub fn captured_any(&self) -> bool {
        self.undo.as_ref().is_some_and(Undo::has_captures)
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.undo(undo);
        }
    }
}
