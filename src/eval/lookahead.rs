//! Look-ahead predicates.
//!
//! One-ply "what if" queries used to prune the moves offered to the search:
//! does a move hand the opponent a repetition win, does it keep the opponent
//! from an immediate king capture or escape, and does the side to move have
//! such a win itself.
//!
//! Predicates that need to try a move take `&mut Board` and play it through
//! a [`Speculation`](crate::resolve::Speculation) guard, so the board is back
//! in its original state on every return path.

use crate::board::{Board, Coord, Direction, Move, Side, Tile, ALL_DIRECTIONS};
use crate::movegen::{piece_moves, reachable_cells, side_moves};

/// The side owning the piece on `tile`. The king belongs to white.
#[inline]
fn owner(tile: Tile) -> Side {
    if tile.intersects(Tile::BLACK.bits()) {
        Side::Black
    } else {
        Side::White
    }
}

/// Edges scanned for escape routes, in priority order. Each entry names the
/// direction the king slides to reach the edge and the two directions along
/// the edge toward its corners.
const EDGE_ROUTES: [(Direction, [Direction; 2]); 4] = [
    (Direction::Up, [Direction::Right, Direction::Left]),
    (Direction::Down, [Direction::Right, Direction::Left]),
    (Direction::Left, [Direction::Up, Direction::Down]),
    (Direction::Right, [Direction::Up, Direction::Down]),
];

impl Board {
    /// True if playing `mv` for `mover` lets the opponent win by repetition.
    ///
    /// A capturing move never does, since it resets the occurrence table.
    /// Otherwise the move is flagged when the position before it has already
    /// occurred twice, or when any opponent reply produces a position that
    /// has.
    pub fn would_lead_to_third_repetition(&mut self, mv: Move, mover: Side) -> bool {
        let repeated = self.current_occurrences() >= 2;
        let mut after = self.speculate_with_captures(mv, mover);
        if after.captured_any() {
            return false;
        }
        if repeated {
            return true;
        }
        let opponent = mover.opponent();
        side_moves(&after, opponent)
            .into_iter()
            .any(|reply| after.would_be_third_repetition(reply))
    }

    /// True if `mv` captures nothing and leads to a position that has
    /// already occurred twice, so that playing it wins by repetition.
    pub fn would_be_third_repetition(&mut self, mv: Move) -> bool {
        let mover = owner(self.tile(mv.from));
        let after = self.speculate_with_captures(mv, mover);
        !after.captured_any() && after.occurrences_of(&after.pattern()) == 2
    }

    /// Finds a king move that escapes now or cannot be stopped next ply.
    ///
    /// Candidates, in order: a move onto a corner; a move next to a corner;
    /// a move onto an edge whose inner cells are all empty; a move onto an
    /// edge where the lane toward one of its corners is empty and no black
    /// piece can enter it.
    pub fn get_king_escape_move(&self) -> Option<Move> {
        let king = self.king();
        let moves = piece_moves(self, king);
        let reaches = |to: Coord| moves.iter().any(|m| m.to == to);

        if let Some(&mv) = moves.iter().find(|m| self.is_corner(m.to)) {
            return Some(mv);
        }
        if let Some(&mv) = moves.iter().find(|m| self.next_to_corner(m.to)) {
            return Some(mv);
        }

        let grid = self.grid();
        let edge_target = |dir: Direction| self.edge_cell(king, dir);
        for (dir, _) in EDGE_ROUTES {
            let to = edge_target(dir);
            if reaches(to) && self.inner_edge_empty(dir) {
                return Some(Move::new(king, to));
            }
        }

        let blocked = reachable_cells(self, Side::Black);
        for (dir, lanes) in EDGE_ROUTES {
            let to = edge_target(dir);
            if !reaches(to) {
                continue;
            }
            for lane in lanes {
                let open = (1..)
                    .map_while(|steps| to.step(lane, steps, grid))
                    .take_while(|&c| !self.is_corner(c))
                    .all(|c| self.tile(c).is_empty() && !blocked.contains(&c));
                if open {
                    return Some(Move::new(king, to));
                }
            }
        }
        None
    }

    /// Finds a move among `moves` that captures the king, if exactly one
    /// cell is missing from the enclosure.
    ///
    /// On or next to the throne the king needs attackers (or the throne) on
    /// all four sides, so the move must fill the only remaining gap. Away
    /// from it, an attacker on one side of an axis and an empty cell on the
    /// other make that empty cell a target.
    pub fn get_king_capture_move(&self, moves: &[Move]) -> Option<Move> {
        let king = self.king();
        let grid = self.grid();
        let mut targets = Vec::with_capacity(2);

        if self.king_near_throne() {
            let hostile = Tile::BLACK.bits() | Tile::THRONE.bits();
            for dir in ALL_DIRECTIONS {
                if !self.tile_toward(king, dir, 1).intersects(hostile) {
                    targets.extend(king.step(dir, 1, grid));
                }
            }
            if targets.len() != 1 {
                return None;
            }
        } else {
            for (a, b) in [(Direction::Up, Direction::Down), (Direction::Left, Direction::Right)] {
                let (ta, tb) = (self.tile_toward(king, a, 1), self.tile_toward(king, b, 1));
                if ta == Tile::BLACK && tb == Tile::EMPTY {
                    targets.extend(king.step(b, 1, grid));
                } else if tb == Tile::BLACK && ta == Tile::EMPTY {
                    targets.extend(king.step(a, 1, grid));
                }
            }
        }

        moves.iter().copied().find(|m| targets.contains(&m.to))
    }

    /// Plays `mv` for `mover` (captures included) and reports whether the
    /// opponent is kept from an immediate win: true if black then has no
    /// king capture (white mover) or white has no escape (black mover).
    pub fn would_lead_to_opponent_winning(&mut self, mv: Move, mover: Side) -> bool {
        let after = self.speculate_with_captures(mv, mover);
        match mover {
            Side::White => {
                let replies = side_moves(&after, Side::Black);
                after.get_king_capture_move(&replies).is_none()
            }
            Side::Black => after.get_king_escape_move().is_none(),
        }
    }

    fn next_to_corner(&self, c: Coord) -> bool {
        let grid = self.grid();
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&dir| c.step(dir, 1, grid))
            .any(|n| self.is_corner(n))
    }

    /// The edge cell reached from `from` by sliding all the way in `dir`.
    fn edge_cell(&self, from: Coord, dir: Direction) -> Coord {
        let n = self.size;
        match dir {
            Direction::Up => Coord::new(1, from.y),
            Direction::Down => Coord::new(n, from.y),
            Direction::Left => Coord::new(from.x, 1),
            Direction::Right => Coord::new(from.x, n),
        }
    }

    /// True if the cells of the edge in `dir`, corners and their neighbours
    /// excluded, are all empty.
    fn inner_edge_empty(&self, dir: Direction) -> bool {
        let n = self.size;
        (3..=n.saturating_sub(2)).all(|i| {
            let c = match dir {
                Direction::Up => Coord::new(1, i),
                Direction::Down => Coord::new(n, i),
                Direction::Left => Coord::new(i, 1),
                Direction::Right => Coord::new(i, n),
            };
            self.tile(c).is_empty()
        })
    }
}
