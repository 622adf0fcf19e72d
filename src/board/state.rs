//! Board state.
//!
//! Holds the padded grid, the cached king position, piece counts, the
//! occurrence table used for repetition detection, the outcome and the ply
//! counters feeding the optional draw clock.
//!
//! The grid is a fixed-size array with a constant stride, large enough for
//! the biggest supported board, so a `Board` clones without touching the
//! grid allocator; only the occurrence table lives on the heap.

use std::collections::HashMap;
use std::fmt;

use super::coord::{Coord, Direction, Outcome};
use super::layout::{layout_for, Layout};
use super::tile::Tile;
use crate::config::DrawClock;
use crate::error::GameError;

/// Largest supported board side.
pub const MAX_SIZE: usize = 11;

/// Row stride of the padded grid.
pub const GRID_STRIDE: usize = MAX_SIZE + 2;

const GRID_CELLS: usize = GRID_STRIDE * GRID_STRIDE;

/// Exact byte pattern of the interior cells, the key of the occurrence table.
pub type Pattern = Vec<u8>;

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) size: u8,
    pub(crate) cells: [Tile; GRID_CELLS],
    pub(crate) king: Coord,
    pub(crate) white_pieces: u8,
    pub(crate) black_pieces: u8,
    pub(crate) outcome: Outcome,
    pub(crate) occurrences: HashMap<Pattern, u32>,
    pub(crate) plies: u32,
    pub(crate) plies_since_capture: u32,
    pub(crate) draw_clock: DrawClock,
}

impl Board {
    /// Creates a board in the historical starting position for `size`.
    pub fn new(size: usize) -> Result<Board, GameError> {
        Board::with_draw_clock(size, DrawClock::default())
    }

    /// Creates a starting board with an explicit draw clock.
    pub fn with_draw_clock(size: usize, draw_clock: DrawClock) -> Result<Board, GameError> {
        let layout = layout_for(size).ok_or(GameError::InvalidSize(size))?;
        Ok(Board::from_layout(layout, draw_clock))
    }

    /// Sets up `layout` with the king on the throne.
    pub fn from_layout(layout: &Layout, draw_clock: DrawClock) -> Board {
        let mut board = Board::blank(layout.size);
        board.draw_clock = draw_clock;
        for &(x, y) in layout.black {
            board.set_tile(Coord::new(x, y), Tile::BLACK);
        }
        for &(x, y) in layout.white {
            board.set_tile(Coord::new(x, y), Tile::WHITE);
        }
        let throne = board.throne();
        board.set_tile(throne, Tile::KING_ON_THRONE);
        board.finish_setup();
        board
    }

    /// Builds the fixed tiles (border, corners, empty throne) of a board with
    /// no pieces. Callers place pieces and then call `finish_setup`.
    pub(crate) fn blank(size: u8) -> Board {
        let mut board = Board {
            size,
            cells: [Tile::EMPTY; GRID_CELLS],
            king: Coord::new(0, 0),
            white_pieces: 0,
            black_pieces: 0,
            outcome: Outcome::Ongoing,
            occurrences: HashMap::new(),
            plies: 0,
            plies_since_capture: 0,
            draw_clock: DrawClock::default(),
        };
        let last = size + 1;
        for i in 0..=last {
            board.set_tile(Coord::new(0, i), Tile::BORDER);
            board.set_tile(Coord::new(last, i), Tile::BORDER);
            board.set_tile(Coord::new(i, 0), Tile::BORDER);
            board.set_tile(Coord::new(i, last), Tile::BORDER);
        }
        for corner in board.corners() {
            board.set_tile(corner, Tile::CORNER);
        }
        let throne = board.throne();
        board.set_tile(throne, Tile::THRONE);
        board
    }

    /// Derives the king position and piece counts from the grid and seeds the
    /// occurrence table with the current pattern.
    pub(crate) fn finish_setup(&mut self) {
        self.white_pieces = 0;
        self.black_pieces = 0;
        for c in self.interior() {
            let tile = self.tile(c);
            if tile.has_king() {
                self.king = c;
                self.white_pieces += 1;
            } else if tile == Tile::WHITE {
                self.white_pieces += 1;
            } else if tile == Tile::BLACK {
                self.black_pieces += 1;
            }
        }
        self.reset_occurrences();
    }

    /// Board side length (7, 9 or 11).
    #[inline]
    pub fn size(&self) -> usize {
        usize::from(self.size)
    }

    /// Side length of the padded grid.
    #[inline]
    pub fn grid(&self) -> u8 {
        self.size + 2
    }

    /// The central throne.
    #[inline]
    pub fn throne(&self) -> Coord {
        let c = (self.size + 1) / 2;
        Coord::new(c, c)
    }

    /// The four corner escape tiles.
    pub fn corners(&self) -> [Coord; 4] {
        let n = self.size;
        [Coord::new(1, 1), Coord::new(1, n), Coord::new(n, 1), Coord::new(n, n)]
    }

    /// True if `c` lies inside the `N`×`N` playing area.
    pub fn is_interior(&self, c: Coord) -> bool {
        (1..=self.size).contains(&c.x) && (1..=self.size).contains(&c.y)
    }

    pub fn is_corner(&self, c: Coord) -> bool {
        self.corners().contains(&c)
    }

    /// Iterates over the interior cells in row-major order.
    pub fn interior(&self) -> impl Iterator<Item = Coord> {
        let n = self.size;
        (1..=n).flat_map(move |x| (1..=n).map(move |y| Coord::new(x, y)))
    }

    #[inline]
    fn index(c: Coord) -> usize {
        usize::from(c.x) * GRID_STRIDE + usize::from(c.y)
    }

    /// Tile at a padded-grid coordinate.
    #[inline]
    pub fn tile(&self, c: Coord) -> Tile {
        self.cells[Self::index(c)]
    }

    /// Tile `steps` cells away from `c` in `dir`. Anything beyond the padded
    /// grid reads as border.
    #[inline]
    pub fn tile_toward(&self, c: Coord, dir: Direction, steps: u8) -> Tile {
        c.step(dir, steps, self.grid()).map_or(Tile::BORDER, |n| self.tile(n))
    }

    #[inline]
    pub(crate) fn set_tile(&mut self, c: Coord, tile: Tile) {
        self.cells[Self::index(c)] = tile;
    }

    /// Cached king position.
    #[inline]
    pub fn king(&self) -> Coord {
        self.king
    }

    /// True if the king stands on the throne or next to it.
    pub fn king_near_throne(&self) -> bool {
        let k = self.king;
        self.tile(k).has_throne()
            || crate::board::ALL_DIRECTIONS
                .iter()
                .any(|&d| self.tile_toward(k, d, 1).has_throne())
    }

    /// Number of white pieces, king included.
    pub fn white_pieces(&self) -> u8 {
        self.white_pieces
    }

    pub fn black_pieces(&self) -> u8 {
        self.black_pieces
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Plies played on this board.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn plies_since_capture(&self) -> u32 {
        self.plies_since_capture
    }

    pub fn draw_clock(&self) -> DrawClock {
        self.draw_clock
    }

    /// Replaces the draw clock; the counters are kept.
    pub fn set_draw_clock(&mut self, clock: DrawClock) {
        self.draw_clock = clock;
    }

    /// Sets the outcome unless the game is already decided.
    pub(crate) fn conclude(&mut self, outcome: Outcome) {
        if self.outcome == Outcome::Ongoing {
            self.outcome = outcome;
        }
    }

    /// Exact byte pattern of the interior.
    pub fn pattern(&self) -> Pattern {
        self.interior().map(|c| self.tile(c).bits()).collect()
    }

    /// How often `pattern` has occurred since the last capture.
    pub fn occurrences_of(&self, pattern: &[u8]) -> u32 {
        self.occurrences.get(pattern).copied().unwrap_or(0)
    }

    /// How often the current position has occurred, including now.
    pub fn current_occurrences(&self) -> u32 {
        self.occurrences_of(&self.pattern())
    }

    /// Clears the occurrence table down to the current position.
    pub(crate) fn reset_occurrences(&mut self) {
        self.occurrences.clear();
        self.occurrences.insert(self.pattern(), 1);
    }

    /// Canonical lookup key: interior tile bytes followed by the occurrence
    /// count of this exact pattern.
    pub fn serialize(&self) -> Vec<u8> {
        let mut key = self.pattern();
        let count = self.occurrences_of(&key);
        key.push(u8::try_from(count).unwrap_or(u8::MAX));
        key
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 1..=self.size {
            for y in 1..=self.size {
                let ch = self.tile(Coord::new(x, y)).display_char();
                if y > 1 {
                    f.write_str(" ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "occurrences: {}", self.current_occurrences())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_sizes() {
        for size in [0, 5, 8, 10, 13] {
            assert!(matches!(Board::new(size), Err(GameError::InvalidSize(s)) if s == size));
        }
    }

    #[test]
    fn initial_position_invariants() {
        for (size, white, black) in [(7, 5, 8), (9, 9, 16), (11, 13, 24)] {
            let board = Board::new(size).unwrap();
            assert_eq!(board.white_pieces(), white);
            assert_eq!(board.black_pieces(), black);
            assert_eq!(board.king(), board.throne());
            assert_eq!(board.tile(board.throne()), Tile::KING_ON_THRONE);
            assert_eq!(board.outcome(), Outcome::Ongoing);
            assert_eq!(board.current_occurrences(), 1);
            for corner in board.corners() {
                assert_eq!(board.tile(corner), Tile::CORNER);
            }
            let last = board.grid() - 1;
            for i in 0..=last {
                assert_eq!(board.tile(Coord::new(0, i)), Tile::BORDER);
                assert_eq!(board.tile(Coord::new(last, i)), Tile::BORDER);
                assert_eq!(board.tile(Coord::new(i, 0)), Tile::BORDER);
                assert_eq!(board.tile(Coord::new(i, last)), Tile::BORDER);
            }
            let kings = board.interior().filter(|&c| board.tile(c).has_king()).count();
            assert_eq!(kings, 1);
        }
    }

    #[test]
    fn tile_toward_reads_border_off_grid() {
        let board = Board::new(7).unwrap();
        let c = Coord::new(1, 4);
        assert_eq!(board.tile_toward(c, Direction::Up, 1), Tile::BORDER);
        assert_eq!(board.tile_toward(c, Direction::Up, 2), Tile::BORDER);
        assert_eq!(board.tile_toward(c, Direction::Down, 1), Tile::BLACK);
    }

    #[test]
    fn serialize_is_interior_plus_count() {
        let board = Board::new(9).unwrap();
        let key = board.serialize();
        assert_eq!(key.len(), 9 * 9 + 1);
        assert_eq!(*key.last().unwrap(), 1);
        assert_eq!(key, board.clone().serialize());
    }

    #[test]
    fn king_starts_near_throne() {
        let board = Board::new(11).unwrap();
        assert!(board.king_near_throne());
    }

    #[test]
    fn display_marks_special_tiles() {
        let board = Board::new(7).unwrap();
        let text = board.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "C . . B . . C");
        assert!(text.ends_with("occurrences: 1"));
    }
}
