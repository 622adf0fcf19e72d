//! Coordinates, moves, sides and outcomes.
//!
//! Coordinates address the padded grid: `x` is the row and `y` the column,
//! both running `0..=N+1` with `0` and `N+1` on the border ring. Interior
//! cells therefore use the 1-based coordinates that the action codec and the
//! notation expose.

use std::fmt;

use super::tile::Tile;

/// A cell on the padded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Coord { x, y }
    }

    /// Returns the neighbouring cell `steps` cells away in `dir`, or `None`
    /// if that leaves the padded grid of side `grid`.
    #[inline]
    pub fn step(self, dir: Direction, steps: u8, grid: u8) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = i16::from(self.x) + i16::from(dx) * i16::from(steps);
        let y = i16::from(self.y) + i16::from(dy) * i16::from(steps);
        let range = 0..i16::from(grid);
        if range.contains(&x) && range.contains(&y) {
            Some(Coord::new(x as u8, y as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Scan order used everywhere a direction loop appears.
pub const ALL_DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

impl Direction {
    /// Row/column delta of one step.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A straight-line slide from one interior cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }

    /// True if the move stays on its row.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        self.from.x == self.to.x
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The two sides. White defends the king, black attacks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Bits of every piece this side moves (the king belongs to white).
    #[inline]
    pub const fn piece_mask(self) -> u8 {
        match self {
            Side::White => Tile::WHITE.bits() | Tile::KING.bits(),
            Side::Black => Tile::BLACK.bits(),
        }
    }

    /// Bits of the opponent's ordinary pieces, the ones sandwich captures
    /// can remove. The king is handled separately.
    #[inline]
    pub const fn opponent_pawn_mask(self) -> u8 {
        match self {
            Side::White => Tile::BLACK.bits(),
            Side::Black => Tile::WHITE.bits(),
        }
    }

    /// Bits that complete a sandwich for this side: its own pieces plus the
    /// permanently hostile corner and throne.
    #[inline]
    pub const fn hostile_mask(self) -> u8 {
        self.piece_mask() | Tile::CORNER.bits() | Tile::THRONE.bits()
    }

    /// The outcome in which this side has won.
    pub const fn wins(self) -> Outcome {
        match self {
            Side::White => Outcome::WhiteWins,
            Side::Black => Outcome::BlackWins,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Game outcome. Every state other than `Ongoing` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    #[default]
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning side, if any.
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::WhiteWins => Some(Side::White),
            Outcome::BlackWins => Some(Side::Black),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Ongoing => "ongoing",
            Outcome::WhiteWins => "white wins",
            Outcome::BlackWins => "black wins",
            Outcome::Draw => "draw",
        };
        f.write_str(s)
    }
}
