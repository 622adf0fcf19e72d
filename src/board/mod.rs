//! Board representation and game-state types.
//!
//! Contains the tile flags, coordinates and moves, the initial layouts and
//! the board state itself.

pub mod coord;
pub mod layout;
pub mod state;
pub mod tile;

pub use coord::{Coord, Direction, Move, Outcome, Side, ALL_DIRECTIONS};
pub use layout::{layout_for, Layout, LAYOUTS};
pub use state::{Board, Pattern, GRID_STRIDE, MAX_SIZE};
pub use tile::Tile;
