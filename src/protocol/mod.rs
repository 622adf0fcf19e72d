//! Text notation.
//!
//! Parsing and formatting of squares, moves and whole positions, used by the
//! replay tool, the self-play records and the scenario tests.

pub mod notation;

pub use notation::{
    encode_position, format_move, format_move_with_captures, format_square, parse_move,
    parse_position, parse_square, NotationError,
};
