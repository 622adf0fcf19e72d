//! Move resolution.
//!
//! Applies a move to the board, removes the captured pieces and records the
//! consequences for the outcome. Speculative moves used by the look-ahead
//! predicates live here too, since they share the capture rules.

pub mod capture;
pub mod speculate;
pub mod termination;

pub use capture::{captures_king, sandwiched_pawns};
pub use speculate::{Speculation, Undo};
pub use termination::{terminal_value, DRAW_VALUE};
