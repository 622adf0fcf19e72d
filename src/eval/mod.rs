//! Move evaluation.
//!
//! Look-ahead predicates on the board and the preference cascade built on
//! top of them.

pub mod lookahead;
pub mod prune;

pub use prune::preferred_moves;
