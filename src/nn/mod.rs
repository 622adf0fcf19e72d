//! Interface to the external policy/value network.
//!
//! The action codec shared with the search, the symmetry transforms used to
//! augment training samples, and the feature planes fed to the network.

pub mod action;
pub mod planes;
pub mod symmetry;

pub use action::{action_mask, action_size, decode, encode, encode_move, sentinel, Action};
pub use planes::{encode_board, NUM_PLANES};
pub use symmetry::{symmetries, SymmetricView, Symmetry, ALL_SYMMETRIES};
