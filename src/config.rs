//! Rule and facade configuration.
//!
//! Every field has a default, so an empty JSON object (or
//! `GameConfig::default()`) plays the standard game.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Optional draw limits. Both are off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawClock {
    /// Declare a draw once this many plies have been played.
    pub max_plies: Option<u32>,
    /// Declare a draw after this many consecutive plies without a capture.
    pub max_plies_without_capture: Option<u32>,
}

impl DrawClock {
    /// Returns true if the clock has run out for the given counters.
    pub fn expired(&self, plies: u32, plies_since_capture: u32) -> bool {
        self.max_plies.is_some_and(|m| plies >= m)
            || self.max_plies_without_capture.is_some_and(|m| plies_since_capture >= m)
    }
}

/// Configuration shared by the board and the game facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub draw_clock: DrawClock,
    /// Filter the legal moves through the win/safety preference cascade
    /// before building the action mask.
    pub prune_actions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            draw_clock: DrawClock::default(),
            prune_actions: true,
        }
    }
}

impl GameConfig {
    /// Parses a (possibly partial) JSON configuration document.
    pub fn from_json(s: &str) -> Result<GameConfig, GameError> {
        Ok(serde_json::from_str(s)?)
    }
}
