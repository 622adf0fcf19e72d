//! Game facade.
//!
//! `TaflGame` fixes a board size and a configuration and exposes the engine
//! through flat action indices, the way a search or training loop consumes
//! it. Boards are owned by the caller; every method works on the board it is
//! handed.

use crate::board::{layout_for, Board, Coord, Layout, Side};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::eval::preferred_moves;
use crate::nn::{action_mask, action_size, decode, symmetries, Action, SymmetricView};
use crate::resolve::terminal_value;

/// A rule set for one board size.
#[derive(Debug, Clone)]
pub struct TaflGame {
    layout: &'static Layout,
    config: GameConfig,
}

impl TaflGame {
    /// Creates a game with the default configuration.
    pub fn new(size: usize) -> Result<TaflGame, GameError> {
        TaflGame::with_config(size, GameConfig::default())
    }

    pub fn with_config(size: usize, config: GameConfig) -> Result<TaflGame, GameError> {
        let layout = layout_for(size).ok_or(GameError::InvalidSize(size))?;
        Ok(TaflGame { layout, config })
    }

    pub fn size(&self) -> usize {
        usize::from(self.layout.size)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Black opens the game.
    pub const fn initial_side() -> Side {
        Side::Black
    }

    /// A board in the starting position.
    pub fn init_board(&self) -> Board {
        Board::from_layout(self.layout, self.config.draw_clock)
    }

    pub fn action_size(&self) -> usize {
        action_size(self.size())
    }

    /// Actions `side` may choose from, never all false.
    ///
    /// With pruning enabled the legal moves go through the preference
    /// cascade first. Generating the moves records the loss of a side that
    /// has none, in which case only the pass sentinel is set.
    pub fn legal_action_mask(&self, board: &mut Board, side: Side) -> Vec<bool> {
        let moves = if self.config.prune_actions {
            preferred_moves(board, side)
        } else {
            board.legal_moves(side)
        };
        action_mask(self.size(), &moves)
    }

    /// Plays `action` for `side` on `board` and returns the side to move
    /// next. The pass sentinel forfeits the game.
    pub fn apply_action(&self, board: &mut Board, side: Side, action: usize) -> Result<Side, GameError> {
        match decode(self.size(), action) {
            Action::Pass => board.forfeit(side),
            Action::Move(mv) => {
                board.apply_move(mv, side)?;
            }
        }
        Ok(side.opponent())
    }

    /// Copying variant of [`apply_action`](Self::apply_action).
    pub fn next_state(&self, board: &Board, side: Side, action: usize) -> Result<(Board, Side), GameError> {
        let mut next = board.clone();
        let side = self.apply_action(&mut next, side, action)?;
        Ok((next, side))
    }

    /// 0 while the game runs, +1 / -1 for a win / loss of `side`, and a small
    /// positive value for a draw.
    pub fn terminal_value(&self, board: &Board, side: Side) -> f32 {
        terminal_value(board.outcome(), side)
    }

    /// The eight symmetric views of `board`, `policy` and the king position.
    pub fn symmetries(&self, board: &Board, policy: &[f32], king: Coord) -> Vec<SymmetricView> {
        symmetries(board, policy, king)
    }

    /// Lookup key for the search tree: interior cells followed by the
    /// occurrence count of the current position.
    pub fn serialize(&self, board: &Board) -> Vec<u8> {
        board.serialize()
    }
}
