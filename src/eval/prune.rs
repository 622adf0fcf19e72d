//! Move preference cascade.
//!
//! Narrows the legal moves of the side to move before they are turned into
//! an action mask: immediate wins first, then moves that hand the opponent
//! nothing, and only if neither exists the full legal list.

use crate::board::{Board, Move, Side};

/// Returns the moves `side` should choose from.
///
/// 1. No legal move: the empty list (the board records the loss).
/// 2. Winning moves: the king escape (white) or king capture (black), plus
///    every move completing a third repetition.
/// 3. Safe moves: those that neither risk a repetition loss nor give the
///    opponent an immediate win.
/// 4. Otherwise every legal move.
pub fn preferred_moves(board: &mut Board, side: Side) -> Vec<Move> {
    let moves = board.legal_moves(side);
    if moves.is_empty() {
        return moves;
    }

    let decisive = match side {
        Side::White => board.get_king_escape_move(),
        Side::Black => board.get_king_capture_move(&moves),
    };
    let mut winning: Vec<Move> = decisive.into_iter().collect();
    for &mv in &moves {
        if !winning.contains(&mv) && board.would_be_third_repetition(mv) {
            winning.push(mv);
        }
    }
    if !winning.is_empty() {
        return winning;
    }

    let safe: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&mv| {
            !board.would_lead_to_third_repetition(mv, side)
                && board.would_lead_to_opponent_winning(mv, side)
        })
        .collect();
    if safe.is_empty() {
        moves
    } else {
        safe
    }
}
