//! Termination bookkeeping.
//!
//! Escape and king capture are decided while the move is resolved, a side
//! without moves loses when its moves are generated. This module handles what
//! remains after every ply: the occurrence table, the third-repetition rule,
//! the optional draw clock and forfeits.
//!
//! Third repetition is won by the side whose move produced the third
//! occurrence of a position.

use crate::board::{Board, Outcome, Side};

/// Terminal value reported for a draw, kept non-zero so it cannot be confused
/// with "game still running" when values are summed.
pub const DRAW_VALUE: f32 = 1e-6;

/// Scores `outcome` from `side`'s point of view: 0 while ongoing, +1 for a
/// win, -1 for a loss and `DRAW_VALUE` for a draw.
pub fn terminal_value(outcome: Outcome, side: Side) -> f32 {
    match outcome {
        Outcome::Ongoing => 0.0,
        Outcome::Draw => DRAW_VALUE,
        Outcome::WhiteWins | Outcome::BlackWins => {
            if outcome.winner() == Some(side) {
                1.0
            } else {
                -1.0
            }
        }
    }
}

impl Board {
    /// Updates the occurrence table and the ply counters after `mover` played.
    ///
    /// A capture shrinks the material for good, so every earlier position
    /// becomes unreachable and the table restarts from the current one.
    pub(crate) fn record_ply(&mut self, mover: Side, captured: bool) {
        self.plies += 1;
        if captured {
            self.plies_since_capture = 0;
            self.reset_occurrences();
        } else {
            self.plies_since_capture += 1;
            let count = self.occurrences.entry(self.pattern()).or_insert(0);
            *count += 1;
            if *count == 3 {
                self.conclude(mover.wins());
            }
        }

        if self.draw_clock.expired(self.plies, self.plies_since_capture) {
            self.conclude(Outcome::Draw);
        }
    }

    /// Ends the game in the opponent's favour, used when `side` has to
    /// answer with the no-move action.
    pub fn forfeit(&mut self, side: Side) {
        self.conclude(side.opponent().wins());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawClock;
    use crate::protocol::notation::parse_move;

    fn shuffle(board: &mut Board, times: usize) {
        for _ in 0..times {
            for (s, side) in [("d1-c1", Side::Black), ("d3-c3", Side::White), ("c1-d1", Side::Black), ("c3-d3", Side::White)] {
                board.apply_move(parse_move(s).unwrap(), side).unwrap();
            }
        }
    }

    #[test]
    fn third_occurrence_is_won_by_the_repeating_mover() {
        let mut board = Board::new(7).unwrap();
        // the start position recurs after every four plies
        shuffle(&mut board, 1);
        assert_eq!(board.current_occurrences(), 2);
        assert_eq!(board.outcome(), Outcome::Ongoing);

        for (s, side) in [("d1-c1", Side::Black), ("d3-c3", Side::White), ("c1-d1", Side::Black)] {
            board.apply_move(parse_move(s).unwrap(), side).unwrap();
            assert_eq!(board.outcome(), Outcome::Ongoing);
        }
        board.apply_move(parse_move("c3-d3").unwrap(), Side::White).unwrap();
        assert_eq!(board.current_occurrences(), 3);
        assert_eq!(board.outcome(), Outcome::WhiteWins);
    }

    #[test]
    fn black_completing_the_repeat_wins() {
        let mut board = Board::new(7).unwrap();
        // white opens each cycle so that black's move closes it
        for _ in 0..2 {
            for (s, side) in [("d3-c3", Side::White), ("d1-c1", Side::Black), ("c3-d3", Side::White), ("c1-d1", Side::Black)] {
                board.apply_move(parse_move(s).unwrap(), side).unwrap();
            }
        }
        assert_eq!(board.current_occurrences(), 3);
        assert_eq!(board.outcome(), Outcome::BlackWins);
    }

    #[test]
    fn ply_counters_advance() {
        let mut board = Board::new(7).unwrap();
        shuffle(&mut board, 1);
        assert_eq!(board.plies(), 4);
        assert_eq!(board.plies_since_capture(), 4);
    }

    #[test]
    fn draw_clock_is_off_by_default_and_configurable() {
        let mut board = Board::with_draw_clock(
            7,
            DrawClock { max_plies: Some(3), max_plies_without_capture: None },
        )
        .unwrap();
        board.apply_move(parse_move("d1-c1").unwrap(), Side::Black).unwrap();
        board.apply_move(parse_move("d3-c3").unwrap(), Side::White).unwrap();
        assert_eq!(board.outcome(), Outcome::Ongoing);
        board.apply_move(parse_move("c1-d1").unwrap(), Side::Black).unwrap();
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn no_capture_clock() {
        let mut board = Board::new(7).unwrap();
        board.set_draw_clock(DrawClock { max_plies: None, max_plies_without_capture: Some(2) });
        board.apply_move(parse_move("d1-c1").unwrap(), Side::Black).unwrap();
        board.apply_move(parse_move("d3-c3").unwrap(), Side::White).unwrap();
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn forfeit_hands_the_win_over() {
        let mut board = Board::new(9).unwrap();
        board.forfeit(Side::Black);
        assert_eq!(board.outcome(), Outcome::WhiteWins);
        board.forfeit(Side::White);
        assert_eq!(board.outcome(), Outcome::WhiteWins);
    }

    #[test]
    fn terminal_values() {
        assert_eq!(terminal_value(Outcome::Ongoing, Side::White), 0.0);
        assert_eq!(terminal_value(Outcome::WhiteWins, Side::White), 1.0);
        assert_eq!(terminal_value(Outcome::WhiteWins, Side::Black), -1.0);
        assert_eq!(terminal_value(Outcome::BlackWins, Side::Black), 1.0);
        let draw = terminal_value(Outcome::Draw, Side::Black);
        assert!(draw > 0.0 && draw < 1e-3);
    }
}
