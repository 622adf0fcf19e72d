//! Move application and capture resolution.
//!
//! A piece that lands next to an opposing pawn captures it when the cell
//! beyond that pawn holds a friendly piece, a corner or the throne. The king
//! is never captured by the ordinary rule: on or next to the throne it must
//! be enclosed on all four sides (the throne counting as an attacker), away
//! from it a pair of attackers on one axis is enough.

use crate::board::{Board, Coord, Direction, Move, Side, Tile, ALL_DIRECTIONS};
use crate::error::GameError;
use crate::movegen::side_moves;

/// Returns true if the pawn next to `to` in `dir` is sandwiched by a piece of
/// `mover` standing on `to`.
#[inline]
fn sandwiches(board: &Board, to: Coord, dir: Direction, mover: Side) -> bool {
    board.tile_toward(to, dir, 1).intersects(mover.opponent_pawn_mask())
        && board.tile_toward(to, dir, 2).intersects(mover.hostile_mask())
}

/// Opposing pawns that a piece of `mover` standing on `to` captures.
pub fn sandwiched_pawns(board: &Board, to: Coord, mover: Side) -> Vec<Coord> {
    let grid = board.grid();
    ALL_DIRECTIONS
        .iter()
        .filter(|&&dir| sandwiches(board, to, dir, mover))
        .filter_map(|&dir| to.step(dir, 1, grid))
        .collect()
}

/// Decides whether the black piece that just landed on `to` captured the
/// king.
///
/// The landing piece must sit next to the king with an attacker or the
/// throne on the far side; a king that walked between two attackers earlier
/// is not taken by an unrelated move.
pub fn captures_king(board: &Board, to: Coord) -> bool {
    let hostile = Tile::BLACK.bits() | Tile::THRONE.bits();
    let closes_in = ALL_DIRECTIONS.iter().any(|&dir| {
        board.tile_toward(to, dir, 1).has_king() && board.tile_toward(to, dir, 2).intersects(hostile)
    });
    if !closes_in {
        return false;
    }

    let king = board.king();
    let side = |dir| board.tile_toward(king, dir, 1);
    if board.king_near_throne() {
        ALL_DIRECTIONS.iter().all(|&dir| side(dir).intersects(hostile))
    } else {
        let black = Tile::BLACK.bits();
        (side(Direction::Up).intersects(black) && side(Direction::Down).intersects(black))
            || (side(Direction::Left).intersects(black) && side(Direction::Right).intersects(black))
    }
}

impl Board {
    /// Moves the piece of `mv.from` onto `mv.to`, keeping the throne flag on
    /// either cell and the king cache in step. No rules are checked.
    pub(crate) fn relocate(&mut self, mv: Move) {
        let from = self.tile(mv.from);
        let to = self.tile(mv.to);
        self.set_tile(mv.to, to.with_piece_of(from));
        self.set_tile(mv.from, from.without_piece());
        if from.has_king() {
            self.king = mv.to;
        }
    }

    /// Plays `mv` for `side` and resolves its consequences.
    ///
    /// Returns the cells of every captured piece, the king's cell included
    /// when it was taken. The captured king stays on the board since the
    /// game is over. Once the outcome is decided this is a no-op returning
    /// no captures.
    pub fn apply_move(&mut self, mv: Move, side: Side) -> Result<Vec<Coord>, GameError> {
        if self.outcome.is_over() {
            return Ok(Vec::new());
        }
        if !self.is_legal(mv, side) {
            return Err(GameError::IllegalMove {
                side,
                mv,
                legal: side_moves(self, side),
            });
        }

        let escapes = self.tile(mv.from).has_king() && self.tile(mv.to) == Tile::CORNER;
        self.relocate(mv);

        let mut captured = sandwiched_pawns(self, mv.to, side);
        for &c in &captured {
            self.set_tile(c, Tile::EMPTY);
        }
        let pawns = captured.len() as u8;
        match side {
            Side::White => self.black_pieces -= pawns,
            Side::Black => self.white_pieces -= pawns,
        }

        if escapes {
            self.conclude(Side::White.wins());
        }
        if side == Side::Black && captures_king(self, mv.to) {
            captured.push(self.king);
            self.white_pieces -= 1;
            self.conclude(Side::Black.wins());
        }

        self.record_ply(side, !captured.is_empty());
        Ok(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Outcome;
    use crate::protocol::notation::{parse_move, parse_position};

    fn play(board: &mut Board, s: &str, side: Side) -> Vec<Coord> {
        let mv = parse_move(s).unwrap();
        board.apply_move(mv, side).unwrap()
    }

    #[test]
    fn sandwich_capture_removes_pawn_and_counts() {
        // white pawn at d2 between black d1 and the black piece arriving on d3
        let mut board = parse_position(
            "...b.../...w.../b....../...k.../......./......./.......",
        )
        .unwrap();
        let white_before = board.white_pieces();
        let captured = play(&mut board, "a3-d3", Side::Black);
        assert_eq!(captured, vec![Coord::new(2, 4)]);
        assert_eq!(board.tile(Coord::new(2, 4)), Tile::EMPTY);
        assert_eq!(board.white_pieces(), white_before - 1);
        assert_eq!(board.current_occurrences(), 1);
    }

    #[test]
    fn corner_acts_as_hostile_anvil() {
        // black pawn on b1 next to the a1 corner; white lands on c1
        let mut board = parse_position(
            ".b...../......./..w..../...k.../......./......./.......",
        )
        .unwrap();
        let captured = play(&mut board, "c3-c1", Side::White);
        assert_eq!(captured, vec![Coord::new(1, 2)]);
        assert_eq!(board.black_pieces(), 0);
    }

    #[test]
    fn empty_throne_acts_as_hostile_anvil() {
        // white pawn on d3 next to the empty throne d4; black lands on d2
        let mut board = parse_position(
            "...b.../......./...w.../......./......./......./.k.....",
        )
        .unwrap();
        let captured = play(&mut board, "d1-d2", Side::Black);
        assert_eq!(captured, vec![Coord::new(3, 4)]);
    }

    #[test]
    fn moving_between_two_enemies_is_safe() {
        let mut board = parse_position(
            "..b.b../......./...w.../...k.../......./......./.......",
        )
        .unwrap();
        let captured = play(&mut board, "d3-d1", Side::White);
        assert!(captured.is_empty());
        assert_eq!(board.tile(Coord::new(1, 4)), Tile::WHITE);
    }

    #[test]
    fn king_escape_on_corner() {
        let mut board = parse_position(
            ".....k./......./......./......./......./......./.b.....",
        )
        .unwrap();
        play(&mut board, "f1-g1", Side::White);
        assert_eq!(board.outcome(), Outcome::WhiteWins);
        assert_eq!(board.king(), Coord::new(1, 7));
    }

    #[test]
    fn king_on_throne_needs_four_attackers() {
        // three attackers around the throne; the fourth arrives on e4
        let mut board = parse_position(
            "......./......./...b.../..bk.../...b.../......b/.......",
        )
        .unwrap();
        let captured = play(&mut board, "g6-e6", Side::Black);
        assert!(captured.is_empty());
        assert_eq!(board.outcome(), Outcome::Ongoing);

        let captured = play(&mut board, "e6-e4", Side::Black);
        assert_eq!(captured, vec![board.throne()]);
        assert_eq!(board.outcome(), Outcome::BlackWins);
        assert_eq!(board.tile(board.throne()), Tile::KING_ON_THRONE);
    }

    #[test]
    fn king_next_to_throne_counts_the_throne() {
        // king on d3, throne below it on d4; attackers on c3 and d2, the
        // third arrives on e3
        let mut board = parse_position(
            "......./...b.../..bk.../......./......./....b../.......",
        )
        .unwrap();
        let captured = play(&mut board, "e6-e3", Side::Black);
        assert_eq!(captured, vec![Coord::new(3, 4)]);
        assert_eq!(board.outcome(), Outcome::BlackWins);
    }

    #[test]
    fn king_away_from_throne_is_captured_by_two() {
        let mut board = parse_position(
            "......./.bk..../......./......./...b.../......./.......",
        )
        .unwrap();
        let white_before = board.white_pieces();
        let captured = play(&mut board, "d5-d2", Side::Black);
        assert!(captured.contains(&Coord::new(2, 3)));
        assert_eq!(board.outcome(), Outcome::BlackWins);
        assert_eq!(board.white_pieces(), white_before - 1);
    }

    #[test]
    fn white_cannot_capture_its_own_king() {
        // the king walked between two attackers earlier; a white pawn closing
        // in from above with another white pawn below must not end the game
        let mut board = parse_position(
            "......./w....../.bkb.../..w..../......./......./.......",
        )
        .unwrap();
        let captured = play(&mut board, "a2-c2", Side::White);
        assert!(captured.is_empty());
        assert_eq!(board.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn illegal_move_reports_legal_set() {
        let mut board = Board::new(7).unwrap();
        let mv = parse_move("d1-d3").unwrap();
        match board.apply_move(mv, Side::Black) {
            Err(GameError::IllegalMove { side, mv: bad, legal }) => {
                assert_eq!(side, Side::Black);
                assert_eq!(bad, mv);
                assert_eq!(legal.len(), 40);
            }
            other => panic!("expected illegal move, got {other:?}"),
        }
        let err = board.apply_move(mv, Side::White).unwrap_err();
        assert!(err.to_string().contains("white cannot play d1-d3"));
    }

    #[test]
    fn off_board_move_is_an_error() {
        let mut board = Board::new(7).unwrap();
        let before = board.clone();
        let mv = Move::new(Coord::new(20, 20), Coord::new(20, 3));
        assert!(matches!(
            board.apply_move(mv, Side::Black),
            Err(GameError::IllegalMove { mv: bad, .. }) if bad == mv
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn moves_after_game_over_are_ignored() {
        let mut board = parse_position(
            ".....k./......./......./......./......./......./.b.....",
        )
        .unwrap();
        play(&mut board, "f1-g1", Side::White);
        let before = board.clone();
        let captured = board.apply_move(parse_move("b7-c7").unwrap(), Side::Black).unwrap();
        assert!(captured.is_empty());
        assert_eq!(board, before);
    }
}
