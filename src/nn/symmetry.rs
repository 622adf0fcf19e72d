//! Dihedral symmetries for training-data augmentation.
//!
//! The board, a policy over the action space and the king position are
//! transformed together under the eight symmetries of the square. Policy
//! indices are permuted through the action layout, so the total mass is
//! preserved and the sentinel entry never moves.

use super::action::{pack, sentinel, unpack};
use crate::board::{Board, Coord, Tile};

/// One of the eight symmetries of the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    Rot90,
    Rot180,
    Rot270,
    FlipRows,
    FlipColumns,
    Transpose,
    AntiTranspose,
}

pub const ALL_SYMMETRIES: [Symmetry; 8] = [
    Symmetry::Identity,
    Symmetry::Rot90,
    Symmetry::Rot180,
    Symmetry::Rot270,
    Symmetry::FlipRows,
    Symmetry::FlipColumns,
    Symmetry::Transpose,
    Symmetry::AntiTranspose,
];

impl Symmetry {
    /// Maps a 1-based interior coordinate of an `n`×`n` board.
    pub fn apply(self, c: Coord, n: u8) -> Coord {
        let (x, y) = (c.x, c.y);
        let (fx, fy) = (n + 1 - x, n + 1 - y);
        match self {
            Symmetry::Identity => Coord::new(x, y),
            Symmetry::Rot90 => Coord::new(y, fx),
            Symmetry::Rot180 => Coord::new(fx, fy),
            Symmetry::Rot270 => Coord::new(fy, x),
            Symmetry::FlipRows => Coord::new(fx, y),
            Symmetry::FlipColumns => Coord::new(x, fy),
            Symmetry::Transpose => Coord::new(y, x),
            Symmetry::AntiTranspose => Coord::new(fy, fx),
        }
    }

    /// True if rows become columns.
    pub const fn swaps_axes(self) -> bool {
        matches!(
            self,
            Symmetry::Rot90 | Symmetry::Rot270 | Symmetry::Transpose | Symmetry::AntiTranspose
        )
    }

    /// Maps an action index; the sentinel is fixed.
    pub fn apply_index(self, n: usize, index: usize) -> usize {
        if index >= sentinel(n) {
            return index;
        }
        let (x, y, to, kind) = unpack(n, index);
        let dest = if kind == 0 { (x, to) } else { (to, y) };
        let size = n as u8;
        let from = self.apply(Coord::new(x as u8, y as u8), size);
        let dest = self.apply(Coord::new(dest.0 as u8, dest.1 as u8), size);
        let kind = kind ^ usize::from(self.swaps_axes());
        let to = if kind == 0 { dest.y } else { dest.x };
        pack(n, usize::from(from.x), usize::from(from.y), usize::from(to), kind)
    }
}

/// A board, policy and king position seen through one symmetry.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricView {
    pub symmetry: Symmetry,
    /// Interior tiles in row-major order.
    pub cells: Vec<Tile>,
    pub policy: Vec<f32>,
    pub king: Coord,
}

/// Returns the eight symmetric views of `board`, `policy` and the king
/// position `king`, which must be the board's king cell.
///
/// # Panics
///
/// Panics if `policy` does not cover the action space of the board.
pub fn symmetries(board: &Board, policy: &[f32], king: Coord) -> Vec<SymmetricView> {
    let n = board.size();
    assert_eq!(policy.len(), super::action::action_size(n), "policy length");
    debug_assert_eq!(king, board.king(), "king position disagrees with the board");
    let size = n as u8;

    ALL_SYMMETRIES
        .iter()
        .map(|&symmetry| {
            let mut cells = vec![Tile::EMPTY; n * n];
            for c in board.interior() {
                let t = symmetry.apply(c, size);
                cells[(usize::from(t.x) - 1) * n + usize::from(t.y) - 1] = board.tile(c);
            }
            let mut transformed = vec![0.0; policy.len()];
            for (i, &p) in policy.iter().enumerate() {
                transformed[symmetry.apply_index(n, i)] = p;
            }
            SymmetricView {
                symmetry,
                cells,
                policy: transformed,
                king: symmetry.apply(king, size),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;
    use crate::movegen::side_moves;
    use crate::nn::action::{action_mask, action_size};
    use crate::protocol::notation::parse_position;

    fn mask_policy(board: &Board, side: Side) -> Vec<f32> {
        let moves = side_moves(board, side);
        action_mask(board.size(), &moves)
            .into_iter()
            .map(|b| if b { 1.0 / moves.len() as f32 } else { 0.0 })
            .collect()
    }

    /// Rebuilds position notation from transformed cells.
    fn position_of(cells: &[Tile], n: usize) -> String {
        cells
            .chunks(n)
            .map(|row| {
                row.iter()
                    .map(|t| {
                        if t.has_king() {
                            'k'
                        } else if *t == Tile::WHITE {
                            'w'
                        } else if *t == Tile::BLACK {
                            'b'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    #[test]
    fn index_maps_are_permutations() {
        for n in [7, 9] {
            for sym in ALL_SYMMETRIES {
                let mut seen = vec![false; action_size(n)];
                for i in 0..action_size(n) {
                    let j = sym.apply_index(n, i);
                    assert!(!seen[j], "{sym:?} maps two indices onto {j}");
                    seen[j] = true;
                }
                assert_eq!(sym.apply_index(n, sentinel(n)), sentinel(n));
            }
        }
    }

    #[test]
    fn eight_views_preserve_mass_and_sentinel() {
        let board = Board::new(9).unwrap();
        let mut policy = mask_policy(&board, Side::Black);
        policy.iter_mut().for_each(|p| *p *= 0.75);
        policy[sentinel(9)] = 0.25;
        let total: f32 = policy.iter().sum();

        let views = symmetries(&board, &policy, board.king());
        assert_eq!(views.len(), 8);
        for view in &views {
            let sum: f32 = view.policy.iter().sum();
            assert!((sum - total).abs() < 1e-4);
            assert_eq!(view.policy[sentinel(9)], 0.25);
            assert_eq!(view.king, board.throne());
        }
    }

    #[test]
    fn symmetric_start_is_invariant() {
        let board = Board::new(11).unwrap();
        let policy = mask_policy(&board, Side::White);
        for view in symmetries(&board, &policy, board.king()) {
            assert_eq!(view.policy, policy, "{:?}", view.symmetry);
        }
    }

    #[test]
    fn views_agree_with_move_generation() {
        let board = parse_position(
            ".b...../..w..../......./...k.../....b../w....../.......",
        )
        .unwrap();
        for side in [Side::Black, Side::White] {
            let policy = mask_policy(&board, side);
            for view in symmetries(&board, &policy, board.king()) {
                let moved = parse_position(&position_of(&view.cells, 7)).unwrap();
                assert_eq!(moved.king(), view.king);
                assert_eq!(view.policy, mask_policy(&moved, side), "{:?}", view.symmetry);
            }
        }
    }
}
