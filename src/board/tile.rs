//! Tile states.
//!
//! Every cell of the padded grid carries a small set of flag bits. Piece bits
//! (`WHITE`, `BLACK`, `KING`) are mutually exclusive; the only composite state
//! is the king standing on the throne. Tiles can only be built from the
//! associated constants or through the checked constructors, so an invalid
//! combination cannot be stored.

use std::fmt;

/// A tile-state bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile(u8);

impl Tile {
    pub const EMPTY: Tile = Tile(0);
    pub const WHITE: Tile = Tile(1);
    pub const BLACK: Tile = Tile(2);
    pub const KING: Tile = Tile(4);
    /// The empty throne. Hostile to every piece.
    pub const THRONE: Tile = Tile(8);
    pub const CORNER: Tile = Tile(16);
    pub const BORDER: Tile = Tile(32);
    pub const KING_ON_THRONE: Tile = Tile(4 | 8);

    /// Bits that identify a piece.
    pub const PIECES: u8 = 1 | 2 | 4;

    /// Returns the raw flag bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Rebuilds a tile from raw bits, rejecting combinations that cannot occur
    /// on a board.
    pub const fn from_bits(bits: u8) -> Option<Tile> {
        match bits {
            0 | 1 | 2 | 4 | 8 | 16 | 32 | 12 => Some(Tile(bits)),
            _ => None,
        }
    }

    /// Returns true if any bit of `mask` is set on this tile.
    #[inline]
    pub const fn intersects(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn has_king(self) -> bool {
        self.0 & Tile::KING.0 != 0
    }

    #[inline]
    pub const fn has_throne(self) -> bool {
        self.0 & Tile::THRONE.0 != 0
    }

    /// Returns the piece bits only (0 if no piece stands here).
    #[inline]
    pub const fn piece_bits(self) -> u8 {
        self.0 & Tile::PIECES
    }

    /// Returns this tile with the piece removed. Only the throne flag
    /// survives, since corners and borders never carry a piece.
    #[inline]
    pub const fn without_piece(self) -> Tile {
        Tile(self.0 & !Tile::PIECES)
    }

    /// Returns this tile with the piece bits of `from` placed on it, keeping
    /// the throne flag if present.
    #[inline]
    pub const fn with_piece_of(self, from: Tile) -> Tile {
        Tile((self.0 & Tile::THRONE.0) | from.piece_bits())
    }

    /// Single-character rendering used by `Board`'s `Display`.
    pub const fn display_char(self) -> char {
        match self.0 {
            0 => '.',
            1 => 'W',
            2 => 'B',
            4 | 12 => 'K',
            8 => 'T',
            16 => 'C',
            _ => '#',
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Tile::EMPTY => "Empty",
            Tile::WHITE => "White",
            Tile::BLACK => "Black",
            Tile::KING => "King",
            Tile::THRONE => "Throne",
            Tile::CORNER => "Corner",
            Tile::BORDER => "Border",
            Tile::KING_ON_THRONE => "KingOnThrone",
            _ => "Invalid",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bits_accepts_only_valid_states() {
        for bits in 0..=u8::MAX {
            let valid = matches!(bits, 0 | 1 | 2 | 4 | 8 | 12 | 16 | 32);
            assert_eq!(Tile::from_bits(bits).is_some(), valid, "bits {bits}");
        }
    }

    #[test]
    fn moving_off_the_throne_keeps_it() {
        assert_eq!(Tile::KING_ON_THRONE.without_piece(), Tile::THRONE);
        assert_eq!(Tile::BLACK.without_piece(), Tile::EMPTY);
    }

    #[test]
    fn moving_onto_the_throne_composes() {
        assert_eq!(Tile::THRONE.with_piece_of(Tile::KING), Tile::KING_ON_THRONE);
        assert_eq!(Tile::EMPTY.with_piece_of(Tile::KING_ON_THRONE), Tile::KING);
        assert_eq!(Tile::EMPTY.with_piece_of(Tile::BLACK), Tile::BLACK);
    }

    #[test]
    fn king_flag_survives_throne() {
        assert!(Tile::KING_ON_THRONE.has_king());
        assert!(Tile::KING_ON_THRONE.has_throne());
        assert!(!Tile::CORNER.has_king());
    }
}
