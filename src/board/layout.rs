//! Initial piece layouts.
//!
//! One entry per supported board size. Coordinates are 1-based interior
//! `(row, column)` pairs; the king always starts on the central throne, and
//! corners, throne and border are derived from the size.

/// Starting position for one board size.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub size: u8,
    pub black: &'static [(u8, u8)],
    /// White pawns, king excluded.
    pub white: &'static [(u8, u8)],
}

/// Brandubh-style cross.
const BLACK_7: [(u8, u8); 8] = [(1, 4), (2, 4), (4, 1), (4, 2), (4, 6), (4, 7), (6, 4), (7, 4)];
const WHITE_7: [(u8, u8); 4] = [(3, 4), (4, 3), (4, 5), (5, 4)];

/// Tablut.
const BLACK_9: [(u8, u8); 16] = [
    (1, 4), (1, 5), (1, 6), (2, 5),
    (9, 4), (9, 5), (9, 6), (8, 5),
    (4, 1), (5, 1), (6, 1), (5, 2),
    (4, 9), (5, 9), (6, 9), (5, 8),
];
const WHITE_9: [(u8, u8); 8] = [(3, 5), (4, 5), (5, 3), (5, 4), (5, 6), (5, 7), (6, 5), (7, 5)];

/// Hnefatafl with the square fortress.
const BLACK_11: [(u8, u8); 24] = [
    (1, 4), (1, 5), (1, 6), (1, 7), (1, 8), (2, 6),
    (11, 4), (11, 5), (11, 6), (11, 7), (11, 8), (10, 6),
    (4, 1), (5, 1), (6, 1), (7, 1), (8, 1), (6, 2),
    (4, 11), (5, 11), (6, 11), (7, 11), (8, 11), (6, 10),
];
const WHITE_11: [(u8, u8); 12] = [
    (5, 5), (5, 6), (5, 7),
    (6, 5), (6, 7),
    (7, 5), (7, 6), (7, 7),
    (4, 6), (6, 8), (6, 4), (8, 6),
];

pub const LAYOUTS: [Layout; 3] = [
    Layout { size: 7, black: &BLACK_7, white: &WHITE_7 },
    Layout { size: 9, black: &BLACK_9, white: &WHITE_9 },
    Layout { size: 11, black: &BLACK_11, white: &WHITE_11 },
];

/// Looks up the layout for a board size.
pub fn layout_for(size: usize) -> Option<&'static Layout> {
    LAYOUTS.iter().find(|l| usize::from(l.size) == size)
}
