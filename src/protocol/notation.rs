//! Move and position notation.
//!
//! Squares are written as a column letter followed by the row number, so
//! `d1` is row 1, column 4. A move joins two squares with `-`; anything
//! after an `x` lists captured squares and is ignored when parsing
//! (`d1-d3xd4`).
//!
//! Positions are written one row per segment, rows separated by `/`, each
//! cell one of `.` (empty), `b` (black), `w` (white) or `k` (king). The
//! board size follows from the number of rows; throne and corners are
//! implied by it.

use crate::board::{Board, Coord, Move, Tile, MAX_SIZE};

/// Errors that can occur while parsing notation.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid move: '{0}'")]
    InvalidMove(String),

    #[error("move is not a straight slide: '{0}'")]
    NotStraight(String),

    #[error("expected 7, 9 or 11 rows, got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {width} cells, expected {expected}")]
    WrongRowWidth { row: usize, width: usize, expected: usize },

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("expected exactly one king, found {0}")]
    KingCount(usize),

    #[error("piece on corner {0}")]
    PieceOnCorner(String),

    #[error("only the king may stand on the throne")]
    PieceOnThrone,
}

/// Parses a square such as `d1` or `k11`.
pub fn parse_square(s: &str) -> Result<Coord, NotationError> {
    let invalid = || NotationError::InvalidSquare(s.to_string());
    let mut chars = s.chars();
    let col = chars.next().ok_or_else(invalid)?;
    if !col.is_ascii_lowercase() {
        return Err(invalid());
    }
    let y = col as usize - 'a' as usize + 1;
    let x: usize = chars.as_str().parse().map_err(|_| invalid())?;
    if !(1..=MAX_SIZE).contains(&x) || y > MAX_SIZE {
        return Err(invalid());
    }
    Ok(Coord::new(x as u8, y as u8))
}

/// Formats an interior coordinate as a square.
pub fn format_square(c: Coord) -> String {
    let col = char::from(b'a' + c.y - 1);
    format!("{col}{}", c.x)
}

/// Parses a move such as `d1-d3` or `d1-d3xd4`.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let body = s.trim();
    let body = body.split_once('x').map_or(body, |(head, _)| head);
    let (from, to) = body
        .split_once('-')
        .ok_or_else(|| NotationError::InvalidMove(s.to_string()))?;
    let mv = Move::new(parse_square(from.trim())?, parse_square(to.trim())?);
    if mv.from == mv.to || (mv.from.x != mv.to.x && mv.from.y != mv.to.y) {
        return Err(NotationError::NotStraight(s.to_string()));
    }
    Ok(mv)
}

pub fn format_move(mv: Move) -> String {
    format!("{}-{}", format_square(mv.from), format_square(mv.to))
}

/// Formats a move followed by the squares it captured, e.g. `d1-d3xd4xe3`.
pub fn format_move_with_captures(mv: Move, captured: &[Coord]) -> String {
    let mut s = format_move(mv);
    for &c in captured {
        s.push('x');
        s.push_str(&format_square(c));
    }
    s
}

/// Parses a position into a fresh board.
///
/// The occurrence table starts at `{current: 1}` and the piece counts are
/// derived from the pieces placed.
pub fn parse_position(s: &str) -> Result<Board, NotationError> {
    let rows: Vec<&str> = s.trim().split('/').collect();
    let n = rows.len();
    if !matches!(n, 7 | 9 | 11) {
        return Err(NotationError::WrongRowCount(n));
    }

    let mut board = Board::blank(n as u8);
    let mut kings = 0;
    for (i, row) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != n {
            return Err(NotationError::WrongRowWidth { row: i + 1, width, expected: n });
        }
        for (j, ch) in row.chars().enumerate() {
            let c = Coord::new(i as u8 + 1, j as u8 + 1);
            let piece = match ch {
                '.' => continue,
                'b' => Tile::BLACK,
                'w' => Tile::WHITE,
                'k' => {
                    kings += 1;
                    Tile::KING
                }
                other => return Err(NotationError::InvalidPiece(other)),
            };
            let tile = board.tile(c);
            if tile == Tile::CORNER {
                return Err(NotationError::PieceOnCorner(format_square(c)));
            }
            if tile.has_throne() {
                if piece != Tile::KING {
                    return Err(NotationError::PieceOnThrone);
                }
                board.set_tile(c, Tile::KING_ON_THRONE);
            } else {
                board.set_tile(c, piece);
            }
        }
    }
    if kings != 1 {
        return Err(NotationError::KingCount(kings));
    }

    board.finish_setup();
    Ok(board)
}

/// Encodes the pieces of `board` in position notation.
pub fn encode_position(board: &Board) -> String {
    let n = board.size() as u8;
    let rows: Vec<String> = (1..=n)
        .map(|x| {
            (1..=n)
                .map(|y| {
                    let tile = board.tile(Coord::new(x, y));
                    if tile.has_king() {
                        'k'
                    } else if tile == Tile::WHITE {
                        'w'
                    } else if tile == Tile::BLACK {
                        'b'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();
    rows.join("/")
}
