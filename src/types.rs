use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported board edge. The position code packs every cell of an
/// 8x8 board plus the side to move into 128 bits exactly.
pub const MAX_SIZE: u8 = 8;

/// Column letters as used by GTP ('I' is skipped).
const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-letter protocol form: "b" or "w".
    #[inline]
    pub fn letter(self) -> &'static str {
        match self {
            Color::Black => "b",
            Color::White => "w",
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl FromStr for Color {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" => Ok(Color::Black),
            "w" => Ok(Color::White),
            _ => Err(CoordError::Color(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Index of an on-board location in the padded board array.
/// Stable across all positions of one board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point(pub u16);

impl Point {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("wrong color \"{0}\"")]
    Color(String),
    #[error("pass is not a legal move in NoGo")]
    Pass,
    #[error("wrong coordinate \"{0}\"")]
    Coordinate(String),
    #[error("board size {0} out of range 1..=8")]
    BoardSize(u32),
}

/// Board indexing helpers for the padded layout with stride `size + 1`.
#[inline]
pub fn point_to_coord(point: Point, size: u8) -> (u8, u8) {
    let ns = u16::from(size) + 1;
    ((point.0 / ns) as u8, (point.0 % ns) as u8)
}

#[inline]
pub fn coord_to_point(row: u8, col: u8, size: u8) -> Point {
    Point(u16::from(row) * (u16::from(size) + 1) + u16::from(col))
}

/// Format a point as e.g. "A1" (upper case, as gogui expects in move lists).
pub fn format_point(point: Point, size: u8) -> String {
    let (row, col) = point_to_coord(point, size);
    debug_assert!(row >= 1 && col >= 1 && row <= size && col <= size);
    let letter = COLUMN_LETTERS[usize::from(col) - 1] as char;
    format!("{letter}{row}")
}

/// Parse a GTP vertex such as "a1" or "C3" into a point on a board of `size`.
pub fn parse_point(s: &str, size: u8) -> Result<Point, CoordError> {
    let lower = s.to_ascii_lowercase();
    if lower == "pass" {
        return Err(CoordError::Pass);
    }
    let wrong = || CoordError::Coordinate(s.to_string());
    let mut chars = lower.chars();
    let col_c = chars.next().ok_or_else(wrong)?;
    if !col_c.is_ascii_lowercase() || col_c == 'i' {
        return Err(wrong());
    }
    let mut col = col_c as u32 - 'a' as u32;
    if col_c < 'i' {
        col += 1;
    }
    let row: u32 = chars.as_str().parse().map_err(|_| wrong())?;
    if row < 1 || col > u32::from(size) || row > u32::from(size) {
        return Err(wrong());
    }
    Ok(coord_to_point(row as u8, col as u8, size))
}
