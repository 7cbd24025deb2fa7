use std::fmt;

use crate::types::Color;

/// Canonical key for a position: board contents plus side to move.
///
/// Boards pack their cells exactly (no hashing), so two distinct positions
/// of the same board size never share a code. Tables are kept per board
/// size, which is why the size itself is not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionCode(u128);

impl PositionCode {
    #[inline]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Base-3 accumulator used by boards to build a `PositionCode` cell by cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeBuilder {
    acc: u128,
}

impl CodeBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one cell: `None` for empty, otherwise the stone colour.
    #[inline]
    pub fn push_cell(&mut self, stone: Option<Color>) {
        let digit = match stone {
            None => 0,
            Some(Color::Black) => 1,
            Some(Color::White) => 2,
        };
        self.acc = self.acc * 3 + digit;
    }

    /// Close the code with the side to move as the lowest bit.
    #[inline]
    pub fn finish(self, to_move: Color) -> PositionCode {
        let side = match to_move {
            Color::Black => 0,
            Color::White => 1,
        };
        PositionCode((self.acc << 1) | side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_to_move_changes_code() {
        let mut b = CodeBuilder::new();
        b.push_cell(None);
        b.push_cell(Some(Color::Black));
        assert_ne!(b.finish(Color::Black), b.finish(Color::White));
    }

    #[test]
    fn full_eight_by_eight_board_fits() {
        let mut b = CodeBuilder::new();
        for _ in 0..64 {
            b.push_cell(Some(Color::White));
        }
        // 3^64 * 2 < 2^128, so the largest code must not wrap
        let code = b.finish(Color::White);
        assert!(code.raw() > 0);
        assert_eq!(code.raw() & 1, 1);
    }
}
