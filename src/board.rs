use thiserror::Error;

use crate::code::{CodeBuilder, PositionCode};
use crate::state::SearchBoard;
use crate::types::{coord_to_point, Color, CoordError, Point, MAX_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("occupied")]
    Occupied,
    #[error("off board")]
    OffBoard,
    #[error("capture")]
    Capture,
    #[error("suicide")]
    Suicide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Stone(Color),
    Border,
}

/// NoGo board: stones are never captured, and a move that would capture or
/// commit suicide is illegal.
///
/// Cells are laid out in a padded array with stride `size + 1`. Rows and
/// columns `1..=size` are on the board; row 0, column 0 and the row after the
/// last are border cells, so every on-board point has four addressable
/// neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoBoard {
    size: u8,
    cells: Vec<Cell>,
    current: Color,
    // (point played, side to move before the play)
    undo_stack: Vec<(Point, Color)>,
}

impl GoBoard {
    pub fn new(size: u8) -> Result<Self, CoordError> {
        if size == 0 || size > MAX_SIZE {
            return Err(CoordError::BoardSize(u32::from(size)));
        }
        let ns = usize::from(size) + 1;
        let len = usize::from(size) * usize::from(size) + 3 * ns;
        let mut cells = vec![Cell::Border; len];
        for row in 1..=size {
            for col in 1..=size {
                cells[coord_to_point(row, col, size).index()] = Cell::Empty;
            }
        }
        Ok(Self {
            size,
            cells,
            current: Color::Black,
            undo_stack: Vec::new(),
        })
    }

    /// Clear the board, possibly changing its size.
    pub fn reset(&mut self, size: u8) -> Result<(), CoordError> {
        *self = Self::new(size)?;
        Ok(())
    }

    #[inline]
    pub fn get(&self, point: Point) -> Cell {
        self.cells.get(point.index()).copied().unwrap_or(Cell::Border)
    }

    #[inline]
    pub fn set_current_player(&mut self, color: Color) {
        self.current = color;
    }

    #[inline]
    pub fn moves_played(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Point> {
        self.undo_stack.last().map(|&(p, _)| p)
    }

    /// On-board points in ascending index order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let size = self.size;
        (1..=size).flat_map(move |row| (1..=size).map(move |col| coord_to_point(row, col, size)))
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.points().filter(|&p| self.get(p) == Cell::Empty).collect()
    }

    #[inline]
    pub fn is_legal(&self, point: Point, color: Color) -> bool {
        self.check_move(point, color).is_ok()
    }

    /// Why `color` may not play at `point`, if it may not.
    pub fn check_move(&self, point: Point, color: Color) -> Result<(), IllegalMove> {
        match self.get(point) {
            Cell::Empty => {}
            Cell::Stone(_) => return Err(IllegalMove::Occupied),
            Cell::Border => return Err(IllegalMove::OffBoard),
        }
        // Evaluate on a scratch copy of the cells; cheap for boards this small.
        let mut scratch = self.cells.clone();
        scratch[point.index()] = Cell::Stone(color);
        let opp = Cell::Stone(color.opponent());
        let captures = self
            .neighbors(point)
            .into_iter()
            .any(|n| scratch[n.index()] == opp && !self.has_liberty(&scratch, n));
        if captures {
            return Err(IllegalMove::Capture);
        }
        if !self.has_liberty(&scratch, point) {
            return Err(IllegalMove::Suicide);
        }
        Ok(())
    }

    /// The side to move has no legal move.
    pub fn is_terminal(&self) -> bool {
        self.legal_moves(self.current).is_empty()
    }

    /// The winner once the game is over: whoever is not stuck.
    pub fn winner(&self) -> Option<Color> {
        if self.is_terminal() {
            Some(self.current.opponent())
        } else {
            None
        }
    }

    /// Rows from the top, `X` black, `O` white, `.` empty.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(usize::from(self.size) * (usize::from(self.size) + 1));
        for row in (1..=self.size).rev() {
            for col in 1..=self.size {
                out.push(match self.get(coord_to_point(row, col, self.size)) {
                    Cell::Stone(Color::Black) => 'X',
                    Cell::Stone(Color::White) => 'O',
                    Cell::Empty | Cell::Border => '.',
                });
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn neighbors(&self, point: Point) -> [Point; 4] {
        let ns = u16::from(self.size) + 1;
        let p = point.0;
        [Point(p - ns), Point(p + 1), Point(p + ns), Point(p - 1)]
    }

    /// Flood fill the group containing `start` until an empty neighbour is found.
    fn has_liberty(&self, cells: &[Cell], start: Point) -> bool {
        let color = cells[start.index()];
        let mut seen = vec![false; cells.len()];
        let mut stack = vec![start];
        seen[start.index()] = true;
        while let Some(p) = stack.pop() {
            for n in self.neighbors(p) {
                match cells[n.index()] {
                    Cell::Empty => return true,
                    c if c == color && !seen[n.index()] => {
                        seen[n.index()] = true;
                        stack.push(n);
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

impl SearchBoard for GoBoard {
    #[inline]
    fn size(&self) -> u8 {
        self.size
    }

    #[inline]
    fn current_player(&self) -> Color {
        self.current
    }

    fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.points()
            .filter(|&p| self.is_legal(p, color))
            .collect()
    }

    fn play(&mut self, point: Point, color: Color) -> bool {
        if !self.is_legal(point, color) {
            return false;
        }
        self.cells[point.index()] = Cell::Stone(color);
        self.undo_stack.push((point, self.current));
        self.current = color.opponent();
        true
    }

    fn undo(&mut self) {
        if let Some((point, previous)) = self.undo_stack.pop() {
            self.cells[point.index()] = Cell::Empty;
            self.current = previous;
        }
    }

    fn code(&self) -> PositionCode {
        let mut builder = CodeBuilder::new();
        for p in self.points() {
            builder.push_cell(match self.get(p) {
                Cell::Stone(c) => Some(c),
                Cell::Empty | Cell::Border => None,
            });
        }
        builder.finish(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_point;

    fn pt(s: &str, size: u8) -> Point {
        parse_point(s, size).unwrap()
    }

    #[test]
    fn one_by_one_has_no_legal_moves() {
        let b = GoBoard::new(1).unwrap();
        assert!(b.legal_moves(Color::Black).is_empty());
        assert!(b.is_terminal());
        assert_eq!(b.winner(), Some(Color::White));
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(GoBoard::new(0).is_err());
        assert!(GoBoard::new(MAX_SIZE + 1).is_err());
    }

    #[test]
    fn suicide_is_illegal() {
        let mut b = GoBoard::new(2).unwrap();
        assert!(b.play(pt("a2", 2), Color::White));
        assert!(b.play(pt("b1", 2), Color::White));
        // a1 would have no liberties
        assert_eq!(b.check_move(pt("a1", 2), Color::Black), Err(IllegalMove::Suicide));
    }

    #[test]
    fn capture_is_illegal() {
        let mut b = GoBoard::new(3).unwrap();
        assert!(b.play(pt("a1", 3), Color::White));
        assert!(b.play(pt("b1", 3), Color::Black));
        // a2 would remove the last liberty of the white stone on a1
        assert_eq!(b.check_move(pt("a2", 3), Color::Black), Err(IllegalMove::Capture));
        assert!(b.is_legal(pt("a2", 3), Color::White));
    }

    #[test]
    fn play_and_undo_restore_code_and_turn() {
        let mut b = GoBoard::new(3).unwrap();
        let before = b.code();
        assert!(b.play(pt("b2", 3), Color::Black));
        assert_eq!(b.current_player(), Color::White);
        assert_ne!(b.code(), before);
        b.undo();
        assert_eq!(b.code(), before);
        assert_eq!(b.current_player(), Color::Black);
        assert_eq!(b.moves_played(), 0);
    }

    #[test]
    fn illegal_play_leaves_board_unchanged() {
        let mut b = GoBoard::new(2).unwrap();
        assert!(b.play(pt("a1", 2), Color::Black));
        let snapshot = b.clone();
        assert_eq!(b.check_move(pt("a1", 2), Color::White), Err(IllegalMove::Occupied));
        assert!(!b.play(pt("a1", 2), Color::White));
        assert_eq!(b, snapshot);
    }

    #[test]
    fn render_puts_top_row_first() {
        let mut b = GoBoard::new(2).unwrap();
        assert!(b.play(pt("a2", 2), Color::Black));
        assert!(b.play(pt("b1", 2), Color::White));
        assert_eq!(b.render(), "X.\n.O\n");
    }
}
