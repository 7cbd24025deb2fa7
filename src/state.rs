use crate::code::PositionCode;
use crate::types::{Color, Point};

/// The board surface the solver drives.
///
/// The solver mutates the board in place: it plays a candidate, recurses and
/// undoes the candidate before trying the next one. `Clone` must produce an
/// independent deep copy; the time-bounded runner uses it as the restore
/// snapshot.
pub trait SearchBoard: Clone {
    fn size(&self) -> u8;

    fn current_player(&self) -> Color;

    /// Legal moves for `color` in a fixed enumeration order.
    fn legal_moves(&self, color: Color) -> Vec<Point>;

    /// Play `point` for `color`. Returns false, leaving the board untouched,
    /// when the move is illegal.
    fn play(&mut self, point: Point, color: Color) -> bool;

    /// Take back the last successful `play`.
    fn undo(&mut self);

    fn code(&self) -> PositionCode;
}

/// Legal moves for the side to move.
#[inline]
pub fn legal_moves<B: SearchBoard>(board: &B) -> Vec<Point> {
    board.legal_moves(board.current_player())
}
