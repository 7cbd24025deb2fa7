use thiserror::Error;

use crate::state::SearchBoard;

use super::deadline::CancelToken;
use super::move_order::{order_moves, HistoryTable};
use super::tt::{TTEntry, TranspositionTable};

/// The cancellation token fired while the search was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search cancelled before completion")]
pub struct SearchAborted;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, table hits included.
    pub nodes: u64,
    pub tt_hits: u64,
}

/// Exhaustive boolean negamax over a shared, mutable board.
///
/// A position is a win for the mover iff some legal move leads to a position
/// that is not a win for the opponent. The first winning move found under
/// history ordering is returned; there is no attempt to find the shortest win.
pub struct Searcher<'a> {
    tt: &'a mut dyn TranspositionTable,
    history: &'a mut HistoryTable,
    cancel: Option<&'a CancelToken>,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(tt: &'a mut dyn TranspositionTable, history: &'a mut HistoryTable) -> Self {
        Self {
            tt,
            history,
            cancel: None,
            stats: SearchStats::default(),
        }
    }

    /// Abort with `SearchAborted` once `cancel` fires. Checked on entry to
    /// every node.
    #[must_use]
    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Solve the position on `board` for its side to move. `depth` is the ply
    /// marker used for history scoring only; table keys ignore it.
    ///
    /// Every move played here is undone before this returns, on the abort
    /// path too, so the board is only ever transiently modified.
    pub fn solve<B: SearchBoard>(&mut self, board: &mut B, depth: u32) -> Result<TTEntry, SearchAborted> {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(SearchAborted);
        }
        self.stats.nodes += 1;

        let code = board.code();
        if let Some(entry) = self.tt.get(code) {
            self.stats.tt_hits += 1;
            return Ok(entry);
        }

        let color = board.current_player();
        let mut moves = board.legal_moves(color);
        order_moves(&mut moves, &*self.history);

        for mv in moves {
            if !board.play(mv, color) {
                continue;
            }
            let reply = self.solve(board, depth + 1);
            board.undo();
            if !reply?.win {
                self.history.update(mv, depth);
                let entry = TTEntry::win_with(mv);
                self.tt.put(code, entry);
                return Ok(entry);
            }
        }

        // No move wins, including the stuck case with no legal move at all.
        self.tt.put(code, TTEntry::LOSS);
        Ok(TTEntry::LOSS)
    }
}

/// Run the search to completion with no deadline.
pub fn negamax_boolean<B: SearchBoard>(
    board: &mut B,
    tt: &mut dyn TranspositionTable,
    history: &mut HistoryTable,
    depth: u32,
) -> (TTEntry, SearchStats) {
    let mut searcher = Searcher::new(tt, history);
    // Without a cancel token the search cannot abort.
    let entry = searcher.solve(board, depth).unwrap_or(TTEntry::LOSS);
    (entry, searcher.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::PositionCode;
    use crate::solver::tt::InMemoryTT;
    use crate::types::{Color, Point};

    /// Subtraction game: take 1 or 2 from a pile; whoever cannot move loses.
    /// Piles that are multiples of 3 are losses for the mover.
    #[derive(Debug, Clone)]
    struct Pile {
        count: u16,
        to_move: Color,
        taken: Vec<u16>,
    }

    impl Pile {
        fn new(count: u16) -> Self {
            Self { count, to_move: Color::Black, taken: Vec::new() }
        }
    }

    impl SearchBoard for Pile {
        fn size(&self) -> u8 {
            1
        }
        fn current_player(&self) -> Color {
            self.to_move
        }
        fn legal_moves(&self, _color: Color) -> Vec<Point> {
            (1..=2).filter(|&n| n <= self.count).map(Point).collect()
        }
        fn play(&mut self, point: Point, _color: Color) -> bool {
            if point.0 == 0 || point.0 > 2 || point.0 > self.count {
                return false;
            }
            self.count -= point.0;
            self.taken.push(point.0);
            self.to_move = self.to_move.opponent();
            true
        }
        fn undo(&mut self) {
            if let Some(n) = self.taken.pop() {
                self.count += n;
                self.to_move = self.to_move.opponent();
            }
        }
        fn code(&self) -> PositionCode {
            let side = u128::from(self.to_move == Color::White);
            PositionCode::new((u128::from(self.count) << 1) | side)
        }
    }

    #[test]
    fn empty_pile_is_a_loss() {
        let mut tt = InMemoryTT::new();
        let mut h = HistoryTable::new();
        let (entry, _) = negamax_boolean(&mut Pile::new(0), &mut tt, &mut h, 0);
        assert_eq!(entry, TTEntry::LOSS);
    }

    #[test]
    fn subtraction_game_matches_mod_three() {
        for n in 0..12u16 {
            let mut tt = InMemoryTT::new();
            let mut h = HistoryTable::new();
            let mut pile = Pile::new(n);
            let (entry, _) = negamax_boolean(&mut pile, &mut tt, &mut h, 0);
            assert_eq!(entry.win, n % 3 != 0, "pile {n}");
            if entry.win {
                assert_eq!(entry.best_move, Some(Point(n % 3)));
            }
            assert_eq!(pile.count, n);
            assert!(pile.taken.is_empty());
        }
    }

    #[test]
    fn cancelled_token_aborts_before_touching_the_board() {
        let mut tt = InMemoryTT::new();
        let mut h = HistoryTable::new();
        let token = CancelToken::new();
        token.cancel();
        let mut pile = Pile::new(5);
        let mut searcher = Searcher::new(&mut tt, &mut h).with_cancel(&token);
        assert_eq!(searcher.solve(&mut pile, 0), Err(SearchAborted));
        assert_eq!(searcher.stats().nodes, 0);
        assert!(tt.is_empty());
    }
}
