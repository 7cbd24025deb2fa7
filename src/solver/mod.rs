pub mod deadline;
pub mod move_order;
pub mod negamax;
pub mod tt;

pub use deadline::{run_with_deadline, CancelToken, DeadlineTimer, SolveError, TimedOutcome, TimedSolve};
pub use move_order::{order_moves, HistoryTable};
pub use negamax::{negamax_boolean, SearchAborted, SearchStats, Searcher};
pub use tt::{InMemoryTT, TTEntry, TTStats, TranspositionTable};

/// Tables kept for one board size across solve and genmove calls.
#[derive(Debug, Default)]
pub struct SolverTables {
    pub tt: InMemoryTT,
    pub history: HistoryTable,
}

impl SolverTables {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}
