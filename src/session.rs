use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;

use crate::board::GoBoard;
use crate::config::{ConfigError, SolverConfig, TimeLimit};
use crate::solver::{
    negamax_boolean, run_with_deadline, SearchStats, SolveError, SolverTables, TTEntry,
    TimedOutcome, TranspositionTable,
};
use crate::state::SearchBoard;
use crate::types::{format_point, Color, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMove {
    Play(Point),
    Resign,
}

/// Verdict of a time-bounded solve for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SolveReply {
    /// The mover wins by playing `point`.
    Win {
        #[serde(rename = "winner")]
        mover: Color,
        point: Point,
    },
    /// The mover loses against best play.
    Loss { winner: Color },
    /// The deadline expired first.
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct SolveReport {
    pub reply: SolveReply,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Driver-side state: the game board, one pair of solver tables per board
/// size (created on first use, kept for the life of the session) and the
/// solve time limit. Komi is accepted by the protocol but NoGo never scores.
#[derive(Debug)]
pub struct Session {
    board: GoBoard,
    tables: BTreeMap<u8, SolverTables>,
    time_limit: TimeLimit,
}

impl Session {
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        let board = GoBoard::new(config.board_size)?;
        let mut tables = BTreeMap::new();
        tables.insert(config.board_size, SolverTables::new());
        Ok(Self {
            board,
            tables,
            time_limit: config.time_limit,
        })
    }

    #[inline]
    pub fn board(&self) -> &GoBoard {
        &self.board
    }

    #[inline]
    pub fn board_mut(&mut self) -> &mut GoBoard {
        &mut self.board
    }

    /// Tables for `size`, if that size has been used in this session.
    #[inline]
    pub fn tables(&self, size: u8) -> Option<&SolverTables> {
        self.tables.get(&size)
    }

    #[inline]
    pub fn time_limit(&self) -> TimeLimit {
        self.time_limit
    }

    pub fn set_time_limit(&mut self, secs: u64) -> Result<(), ConfigError> {
        self.time_limit = TimeLimit::new(secs)?;
        debug!("time limit set to {secs}s");
        Ok(())
    }

    /// Empty the board at `size`. Tables for a size seen before are kept.
    pub fn reset(&mut self, size: u8) -> Result<(), ConfigError> {
        self.board.reset(size)?;
        self.tables.entry(size).or_insert_with(|| {
            debug!("creating solver tables for {size}x{size}");
            SolverTables::new()
        });
        Ok(())
    }

    #[inline]
    pub fn play(&mut self, point: Point, color: Color) -> bool {
        self.board.play(point, color)
    }

    /// Search the current position to the end, without a deadline, and play
    /// the winning move for `color` if there is one.
    pub fn generate_move(&mut self, color: Color) -> GenMove {
        let (board, tables) = self.board_and_tables();
        let (entry, stats) = negamax_boolean(board, &mut tables.tt, &mut tables.history, 0);
        debug!(
            "genmove {color}: win={} nodes={} tt_hits={} tt_entries={}",
            entry.win,
            stats.nodes,
            stats.tt_hits,
            tables.tt.len()
        );
        match entry.best_move {
            Some(point) if board.play(point, color) => GenMove::Play(point),
            Some(point) => {
                warn!(
                    "winning move {} is not legal for {color}, resigning",
                    format_point(point, board.size())
                );
                GenMove::Resign
            }
            None => GenMove::Resign,
        }
    }

    /// Solve the current position within the time limit. The board is left
    /// exactly as it was, whatever the outcome.
    pub fn solve(&mut self) -> Result<SolveReport, SolveError> {
        let limit = self.time_limit.as_duration();
        let (board, tables) = self.board_and_tables();
        let mover = board.current_player();
        // History depth counts plies from the start of the game.
        let depth = u32::try_from(board.moves_played()).unwrap_or(u32::MAX);
        let run = run_with_deadline(board, &mut tables.tt, &mut tables.history, depth, limit)?;

        let reply = match run.outcome {
            TimedOutcome::Solved(TTEntry { win: true, best_move: Some(point) }) => {
                SolveReply::Win { mover, point }
            }
            TimedOutcome::Solved(_) => SolveReply::Loss { winner: mover.opponent() },
            TimedOutcome::TimedOut => {
                warn!("solve timed out after {:?} ({} nodes)", run.elapsed, run.stats.nodes);
                SolveReply::Unknown
            }
        };
        let tt_stats = tables.tt.stats();
        info!(
            "solve {reply:?} in {} ms, nodes={} tt_hits={} tt_entries={} (wins={} losses={})",
            run.elapsed.as_millis(),
            run.stats.nodes,
            run.stats.tt_hits,
            tables.tt.len(),
            tt_stats.wins,
            tt_stats.losses
        );
        Ok(SolveReport {
            reply,
            stats: run.stats,
            elapsed: run.elapsed,
        })
    }

    fn board_and_tables(&mut self) -> (&mut GoBoard, &mut SolverTables) {
        let size = self.board.size();
        let tables = self.tables.entry(size).or_default();
        (&mut self.board, tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_point;

    fn session(size: u8) -> Session {
        Session::new(SolverConfig::new(size, 5).unwrap()).unwrap()
    }

    #[test]
    fn tables_survive_board_size_changes() {
        let mut s = session(2);
        assert!(matches!(s.solve().unwrap().reply, SolveReply::Win { .. } | SolveReply::Loss { .. }));
        let entries = s.tables(2).unwrap().tt.len();
        assert!(entries > 0);

        s.reset(3).unwrap();
        assert!(s.tables(3).unwrap().tt.is_empty());
        s.reset(2).unwrap();
        assert_eq!(s.tables(2).unwrap().tt.len(), entries);
    }

    #[test]
    fn one_by_one_genmove_resigns() {
        let mut s = session(1);
        assert_eq!(s.generate_move(Color::Black), GenMove::Resign);
        assert_eq!(s.solve().unwrap().reply, SolveReply::Loss { winner: Color::White });
    }

    #[test]
    fn genmove_plays_the_winning_move() {
        let mut s = session(2);
        assert!(s.play(parse_point("a1", 2).unwrap(), Color::Black));
        assert!(s.play(parse_point("b2", 2).unwrap(), Color::White));
        let GenMove::Play(point) = s.generate_move(Color::Black) else {
            panic!("black has a forced win here");
        };
        assert_eq!(s.board().moves_played(), 3);
        assert_eq!(s.board().last_move(), Some(point));
        assert!(s.board().is_terminal());
        assert_eq!(s.board().winner(), Some(Color::Black));
    }

    #[test]
    fn time_limit_is_validated() {
        let mut s = session(2);
        assert!(s.set_time_limit(0).is_err());
        assert!(s.set_time_limit(101).is_err());
        s.set_time_limit(30).unwrap();
        assert_eq!(s.time_limit().secs(), 30);
    }
}
