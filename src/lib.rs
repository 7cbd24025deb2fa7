#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation, clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod types;
pub mod code;
pub mod board;
pub mod state;
pub mod rng;
pub mod playout;
pub mod config;

pub mod solver;
pub mod session;
pub mod gtp;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::{Cell, GoBoard, IllegalMove};
pub use crate::code::PositionCode;
pub use crate::config::{ConfigError, SolverConfig, TimeLimit};
pub use crate::gtp::{GtpConnection, GtpError};
pub use crate::session::{GenMove, Session, SolveReply, SolveReport};
pub use crate::solver::{
    negamax_boolean, run_with_deadline, HistoryTable, InMemoryTT, SolverTables, TTEntry,
    TimedOutcome, TranspositionTable,
};
pub use crate::state::{legal_moves, SearchBoard};
pub use crate::types::{format_point, parse_point, Color, CoordError, Point};
