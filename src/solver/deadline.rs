use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{RecvTimeoutError, Sender};
use log::{debug, warn};
use thiserror::Error;

use crate::state::SearchBoard;

use super::move_order::HistoryTable;
use super::negamax::{SearchAborted, SearchStats, Searcher};
use super::tt::{TTEntry, TranspositionTable};

/// One-shot cancellation flag shared between the deadline timer and the search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Fires `token` once `limit` has elapsed unless disarmed first.
///
/// The timer thread blocks on a channel; dropping the sender (disarm) wakes
/// it up early and it exits without touching the token.
#[derive(Debug)]
pub struct DeadlineTimer {
    disarm: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DeadlineTimer {
    pub fn arm(limit: Duration, token: CancelToken) -> io::Result<Self> {
        let (tx, rx) = crossbeam_channel::bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("solve-deadline".to_string())
            .spawn(move || {
                if rx.recv_timeout(limit) == Err(RecvTimeoutError::Timeout) {
                    debug!("deadline of {limit:?} expired, cancelling search");
                    token.cancel();
                }
            })?;
        Ok(Self {
            disarm: Some(tx),
            handle: Some(handle),
        })
    }

    pub fn disarm(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.disarm.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("deadline timer thread panicked");
            }
        }
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedOutcome {
    Solved(TTEntry),
    TimedOut,
}

#[derive(Debug, Clone, Copy)]
pub struct TimedSolve {
    pub outcome: TimedOutcome,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("failed to arm deadline timer: {0}")]
    Timer(#[from] io::Error),
}

/// Solve under a wall-clock budget.
///
/// The board is snapshotted before the search starts. If the deadline fires
/// first the search is abandoned and the snapshot replaces the live board,
/// so a timed-out solve leaves no trace on the position. Table entries
/// written before the deadline stay: each one describes a fully searched
/// subtree.
pub fn run_with_deadline<B: SearchBoard>(
    board: &mut B,
    tt: &mut dyn TranspositionTable,
    history: &mut HistoryTable,
    depth: u32,
    limit: Duration,
) -> Result<TimedSolve, SolveError> {
    let snapshot = board.clone();
    let token = CancelToken::new();
    let start = Instant::now();
    let timer = DeadlineTimer::arm(limit, token.clone())?;

    let mut searcher = Searcher::new(tt, history).with_cancel(&token);
    let result = searcher.solve(board, depth);
    timer.disarm();
    let stats = searcher.stats();

    let outcome = match result {
        Ok(entry) => TimedOutcome::Solved(entry),
        Err(SearchAborted) => {
            *board = snapshot;
            TimedOutcome::TimedOut
        }
    };
    Ok(TimedSolve {
        outcome,
        stats,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_timer_never_fires() {
        let token = CancelToken::new();
        let timer = DeadlineTimer::arm(Duration::from_millis(50), token.clone()).unwrap();
        timer.disarm();
        thread::sleep(Duration::from_millis(100));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn armed_timer_fires_after_limit() {
        let token = CancelToken::new();
        let _timer = DeadlineTimer::arm(Duration::from_millis(10), token.clone()).unwrap();
        let start = Instant::now();
        while !token.is_cancelled() {
            assert!(start.elapsed() < Duration::from_secs(5), "timer did not fire");
            thread::sleep(Duration::from_millis(1));
        }
    }
}
