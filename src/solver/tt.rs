use std::hash::BuildHasherDefault;

use hashbrown::HashMap as HbHashMap;

use crate::code::PositionCode;
use crate::types::Point;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// Exact search result for a position, from the side-to-move perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub win: bool,
    /// A winning move when `win`; always `None` for a loss.
    pub best_move: Option<Point>,
}

impl TTEntry {
    pub const LOSS: TTEntry = TTEntry { win: false, best_move: None };

    #[inline]
    pub fn win_with(point: Point) -> Self {
        Self { win: true, best_move: Some(point) }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub puts: u64,
    pub overwrites: u64,
    pub wins: u64,
    pub losses: u64,
}

pub trait TranspositionTable {
    fn get(&self, code: PositionCode) -> Option<TTEntry>;
    fn put(&mut self, code: PositionCode, entry: TTEntry);
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory table. Every stored result is exact, so nothing is
/// ever evicted; reachable positions on the supported board sizes bound its
/// growth.
#[derive(Debug, Default)]
pub struct InMemoryTT {
    map: HbHashMap<PositionCode, TTEntry, FastHasher>,
    stats: TTStats,
}

impl InMemoryTT {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&PositionCode, &TTEntry)> {
        self.map.iter()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }
}

impl TranspositionTable for InMemoryTT {
    #[inline]
    fn get(&self, code: PositionCode) -> Option<TTEntry> {
        self.map.get(&code).copied()
    }

    #[inline]
    fn put(&mut self, code: PositionCode, entry: TTEntry) {
        debug_assert!(entry.win || entry.best_move.is_none(), "a loss carries no move");
        self.stats.puts = self.stats.puts.saturating_add(1);
        if entry.win {
            self.stats.wins = self.stats.wins.saturating_add(1);
        } else {
            self.stats.losses = self.stats.losses.saturating_add(1);
        }
        if self.map.insert(code, entry).is_some() {
            self.stats.overwrites = self.stats.overwrites.saturating_add(1);
        }
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }
}
