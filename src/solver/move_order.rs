use std::cmp::Reverse;
use std::hash::BuildHasherDefault;

use hashbrown::HashMap as HbHashMap;

use crate::types::Point;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// History heuristic: moves that won at some depth before get tried first.
///
/// Scores are keyed by point only, independent of position and side to move,
/// and grow by `depth²` per winning move. They are never decremented.
#[derive(Debug, Default, Clone)]
pub struct HistoryTable {
    scores: HbHashMap<Point, u64, FastHasher>,
}

impl HistoryTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update(&mut self, point: Point, depth: u32) {
        let bonus = u64::from(depth) * u64::from(depth);
        let score = self.scores.entry(point).or_insert(0);
        *score = score.saturating_add(bonus);
    }

    #[inline]
    pub fn lookup(&self, point: Point) -> u64 {
        self.scores.get(&point).copied().unwrap_or(0)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &u64)> {
        self.scores.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Deterministic move ordering: descending history score; equal scores keep
/// the board's enumeration order (stable sort).
#[inline]
pub fn order_moves(moves: &mut [Point], history: &HistoryTable) {
    moves.sort_by_key(|&p| Reverse(history.lookup(p)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_accumulates_depth_squared() {
        let mut h = HistoryTable::new();
        assert_eq!(h.lookup(Point(3)), 0);
        h.update(Point(3), 2);
        h.update(Point(3), 3);
        assert_eq!(h.lookup(Point(3)), 4 + 9);
        // depth 0 records the move without raising its score
        h.update(Point(9), 0);
        assert_eq!(h.lookup(Point(9)), 0);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn ordering_is_stable_on_ties() {
        let mut h = HistoryTable::new();
        h.update(Point(7), 1);
        h.update(Point(2), 2);
        let mut moves = vec![Point(1), Point(2), Point(5), Point(7), Point(8)];
        order_moves(&mut moves, &h);
        assert_eq!(moves, vec![Point(2), Point(7), Point(1), Point(5), Point(8)]);
    }
}
