//! Transposition table keyed by full board snapshots
//!
//! Positions reached through different move orders share one entry. A stored
//! result is only handed back when it was searched at least as deep as the
//! probe asks for; shallower entries are invisible to deeper searches.
//!
//! ```
//! use hexsearch_core::{Board, Bound, Player, Pos, TranspositionTable};
//!
//! let mut board = Board::new(5).unwrap();
//! board.make_move(Pos::new(2, 2), Player::Blue);
//!
//! let mut tt = TranspositionTable::new();
//! tt.store(board.key(), 3, 120, Bound::Exact);
//!
//! assert!(tt.probe(&board.key(), 3).is_some());
//! assert!(tt.probe(&board.key(), 4).is_none());
//! ```

use rustc_hash::FxHashMap;

use crate::board::BoardKey;

/// How a stored value relates to the true minimax value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// Failed high: true value >= stored value
    LowerBound,
    /// Failed low: true value <= stored value
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub depth: i32,
    pub value: i32,
    pub bound: Bound,
}

/// Map from board snapshot to the deepest search result seen for it
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: FxHashMap<BoardKey, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key` if it was searched to at least `depth`
    #[must_use]
    pub fn probe(&self, key: &BoardKey, depth: i32) -> Option<TtEntry> {
        self.entries
            .get(key)
            .copied()
            .filter(|entry| entry.depth >= depth)
    }

    /// Record a result. An existing deeper entry for the same position is kept.
    pub fn store(&mut self, key: BoardKey, depth: i32, value: i32, bound: Bound) {
        let entry = TtEntry { depth, value, bound };
        self.entries
            .entry(key)
            .and_modify(|existing| {
                if depth >= existing.depth {
                    *existing = entry;
                }
            })
            .or_insert(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Player, Pos};

    fn key_after(moves: &[(usize, usize, Player)]) -> BoardKey {
        let mut board = Board::new(4).unwrap();
        for &(r, c, p) in moves {
            board.make_move(Pos::new(r, c), p);
        }
        board.key()
    }

    #[test]
    fn test_depth_dominance() {
        let mut tt = TranspositionTable::new();
        let key = key_after(&[(0, 0, Player::Blue)]);
        tt.store(key.clone(), 2, 50, Bound::Exact);

        assert_eq!(tt.probe(&key, 1).map(|e| e.value), Some(50));
        assert_eq!(tt.probe(&key, 2).map(|e| e.value), Some(50));
        assert!(tt.probe(&key, 3).is_none(), "shallow entry must not answer a deeper probe");
    }

    #[test]
    fn test_transposed_move_orders_share_entry() {
        let mut tt = TranspositionTable::new();
        let a = key_after(&[(0, 0, Player::Blue), (1, 1, Player::Red)]);
        let b = key_after(&[(1, 1, Player::Red), (0, 0, Player::Blue)]);
        assert_eq!(a, b);

        tt.store(a, 1, -7, Bound::UpperBound);
        let entry = tt.probe(&b, 1).unwrap();
        assert_eq!(entry.bound, Bound::UpperBound);
        assert_eq!(entry.value, -7);
    }

    #[test]
    fn test_shallow_store_keeps_deeper_entry() {
        let mut tt = TranspositionTable::new();
        let key = key_after(&[(2, 3, Player::Red)]);
        tt.store(key.clone(), 4, 10, Bound::LowerBound);
        tt.store(key.clone(), 1, 99, Bound::Exact);

        let entry = tt.probe(&key, 0).unwrap();
        assert_eq!(entry.depth, 4);
        assert_eq!(entry.value, 10);

        tt.store(key.clone(), 5, 11, Bound::Exact);
        assert_eq!(tt.probe(&key, 5).unwrap().value, 11);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new();
        tt.store(key_after(&[]), 1, 0, Bound::Exact);
        assert!(!tt.is_empty());
        tt.clear();
        assert!(tt.is_empty());
    }
}
