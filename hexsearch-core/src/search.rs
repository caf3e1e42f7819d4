//! Alpha-beta minimax with a transposition table
//!
//! Values are always from the root player's point of view: the maximizing
//! plies belong to the root player, the minimizing plies to the opponent.
//! The board is mutated in place and every mutation is undone before the
//! call that made it returns.

use serde::Serialize;

use crate::board::{Board, Player};
use crate::config::{SearchConfig, MAX_SEARCH_DEPTH};
use crate::connectivity::{self, ConnectionCache};
use crate::eval::{evaluate, Weights, WIN_SCORE};
use crate::ordering::{ordered_moves, ScoredMove};
use crate::tt::{Bound, TranspositionTable};

/// Window bound wider than any reachable value
pub const INFINITY: i32 = 2 * WIN_SCORE;

/// Value of a connection completed with `depth` plies of budget left
///
/// Wins found with more budget remaining (i.e. sooner) score higher.
pub fn win_value(depth: i32) -> i32 {
    WIN_SCORE + depth.max(0)
}

/// Whether a search value proves a forced win for the root player
pub fn is_forced_win(value: i32) -> bool {
    value >= WIN_SCORE
}

/// Whether a search value proves a forced loss for the root player
pub fn is_forced_loss(value: i32) -> bool {
    value <= -WIN_SCORE
}

/// Counters for one top-level search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Calls to `alpha_beta`
    pub nodes: u64,
    /// Heuristic leaf evaluations
    pub leaf_evals: u64,
    pub tt_probes: u64,
    /// Probes that found an entry deep enough to use
    pub tt_hits: u64,
    /// Move loops stopped early by the window closing
    pub cutoffs: u64,
    /// Branches cut short by an immediate connection
    pub win_shortcuts: u64,
}

impl SearchStats {
    /// Usable TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search state: caches and counters owned by one engine
#[derive(Debug)]
pub struct Searcher {
    tt: TranspositionTable,
    connections: ConnectionCache,
    weights: Weights,
    use_transposition: bool,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(weights: Weights, use_transposition: bool) -> Self {
        Self {
            tt: TranspositionTable::new(),
            connections: ConnectionCache::new(),
            weights,
            use_transposition,
            stats: SearchStats::default(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.weights.clone(), config.use_transposition)
    }

    /// Drop cached results and counters before an unrelated search
    pub fn reset(&mut self) {
        self.tt.clear();
        self.connections.invalidate();
        self.stats = SearchStats::default();
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn transposition_len(&self) -> usize {
        self.tt.len()
    }

    /// Candidate moves for `player`, best first
    pub fn ordered_moves(&mut self, board: &Board, player: Player) -> Vec<ScoredMove> {
        ordered_moves(board, &mut self.connections, player, &self.weights)
    }

    /// Minimax value of `board` searched `depth` plies deep inside `(alpha, beta)`
    ///
    /// `maximizing` says whose turn it is: the root player's when true, the
    /// opponent's otherwise. The board is left exactly as it was passed in.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        root: Player,
    ) -> i32 {
        let depth = depth.min(MAX_SEARCH_DEPTH as i32);
        self.stats.nodes += 1;

        // A finished game has the same value whatever the window
        if connectivity::has_won(board, root) {
            return win_value(depth);
        }
        if connectivity::has_won(board, root.opponent()) {
            return -win_value(depth);
        }

        let key = self.use_transposition.then(|| board.key());
        if let Some(key) = &key {
            self.stats.tt_probes += 1;
            if let Some(entry) = self.tt.probe(key, depth) {
                self.stats.tt_hits += 1;
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::LowerBound => alpha = alpha.max(entry.value),
                    Bound::UpperBound => beta = beta.min(entry.value),
                }
                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        if depth <= 0 {
            self.stats.leaf_evals += 1;
            return evaluate(board, root, &self.weights);
        }

        let mover = if maximizing { root } else { root.opponent() };
        let moves = self.ordered_moves(board, mover);
        if moves.is_empty() {
            self.stats.leaf_evals += 1;
            return evaluate(board, root, &self.weights);
        }

        // Window this node actually searches with, for bound classification
        let (window_alpha, window_beta) = (alpha, beta);
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            // Ordering already proved the connection; nothing to make or undo
            if mv.is_win() {
                self.stats.win_shortcuts += 1;
                let value = win_value(depth - 1);
                return if maximizing { value } else { -value };
            }

            board.make_move(mv.pos, mover);
            let value = self.alpha_beta(board, depth - 1, alpha, beta, !maximizing, root);
            board.undo_move(mv.pos);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if let Some(key) = key {
            let bound = if best <= window_alpha {
                Bound::UpperBound
            } else if best >= window_beta {
                Bound::LowerBound
            } else {
                Bound::Exact
            };
            self.tt.store(key, depth, best, bound);
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Plain minimax over the same move generator and evaluation
    fn minimax(
        board: &mut Board,
        cache: &mut ConnectionCache,
        weights: &Weights,
        depth: i32,
        maximizing: bool,
        root: Player,
    ) -> i32 {
        if connectivity::has_won(board, root) {
            return win_value(depth);
        }
        if connectivity::has_won(board, root.opponent()) {
            return -win_value(depth);
        }
        if depth <= 0 {
            return evaluate(board, root, weights);
        }
        let mover = if maximizing { root } else { root.opponent() };
        let moves = ordered_moves(board, cache, mover, weights);
        if moves.is_empty() {
            return evaluate(board, root, weights);
        }

        let mut values = Vec::new();
        for mv in moves {
            board.make_move(mv.pos, mover);
            values.push(minimax(board, cache, weights, depth - 1, !maximizing, root));
            board.undo_move(mv.pos);
        }
        if maximizing {
            values.into_iter().max().unwrap()
        } else {
            values.into_iter().min().unwrap()
        }
    }

    fn random_board(rng: &mut ChaCha8Rng, size: usize, stones: usize) -> Board {
        let mut board = Board::new(size).unwrap();
        let mut player = Player::Blue;
        let mut placed = 0;
        while placed < stones {
            let pos = Pos::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if board.make_move(pos, player) {
                if board.is_terminal() {
                    board.undo_move(pos);
                    continue;
                }
                player = player.opponent();
                placed += 1;
            }
        }
        board
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let weights = Weights::default();
        for trial in 0..16 {
            let size = if trial % 2 == 0 { 4 } else { 5 };
            let stones = rng.gen_range(2..7);
            let mut board = random_board(&mut rng, size, stones);
            let depth = 1 + (trial / 2) % 3;

            for root in [Player::Blue, Player::Red] {
                let mut cache = ConnectionCache::new();
                let expected = minimax(&mut board, &mut cache, &weights, depth, true, root);

                // A fresh table per search; positions only recur at the same depth
                for use_tt in [false, true] {
                    let mut searcher = Searcher::new(weights.clone(), use_tt);
                    let value = searcher.alpha_beta(&mut board, depth, -INFINITY, INFINITY, true, root);
                    assert_eq!(
                        value, expected,
                        "trial {} size {} depth {} root {:?} tt {}",
                        trial, size, depth, root, use_tt
                    );
                }
            }
        }
    }

    #[test]
    fn test_search_restores_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut board = random_board(&mut rng, 5, 6);
        let before = board.grid();
        let key = board.key();

        let mut searcher = Searcher::new(Weights::default(), true);
        searcher.alpha_beta(&mut board, 3, -INFINITY, INFINITY, true, Player::Red);

        assert_eq!(board.grid(), before);
        assert_eq!(board.key(), key);
    }

    #[test]
    fn test_won_board_short_circuits() {
        let grid = vec![vec![1, 0, 0], vec![1, 0, 0], vec![1, 0, 0]];
        let mut board = Board::from_grid(&grid).unwrap();
        let mut searcher = Searcher::new(Weights::default(), true);

        let value = searcher.alpha_beta(&mut board, 2, -INFINITY, INFINITY, false, Player::Blue);
        assert_eq!(value, win_value(2));
        assert_eq!(searcher.stats().tt_probes, 0);

        let value = searcher.alpha_beta(&mut board, 2, -INFINITY, INFINITY, true, Player::Red);
        assert!(is_forced_loss(value));
    }

    #[test]
    fn test_finds_forced_win_in_two() {
        // A Blue stone at (2,1) extends the (0,1)-(1,1) chain and leaves two
        // winning cells, (3,0) and (3,1). Red cannot cover both.
        let grid = vec![
            vec![0, 1, 0, 0],
            vec![0, 1, 2, 2],
            vec![0, 0, 0, 2],
            vec![0, 0, 0, 0],
        ];
        let mut board = Board::from_grid(&grid).unwrap();
        let mut searcher = Searcher::new(Weights::default(), true);
        board.make_move(Pos::new(2, 1), Player::Blue);
        let value = searcher.alpha_beta(&mut board, 2, -INFINITY, INFINITY, false, Player::Blue);
        board.undo_move(Pos::new(2, 1));
        assert!(is_forced_win(value), "value {}", value);
    }

    #[test]
    fn test_transposition_records_entries() {
        let mut board = Board::new(4).unwrap();
        board.make_move(Pos::new(1, 1), Player::Blue);
        let mut searcher = Searcher::new(Weights::default(), true);
        searcher.alpha_beta(&mut board, 2, -INFINITY, INFINITY, false, Player::Blue);
        assert!(searcher.transposition_len() > 0);
        assert!(searcher.stats().tt_probes > 0);

        searcher.reset();
        assert_eq!(searcher.transposition_len(), 0);
        assert_eq!(searcher.stats(), &SearchStats::default());

        let mut plain = Searcher::new(Weights::default(), false);
        plain.alpha_beta(&mut board, 2, -INFINITY, INFINITY, false, Player::Blue);
        assert_eq!(plain.transposition_len(), 0);
    }

    #[test]
    fn test_pruning_reduces_nodes() {
        let mut board = Board::new(4).unwrap();
        board.make_move(Pos::new(0, 0), Player::Blue);
        board.make_move(Pos::new(3, 3), Player::Red);

        let mut searcher = Searcher::new(Weights::default(), false);
        searcher.alpha_beta(&mut board, 3, -INFINITY, INFINITY, true, Player::Blue);
        // 14 * 13 * 12 leaves plus interior nodes without pruning
        assert!(searcher.stats().nodes < 1 + 14 + 14 * 13 + 14 * 13 * 12);
        assert!(searcher.stats().cutoffs > 0);
    }
}
