//! Best-move driver: tactical fast paths, then iterative deepening

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::board::{Board, Player, Pos};
use crate::config::SearchConfig;
use crate::eval::{MOVE_BLOCK_SCORE, MOVE_WIN_SCORE};
use crate::search::{is_forced_win, SearchStats, Searcher, INFINITY};

// ============================================================================
// REPORT
// ============================================================================

/// Which stage of the driver produced the move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSource {
    Opening,
    ImmediateWin,
    Block,
    Search,
    Fallback,
    NoMoves,
}

/// Outcome of one best-move computation
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    pub best_move: Option<Pos>,
    /// Root player's value for `best_move`
    pub value: i32,
    /// Deepest iterative-deepening pass that finished (0 for fast paths)
    pub depth: u32,
    pub forced_win: bool,
    pub source: MoveSource,
    pub stats: SearchStats,
}

impl SearchReport {
    fn fast(best_move: Option<Pos>, value: i32, source: MoveSource) -> Self {
        Self {
            best_move,
            value,
            depth: 0,
            forced_win: source == MoveSource::ImmediateWin,
            source,
            stats: SearchStats::default(),
        }
    }
}

// ============================================================================
// HEX AI
// ============================================================================

/// Alpha-beta Hex player
pub struct HexAI {
    config: SearchConfig,
    searcher: Searcher,
    rng: ChaCha8Rng,
}

impl HexAI {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::from_config(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Engine with default settings searching to `max_depth`
    pub fn with_depth(max_depth: u32) -> Self {
        Self::new(SearchConfig::with_depth(max_depth))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for `player`, or `None` when the board is full
    pub fn best_move(&mut self, board: &mut Board, player: Player) -> Option<Pos> {
        self.analyze(board, player).best_move
    }

    /// Best move for `player` with the value and counters behind it
    ///
    /// The board is mutated during the search and restored before returning.
    pub fn analyze(&mut self, board: &mut Board, player: Player) -> SearchReport {
        self.searcher.reset();

        if !board.has_empty_cell() {
            return SearchReport::fast(None, 0, MoveSource::NoMoves);
        }

        if board.is_empty_board() {
            let center = board.center();
            tracing::trace!("Opening at center {:?}", center);
            return SearchReport::fast(Some(center), 0, MoveSource::Opening);
        }

        let moves = self.searcher.ordered_moves(board, player);
        if let Some(win) = moves.iter().find(|m| m.is_win()) {
            tracing::trace!("Immediate win at {:?}", win.pos);
            return SearchReport::fast(Some(win.pos), MOVE_WIN_SCORE, MoveSource::ImmediateWin);
        }

        let threats = self.searcher.ordered_moves(board, player.opponent());
        if let Some(threat) = threats.iter().find(|m| m.is_win()) {
            tracing::trace!("Blocking opponent win at {:?}", threat.pos);
            return SearchReport::fast(Some(threat.pos), MOVE_BLOCK_SCORE, MoveSource::Block);
        }

        let max_depth = self.config.effective_depth(board.size()).max(1);
        let mut best: Option<(Pos, i32)> = None;
        let mut completed = 0;

        for depth in 1..=max_depth {
            let mut alpha = -INFINITY;
            let mut depth_best: Option<(Pos, i32)> = None;

            for mv in &moves {
                board.make_move(mv.pos, player);
                let value = self
                    .searcher
                    .alpha_beta(board, depth as i32 - 1, alpha, INFINITY, false, player);
                board.undo_move(mv.pos);

                if depth_best.map_or(true, |(_, v)| value > v) {
                    depth_best = Some((mv.pos, value));
                    alpha = alpha.max(value);
                }
            }

            // Only a finished pass replaces the previous answer
            if let Some((pos, value)) = depth_best {
                best = Some((pos, value));
                completed = depth;
                tracing::debug!(
                    "Depth {} complete: best {:?} value {} ({} nodes)",
                    depth,
                    pos,
                    value,
                    self.searcher.stats().nodes
                );
                if is_forced_win(value) {
                    break;
                }
            }
        }

        let stats = self.searcher.stats().clone();
        match best {
            Some((pos, value)) => SearchReport {
                best_move: Some(pos),
                value,
                depth: completed,
                forced_win: is_forced_win(value),
                source: MoveSource::Search,
                stats,
            },
            None => {
                let empties = board.empty_cells();
                let pos = empties[self.rng.gen_range(0..empties.len())];
                tracing::warn!("Search produced no move; playing random {:?}", pos);
                SearchReport {
                    best_move: Some(pos),
                    value: 0,
                    depth: 0,
                    forced_win: false,
                    source: MoveSource::Fallback,
                    stats,
                }
            }
        }
    }

    /// Pie rule: take over an opening stone near the center
    pub fn should_swap(first_move: Pos, size: usize) -> bool {
        let center = size / 2;
        first_move.row.abs_diff(center) <= 1 && first_move.col.abs_diff(center) <= 1
    }
}

/// One-shot best move with default settings
pub fn find_best_move(board: &mut Board, max_depth: u32, player: Player) -> Option<Pos> {
    HexAI::with_depth(max_depth).best_move(board, player)
}
