//! Move ordering: every empty cell, best-scored first

use crate::board::{Board, Player, Pos};
use crate::connectivity::ConnectionCache;
use crate::eval::{score_move, Weights, MOVE_BLOCK_SCORE, MOVE_WIN_SCORE};

/// A candidate move and its ordering score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: i32,
}

impl ScoredMove {
    pub fn is_win(&self) -> bool {
        self.score == MOVE_WIN_SCORE
    }

    pub fn is_block(&self) -> bool {
        self.score == MOVE_BLOCK_SCORE
    }
}

/// Empty cells scored for `player`, sorted by descending score
///
/// The sort is stable, so equal scores keep row-major order.
pub fn ordered_moves(
    board: &Board,
    cache: &mut ConnectionCache,
    player: Player,
    weights: &Weights,
) -> Vec<ScoredMove> {
    let mut moves: Vec<ScoredMove> = board
        .empty_cells()
        .into_iter()
        .map(|pos| ScoredMove {
            pos,
            score: score_move(board, cache, pos, player, weights),
        })
        .collect();

    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves
}
