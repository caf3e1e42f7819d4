//! Move scoring and leaf evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Player, Pos};
use crate::connectivity::{self, ConnectionCache};

/// Search value of a completed connection (effectively infinite)
pub const WIN_SCORE: i32 = 1_000_000;

/// Leaf heuristics are clamped to this magnitude so they never reach a win
pub const HEURISTIC_LIMIT: i32 = WIN_SCORE / 2;

/// Move-ordering score of a cell that wins on the spot
pub const MOVE_WIN_SCORE: i32 = 100_000;

/// Move-ordering score of a cell the opponent would win on
pub const MOVE_BLOCK_SCORE: i32 = 90_000;

/// Positional move scores stay strictly below tactical ones
const POSITIONAL_LIMIT: i32 = MOVE_BLOCK_SCORE - 1;

/// Heuristic weights for move ordering and evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Per step closer to the center
    pub center: i32,
    /// Per adjacent own stone (dominant positional term)
    pub adjacency: i32,
    /// Per own stone two-bridged with the candidate
    pub bridge: i32,
    /// Candidate lies on one of the player's target edges
    pub edge: i32,
    /// Candidate can still reach both target edges
    pub virtual_edge: i32,
    /// Subtracted when the move only duplicates an existing connection
    pub redundancy_penalty: i32,
    /// Leaf: sum of squared group sizes
    pub group: i32,
    /// Leaf: own stones on target edges
    pub edge_control: i32,
    /// Leaf: per stone of shortest-path advantage
    pub path: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            center: 4,
            adjacency: 30,
            bridge: 12,
            edge: 5,
            virtual_edge: 10,
            redundancy_penalty: 40,
            group: 2,
            edge_control: 4,
            path: 25,
        }
    }
}

// ============================================================================
// MOVE SCORING
// ============================================================================

/// Desirability of the empty cell `pos` as `player`'s next move
pub fn score_move(
    board: &Board,
    cache: &mut ConnectionCache,
    pos: Pos,
    player: Player,
    weights: &Weights,
) -> i32 {
    // Tactics first
    if connectivity::wins_with_stone(board, pos, player) {
        return MOVE_WIN_SCORE;
    }
    if connectivity::wins_with_stone(board, pos, player.opponent()) {
        return MOVE_BLOCK_SCORE;
    }

    let size = board.size();
    let color = Cell::from(player);
    let own_neighbors: Vec<Pos> = board
        .neighbors(pos)
        .filter(|&nb| board.cell(nb) == color)
        .collect();

    let mut score = 0;

    if is_redundant(board, cache, pos, player, &own_neighbors) {
        score -= weights.redundancy_penalty;
    }

    let center_dist = pos.manhattan(board.center()) as i32;
    score += (size as i32 - center_dist) * weights.center;

    score += own_neighbors.len() as i32 * weights.adjacency;
    score += bridge_partners(board, pos, player) as i32 * weights.bridge;

    let (first, second) = player.target_edges();
    if first.contains(pos, size) || second.contains(pos, size) {
        score += weights.edge;
    }

    if cache.reaches_edge(board, pos, player, first) && cache.reaches_edge(board, pos, player, second) {
        score += weights.virtual_edge;
    }

    score.clamp(-POSITIONAL_LIMIT, POSITIONAL_LIMIT)
}

/// Two own neighbors that are already linked without `pos`
fn is_redundant(
    board: &Board,
    cache: &mut ConnectionCache,
    pos: Pos,
    player: Player,
    own_neighbors: &[Pos],
) -> bool {
    for (i, &a) in own_neighbors.iter().enumerate() {
        for &b in &own_neighbors[i + 1..] {
            if cache.connected_avoiding(board, a, b, player, Some(pos)) {
                return true;
            }
        }
    }
    false
}

/// Own stones two steps away that share two empty common neighbors with `pos`
fn bridge_partners(board: &Board, pos: Pos, player: Player) -> usize {
    let color = Cell::from(player);
    let mut partners = Vec::new();

    for a in board.neighbors(pos) {
        for far in board.neighbors(a) {
            if far == pos || pos.is_adjacent(far) || board.cell(far) != color || partners.contains(&far) {
                continue;
            }
            let carriers = board
                .neighbors(pos)
                .filter(|&c| far.is_adjacent(c) && board.cell(c) == Cell::Empty)
                .count();
            if carriers >= 2 {
                partners.push(far);
            }
        }
    }

    partners.len()
}

// ============================================================================
// LEAF EVALUATION
// ============================================================================

/// Position value from `root`'s point of view
pub fn evaluate(board: &Board, root: Player, weights: &Weights) -> i32 {
    let opponent = root.opponent();
    if connectivity::has_won(board, root) {
        return WIN_SCORE;
    }
    if connectivity::has_won(board, opponent) {
        return -WIN_SCORE;
    }

    let groups = group_score(board, root) - group_score(board, opponent);
    let edges = edge_stones(board, root) - edge_stones(board, opponent);
    let paths = connectivity::shortest_path(board, opponent) as i64
        - connectivity::shortest_path(board, root) as i64;

    let score = groups * weights.group as i64
        + edges * weights.edge_control as i64
        + paths * weights.path as i64;

    score.clamp(-(HEURISTIC_LIMIT as i64), HEURISTIC_LIMIT as i64) as i32
}

/// Sum of squared group sizes: one large group beats several small ones
fn group_score(board: &Board, player: Player) -> i64 {
    connectivity::group_sizes(board, player)
        .into_iter()
        .map(|s| (s * s) as i64)
        .sum()
}

fn edge_stones(board: &Board, player: Player) -> i64 {
    let color = Cell::from(player);
    let (first, second) = player.target_edges();
    let size = board.size();
    board
        .positions()
        .filter(|&p| board.cell(p) == color && (first.contains(p, size) || second.contains(p, size)))
        .count() as i64
}
