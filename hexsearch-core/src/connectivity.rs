//! Connectivity oracle: win detection and reachability queries
//!
//! Win detection rebuilds a union-find over the whole board on every call, so
//! it is always correct for the board as it stands after any make/undo
//! sequence. Reachability through empty cells ("virtual" connections) is
//! memoized in a [`ConnectionCache`] that drops everything as soon as the
//! board generation changes.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::board::{Board, Cell, Edge, Player, Pos};
use crate::union_find::UnionFind;

// ============================================================================
// WIN DETECTION
// ============================================================================

/// Whether `player` has a chain joining their two target edges
pub fn has_won(board: &Board, player: Player) -> bool {
    joins_edges(board, player, None)
}

/// Whether `player` would have won with an extra stone at `pos`
///
/// The board is not touched, so connection caches stay valid.
pub fn wins_with_stone(board: &Board, pos: Pos, player: Player) -> bool {
    board.get(pos) == Some(Cell::Empty) && joins_edges(board, player, Some(pos))
}

fn joins_edges(board: &Board, player: Player, extra: Option<Pos>) -> bool {
    let size = board.size();
    let color = Cell::from(player);
    let (first, second) = player.target_edges();
    let is_own = |p: Pos| board.cell(p) == color || Some(p) == extra;

    let mut uf = UnionFind::new(size);
    let first_node = uf.edge_node(first);
    let second_node = uf.edge_node(second);

    for pos in board.positions() {
        if !is_own(pos) {
            continue;
        }
        let idx = board.index(pos);
        for nb in board.neighbors(pos) {
            if is_own(nb) {
                uf.union(idx, board.index(nb));
            }
        }
        if first.contains(pos, size) {
            uf.union(idx, first_node);
        }
        if second.contains(pos, size) {
            uf.union(idx, second_node);
        }
    }

    uf.connected(first_node, second_node)
}

// ============================================================================
// GROUPS AND DISTANCES
// ============================================================================

/// Sizes of every same-color group of `player`
pub fn group_sizes(board: &Board, player: Player) -> Vec<usize> {
    let color = Cell::from(player);
    let mut visited = vec![false; board.size() * board.size()];
    let mut sizes = Vec::new();
    let mut stack = Vec::new();

    for start in board.positions() {
        if board.cell(start) != color || visited[board.index(start)] {
            continue;
        }
        visited[board.index(start)] = true;
        stack.push(start);
        let mut count = 0;
        while let Some(pos) = stack.pop() {
            count += 1;
            for nb in board.neighbors(pos) {
                let idx = board.index(nb);
                if !visited[idx] && board.cell(nb) == color {
                    visited[idx] = true;
                    stack.push(nb);
                }
            }
        }
        sizes.push(count);
    }

    sizes
}

/// Fewest non-own cells on any path between `player`'s target edges
///
/// 0-1 breadth-first search: own stones cost 0, every other cell costs 1.
/// A won board yields 0; an empty board yields its size.
pub fn shortest_path(board: &Board, player: Player) -> usize {
    let size = board.size();
    let color = Cell::from(player);
    let (source, target) = player.target_edges();
    let cost = |p: Pos| usize::from(board.cell(p) != color);

    let mut dist = vec![usize::MAX; size * size];
    let mut queue = VecDeque::new();

    for pos in source.cells(size) {
        let d = cost(pos);
        let idx = board.index(pos);
        if d < dist[idx] {
            dist[idx] = d;
            if d == 0 {
                queue.push_front(pos);
            } else {
                queue.push_back(pos);
            }
        }
    }

    while let Some(pos) = queue.pop_front() {
        let d = dist[board.index(pos)];
        for nb in board.neighbors(pos) {
            let step = cost(nb);
            let idx = board.index(nb);
            if d + step < dist[idx] {
                dist[idx] = d + step;
                if step == 0 {
                    queue.push_front(nb);
                } else {
                    queue.push_back(nb);
                }
            }
        }
    }

    target
        .cells(size)
        .into_iter()
        .map(|p| dist[board.index(p)])
        .min()
        .unwrap_or(size)
}

// ============================================================================
// VIRTUAL CONNECTION CACHE
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PathKey {
    from: Pos,
    to: Pos,
    player: Player,
    avoid: Option<Pos>,
}

/// Memo of reachability through own-or-empty cells
///
/// Entries are only valid for the board generation they were computed on;
/// every query first drops the whole cache if the board has changed since.
#[derive(Debug, Default)]
pub struct ConnectionCache {
    generation: Option<u64>,
    paths: FxHashMap<PathKey, bool>,
    edges: FxHashMap<(Player, Edge), Vec<bool>>,
    hits: u64,
    misses: u64,
}

impl ConnectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (use when switching to a different board)
    pub fn invalidate(&mut self) {
        self.generation = None;
        self.paths.clear();
        self.edges.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since construction
    pub fn hit_counts(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn sync(&mut self, board: &Board) {
        if self.generation != Some(board.generation()) {
            self.paths.clear();
            self.edges.clear();
            self.generation = Some(board.generation());
        }
    }

    /// Whether `player` could still link `from` and `to` through own or empty cells
    pub fn has_virtual_connection(
        &mut self,
        board: &Board,
        from: Pos,
        to: Pos,
        player: Player,
    ) -> bool {
        self.connected_avoiding(board, from, to, player, None)
    }

    /// Same as [`has_virtual_connection`](Self::has_virtual_connection) with
    /// `avoid` treated as blocked
    pub fn connected_avoiding(
        &mut self,
        board: &Board,
        from: Pos,
        to: Pos,
        player: Player,
        avoid: Option<Pos>,
    ) -> bool {
        self.sync(board);
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let key = PathKey { from, to, player, avoid };

        if let Some(&known) = self.paths.get(&key) {
            self.hits += 1;
            return known;
        }
        self.misses += 1;

        let result = reachable(board, from, to, player, avoid);
        self.paths.insert(key, result);
        result
    }

    /// Whether `pos` can reach `edge` through `player`'s own or empty cells
    pub fn reaches_edge(&mut self, board: &Board, pos: Pos, player: Player, edge: Edge) -> bool {
        self.sync(board);
        if !board.in_bounds(pos) {
            return false;
        }
        let idx = board.index(pos);
        if let Some(map) = self.edges.get(&(player, edge)) {
            self.hits += 1;
            return map[idx];
        }
        self.misses += 1;

        let map = flood_from_edge(board, player, edge);
        let result = map[idx];
        self.edges.insert((player, edge), map);
        result
    }
}

fn passable(board: &Board, pos: Pos, player: Player, avoid: Option<Pos>) -> bool {
    let cell = board.cell(pos);
    Some(pos) != avoid && (cell == Cell::Empty || cell == Cell::from(player))
}

fn reachable(board: &Board, from: Pos, to: Pos, player: Player, avoid: Option<Pos>) -> bool {
    if !board.in_bounds(from) || !board.in_bounds(to) {
        return false;
    }
    if !passable(board, from, player, avoid) || !passable(board, to, player, avoid) {
        return false;
    }

    let mut visited = vec![false; board.size() * board.size()];
    let mut stack = vec![from];
    visited[board.index(from)] = true;

    while let Some(pos) = stack.pop() {
        if pos == to {
            return true;
        }
        for nb in board.neighbors(pos) {
            let idx = board.index(nb);
            if !visited[idx] && passable(board, nb, player, avoid) {
                visited[idx] = true;
                stack.push(nb);
            }
        }
    }

    false
}

fn flood_from_edge(board: &Board, player: Player, edge: Edge) -> Vec<bool> {
    let mut seen = vec![false; board.size() * board.size()];
    let mut stack: Vec<Pos> = edge
        .cells(board.size())
        .into_iter()
        .filter(|&p| passable(board, p, player, None))
        .collect();
    for &p in &stack {
        seen[board.index(p)] = true;
    }

    while let Some(pos) = stack.pop() {
        for nb in board.neighbors(pos) {
            let idx = board.index(nb);
            if !seen[idx] && passable(board, nb, player, None) {
                seen[idx] = true;
                stack.push(nb);
            }
        }
    }

    seen
}
