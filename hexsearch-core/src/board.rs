//! Hex board: cell occupancy on an N×N rhombus with make/undo

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connectivity;

/// Largest supported board (one column letter per column)
pub const MAX_BOARD_SIZE: usize = 26;

/// Neighbor offsets in (row, col)
/// Index: 0=up, 1=up-right, 2=left, 3=right, 4=down-left, 5=down
pub const DIRECTIONS: [(i32, i32); 6] = [
    (-1, 0),  // up
    (-1, 1),  // up-right
    (0, -1),  // left
    (0, 1),   // right
    (1, -1),  // down-left
    (1, 0),   // down
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
///
/// Blue connects the top and bottom edges, Red connects left and right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Blue = 1,
    Red = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// The two board edges this player must join
    pub fn target_edges(self) -> (Edge, Edge) {
        match self {
            Player::Blue => (Edge::Top, Edge::Bottom),
            Player::Red => (Edge::Left, Edge::Right),
        }
    }
}

/// Board edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Whether a cell lies on this edge of a board of `size`
    pub fn contains(self, pos: Pos, size: usize) -> bool {
        match self {
            Edge::Top => pos.row == 0,
            Edge::Bottom => pos.row + 1 == size,
            Edge::Left => pos.col == 0,
            Edge::Right => pos.col + 1 == size,
        }
    }

    /// All cells on this edge, in row-major order
    pub fn cells(self, size: usize) -> Vec<Pos> {
        match self {
            Edge::Top => (0..size).map(|c| Pos::new(0, c)).collect(),
            Edge::Bottom => (0..size).map(|c| Pos::new(size - 1, c)).collect(),
            Edge::Left => (0..size).map(|r| Pos::new(r, 0)).collect(),
            Edge::Right => (0..size).map(|r| Pos::new(r, size - 1)).collect(),
        }
    }
}

/// Cell occupancy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty = 0,
    Blue = 1,
    Red = 2,
}

impl Cell {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Blue),
            2 => Some(Cell::Red),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Blue => Cell::Blue,
            Player::Red => Cell::Red,
        }
    }
}

/// Board coordinate (row, col)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor in direction (0-5), if it stays on a board of `size`
    pub fn neighbor(&self, direction: usize, size: usize) -> Option<Pos> {
        let (dr, dc) = DIRECTIONS[direction % 6];
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if r < 0 || c < 0 || r >= size as i32 || c >= size as i32 {
            None
        } else {
            Some(Pos::new(r as usize, c as usize))
        }
    }

    /// Manhattan distance in (row, col) space
    pub fn manhattan(&self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether two cells share an edge on the hex grid
    pub fn is_adjacent(&self, other: Pos) -> bool {
        let dr = other.row as i32 - self.row as i32;
        let dc = other.col as i32 - self.col as i32;
        DIRECTIONS.contains(&(dr, dc))
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Pos::new(row, col)
    }
}

/// Errors from bulk board construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {0} is outside 1..={max}", max = MAX_BOARD_SIZE)]
    InvalidSize(usize),

    #[error("grid is {rows}x{cols}, expected {expected}x{expected}")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid cell value {value} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, value: u8 },
}

/// Generations come from one process-wide counter, so independently built
/// boards never share one (a clone shares it only until either side mutates).
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

// ============================================================================
// BOARD KEY
// ============================================================================

/// Canonical packed snapshot of a board (2 bits per cell)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardKey(Box<[u64]>);

// ============================================================================
// BOARD
// ============================================================================

/// N×N Hex board, mutated in place during search
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    /// Renewed on every mutation; caches compare against it
    generation: u64,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty board
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
            generation: next_generation(),
        })
    }

    /// Create a board from a square integer matrix (0=empty, 1=blue, 2=red)
    pub fn from_grid(grid: &[Vec<u8>]) -> Result<Self, BoardError> {
        let mut board = Board::new(grid.len())?;
        board.set_grid(grid)?;
        Ok(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Cell at `pos`; out-of-bounds positions read as `None`
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    pub(crate) fn cell(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.size / 2, self.size / 2)
    }

    /// In-bounds neighbors of `pos`
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        (0..6).filter_map(move |d| pos.neighbor(d, self.size))
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size * size).map(move |i| Pos::new(i / size, i % size))
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn is_empty_board(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    // ========================================================================
    // MAKE / UNDO
    // ========================================================================

    /// Place a stone. Returns false when `pos` is off the board or occupied.
    pub fn make_move(&mut self, pos: Pos, player: Player) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = self.index(pos);
        if !self.cells[idx].is_empty() {
            return false;
        }
        self.cells[idx] = player.into();
        self.generation = next_generation();
        true
    }

    /// Clear a cell. Out-of-bounds positions are ignored.
    pub fn undo_move(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = Cell::Empty;
        self.generation = next_generation();
    }

    /// Recolor an occupied cell (pie-rule swap)
    pub(crate) fn recolor(&mut self, pos: Pos, player: Player) {
        let idx = self.index(pos);
        self.cells[idx] = player.into();
        self.generation = next_generation();
    }

    /// Unoccupied cells, row-major
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.positions().filter(|&p| self.cell(p).is_empty()).collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|c| c.is_empty())
    }

    // ========================================================================
    // GAME STATUS
    // ========================================================================

    /// Whether `player` has joined their two edges
    pub fn check_win(&self, player: Player) -> bool {
        connectivity::has_won(self, player)
    }

    /// The player who has connected, if any
    pub fn winner(&self) -> Option<Player> {
        [Player::Blue, Player::Red]
            .into_iter()
            .find(|&p| self.check_win(p))
    }

    /// Either player has won or the board is full
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.has_empty_cell()
    }

    // ========================================================================
    // BULK ACCESS
    // ========================================================================

    /// Replace every cell from an integer matrix
    pub fn set_grid(&mut self, grid: &[Vec<u8>]) -> Result<(), BoardError> {
        if grid.len() != self.size {
            return Err(BoardError::DimensionMismatch {
                expected: self.size,
                rows: grid.len(),
                cols: grid.first().map_or(0, Vec::len),
            });
        }
        if let Some(row) = grid.iter().find(|row| row.len() != self.size) {
            return Err(BoardError::DimensionMismatch {
                expected: self.size,
                rows: grid.len(),
                cols: row.len(),
            });
        }

        let mut cells = Vec::with_capacity(self.size * self.size);
        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let cell = Cell::from_u8(value)
                    .ok_or(BoardError::InvalidCell { row: r, col: c, value })?;
                cells.push(cell);
            }
        }

        self.cells = cells;
        self.generation = next_generation();
        Ok(())
    }

    /// Current cells as an integer matrix
    pub fn grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }

    /// Packed snapshot used as a transposition key
    pub fn key(&self) -> BoardKey {
        let mut words = vec![0u64; (self.cells.len() + 31) / 32];
        for (i, &cell) in self.cells.iter().enumerate() {
            words[i / 32] |= (cell as u64) << ((i % 32) * 2);
        }
        BoardKey(words.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_and_undo() {
        let mut board = Board::new(5).unwrap();
        assert!(board.make_move(Pos::new(2, 3), Player::Blue));
        assert_eq!(board.get(Pos::new(2, 3)), Some(Cell::Blue));

        // Occupied and off-board moves fail softly
        assert!(!board.make_move(Pos::new(2, 3), Player::Red));
        assert!(!board.make_move(Pos::new(5, 0), Player::Red));

        board.undo_move(Pos::new(2, 3));
        assert_eq!(board.get(Pos::new(2, 3)), Some(Cell::Empty));

        // Off-board undo is a no-op
        let before = board.generation();
        board.undo_move(Pos::new(9, 9));
        assert_eq!(board.generation(), before);
    }

    #[test]
    fn test_make_undo_restores_snapshot() {
        let mut board = Board::new(4).unwrap();
        board.make_move(Pos::new(0, 0), Player::Red);
        let key = board.key();
        let grid = board.grid();

        board.make_move(Pos::new(1, 2), Player::Blue);
        assert_ne!(board.key(), key);
        board.undo_move(Pos::new(1, 2));

        assert_eq!(board.key(), key);
        assert_eq!(board.grid(), grid);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new(3).unwrap();
        board.make_move(Pos::new(0, 1), Player::Blue);
        board.make_move(Pos::new(2, 0), Player::Red);
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 7);
        assert_eq!(empty[0], Pos::new(0, 0));
        assert_eq!(empty[1], Pos::new(0, 2));
        assert!(empty.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_set_grid_rejects_mismatch() {
        let mut board = Board::new(3).unwrap();
        let err = board.set_grid(&[vec![0, 0, 0], vec![0, 0, 0]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::DimensionMismatch { expected: 3, rows: 2, cols: 3 }
        );

        let err = board
            .set_grid(&[vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]])
            .unwrap_err();
        assert!(matches!(err, BoardError::DimensionMismatch { cols: 2, .. }));

        let err = board
            .set_grid(&[vec![0, 0, 0], vec![0, 3, 0], vec![0, 0, 0]])
            .unwrap_err();
        assert_eq!(err, BoardError::InvalidCell { row: 1, col: 1, value: 3 });
    }

    #[test]
    fn test_grid_round_trip_bumps_generation() {
        let grid = vec![vec![1, 0, 2], vec![0, 1, 0], vec![2, 0, 0]];
        let mut board = Board::new(3).unwrap();
        let before = board.generation();
        board.set_grid(&grid).unwrap();
        assert_ne!(board.generation(), before);
        assert_eq!(board.grid(), grid);
        assert_eq!(board.stone_count(), 4);
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(Board::new(0).unwrap_err(), BoardError::InvalidSize(0));
        assert!(Board::new(MAX_BOARD_SIZE + 1).is_err());
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
    }

    #[test]
    fn test_neighbors() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.neighbors(Pos::new(0, 0)).count(), 2);
        assert_eq!(board.neighbors(Pos::new(4, 4)).count(), 2);
        assert_eq!(board.neighbors(Pos::new(0, 4)).count(), 3);
        assert_eq!(board.neighbors(Pos::new(2, 2)).count(), 6);
        assert!(Pos::new(2, 2).is_adjacent(Pos::new(1, 3)));
        assert!(!Pos::new(2, 2).is_adjacent(Pos::new(1, 1)));
    }

    #[test]
    fn test_terminal_on_full_board() {
        let mut board = Board::new(2).unwrap();
        assert!(!board.is_terminal());
        board.set_grid(&[vec![1, 2], vec![2, 1]]).unwrap();
        assert!(board.is_terminal());
    }
}
