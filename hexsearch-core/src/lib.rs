//! HEXSEARCH Core - Hex board and alpha-beta search
//!
//! This crate provides the engine behind the `hexsearch` CLI:
//! - Board state with make/undo on an N×N rhombus
//! - Win detection over a union-find with virtual edge nodes
//! - Move heuristics, ordering and leaf evaluation
//! - Alpha-beta search with a transposition table
//! - Iterative-deepening best-move driver and game sessions

pub mod board;
pub mod union_find;
pub mod connectivity;
pub mod eval;
pub mod ordering;
pub mod tt;
pub mod search;
pub mod config;
pub mod ai;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, BoardError, BoardKey, Cell, Edge, Player, Pos, DIRECTIONS, MAX_BOARD_SIZE};
pub use connectivity::{has_won, shortest_path, wins_with_stone, ConnectionCache};
pub use eval::{evaluate, score_move, Weights, HEURISTIC_LIMIT, MOVE_BLOCK_SCORE, MOVE_WIN_SCORE, WIN_SCORE};
pub use ordering::{ordered_moves, ScoredMove};
pub use tt::{Bound, TranspositionTable, TtEntry};
pub use search::{is_forced_win, SearchStats, Searcher, INFINITY};
pub use config::{SearchConfig, MAX_SEARCH_DEPTH};
pub use ai::{find_best_move, HexAI, MoveSource, SearchReport};
pub use game::{Action, Game, GameError, MoveRecord};
