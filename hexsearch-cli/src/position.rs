//! JSON position files: `{"size": N, "grid": [[..]], "to_move": "blue"}`

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use hexsearch_core::{Board, Player};

fn default_to_move() -> Player {
    Player::Blue
}

/// A board plus the side to move, as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub size: usize,
    /// Row-major cells: 0 empty, 1 blue, 2 red
    pub grid: Vec<Vec<u8>>,
    #[serde(default = "default_to_move")]
    pub to_move: Player,
}

impl Position {
    pub fn from_board(board: &Board, to_move: Player) -> Self {
        Self {
            size: board.size(),
            grid: board.grid(),
            to_move,
        }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read position: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid position file: {}", path.display()))
    }

    pub fn parse(json: &str) -> Result<Self> {
        let position: Position = serde_json::from_str(json)?;
        Ok(position)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write position: {}", path.display()))?;
        Ok(())
    }

    /// Build the board, checking the declared size against the grid
    pub fn to_board(&self) -> Result<Board> {
        if self.grid.len() != self.size {
            bail!("declared size {} but grid has {} rows", self.size, self.grid.len());
        }
        let mut board = Board::new(self.size)?;
        board.set_grid(&self.grid)?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexsearch_core::Pos;

    #[test]
    fn test_parse_position() {
        let position = Position::parse(r#"{"size": 3, "grid": [[0,0,0],[0,1,0],[2,0,0]], "to_move": "red"}"#).unwrap();
        assert_eq!(position.to_move, Player::Red);

        let board = position.to_board().unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.get(Pos::new(1, 1)), Some(Player::Blue.into()));
        assert_eq!(board.get(Pos::new(2, 0)), Some(Player::Red.into()));
    }

    #[test]
    fn test_to_move_defaults_to_blue() {
        let position = Position::parse(r#"{"size": 2, "grid": [[0,0],[0,0]]}"#).unwrap();
        assert_eq!(position.to_move, Player::Blue);
    }

    #[test]
    fn test_rejects_bad_grids() {
        let short = Position::parse(r#"{"size": 3, "grid": [[0,0,0],[0,0,0]]}"#).unwrap();
        assert!(short.to_board().is_err());

        let ragged = Position::parse(r#"{"size": 2, "grid": [[0,0],[0]]}"#).unwrap();
        assert!(ragged.to_board().is_err());

        let bad_cell = Position::parse(r#"{"size": 2, "grid": [[0,3],[0,0]]}"#).unwrap();
        assert!(bad_cell.to_board().is_err());

        assert!(Position::parse(r#"{"size": 2, "grid": [[0,0],[0,0]], "to_move": "green"}"#).is_err());
    }

    #[test]
    fn test_from_board_round_trip() {
        let mut board = Board::new(4).unwrap();
        board.make_move(Pos::new(0, 3), Player::Red);
        let position = Position::from_board(&board, Player::Blue);
        assert_eq!(position.to_board().unwrap(), board);
    }
}
