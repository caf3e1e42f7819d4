//! Game session: turn order, move history and the pie rule

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError, Player, Pos};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("({}, {}) is off the board", .0.row, .0.col)]
    OutOfBounds(Pos),

    #[error("({}, {}) is already occupied", .0.row, .0.col)]
    Occupied(Pos),

    #[error("swap is only allowed for Red as the second move")]
    SwapNotAllowed,

    #[error("cannot parse move '{0}'")]
    BadNotation(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// What a turn did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Place(Pos),
    /// Pie rule: the opening stone at this cell changed color
    Swap(Pos),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub action: Action,
}

/// A Hex game in progress
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<MoveRecord>,
    winner: Option<Player>,
}

impl Game {
    /// Empty board, Blue to move
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(size)?,
            to_move: Player::Blue,
            history: Vec::new(),
            winner: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Place a stone for the side to move; returns the winner if this move won
    pub fn play(&mut self, pos: Pos) -> Result<Option<Player>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.in_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        let player = self.to_move;
        if !self.board.make_move(pos, player) {
            return Err(GameError::Occupied(pos));
        }

        self.history.push(MoveRecord {
            player,
            action: Action::Place(pos),
        });
        self.finish_turn(player);
        Ok(self.winner)
    }

    /// Red takes over Blue's opening stone instead of placing one
    pub fn swap(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let opening = match self.history.as_slice() {
            [MoveRecord {
                player: Player::Blue,
                action: Action::Place(pos),
            }] => *pos,
            _ => return Err(GameError::SwapNotAllowed),
        };

        self.board.recolor(opening, Player::Red);
        self.history.push(MoveRecord {
            player: Player::Red,
            action: Action::Swap(opening),
        });
        self.finish_turn(Player::Red);
        Ok(())
    }

    fn finish_turn(&mut self, player: Player) {
        if self.board.check_win(player) {
            self.winner = Some(player);
        }
        self.to_move = player.opponent();
    }

    /// Column letter plus 1-based row, e.g. `c3` for (2, 2)
    pub fn notation(pos: Pos) -> String {
        let letter = (b'a' + pos.col as u8) as char;
        format!("{}{}", letter, pos.row + 1)
    }

    /// Inverse of [`Game::notation`], checked against a board of `size`
    pub fn parse_notation(text: &str, size: usize) -> Result<Pos, GameError> {
        let bad = || GameError::BadNotation(text.to_string());
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().filter(|c| c.is_ascii_alphabetic()).ok_or_else(bad)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let row: usize = digits.parse().map_err(|_| bad())?;
        if row == 0 {
            return Err(bad());
        }

        let pos = Pos::new(row - 1, (letter.to_ascii_lowercase() as u8 - b'a') as usize);
        if pos.row >= size || pos.col >= size {
            return Err(GameError::OutOfBounds(pos));
        }
        Ok(pos)
    }
}
