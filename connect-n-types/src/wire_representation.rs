//! The serializable form of a game: board dimensions plus the columns played so far
//!
//! ```
//! use types::{wire_representation::GameRecord, Board};
//!
//! let json = r#"{ "columns": 7, "rows": 6, "win_length": 4, "moves": [3, 3, 4] }"#;
//! let record: GameRecord = serde_json::from_str(json).unwrap();
//! let board = Board::try_from(record.clone()).unwrap();
//!
//! assert_eq!(board.to_record(), record);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, BoardConfig},
    error::BoardError,
};

/// A game as it is stored in fixtures and passed to the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Number of columns
    pub columns: usize,
    /// Number of rows
    pub rows: usize,
    /// How many pieces in a line win the game
    pub win_length: usize,
    /// Columns played, oldest first, starting with [crate::Player::First]
    #[serde(default)]
    pub moves: Vec<usize>,
}

impl GameRecord {
    /// The board dimensions described by this record
    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            columns: self.columns,
            rows: self.rows,
            win_length: self.win_length,
        }
    }
}

impl TryFrom<GameRecord> for Board {
    type Error = BoardError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        Board::from_moves(record.config(), &record.moves)
    }
}
