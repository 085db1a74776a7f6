use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    error::BoardError,
    types::{
        GridQueryableGame, Player, PlayerToMoveGame, ReversibleGame, VictorDeterminableGame,
    },
    wire_representation::GameRecord,
};

/// Dimensions and win condition of a board
///
/// The default is the classic 7 column, 6 row, four-in-a-row game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns
    pub columns: usize,
    /// Number of rows
    pub rows: usize,
    /// How many pieces in a line win the game
    pub win_length: usize,
}

/// Grids are assumed to be small, this keeps the search tractable
pub const MAX_DIMENSION: usize = 64;

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 7,
            rows: 6,
            win_length: 4,
        }
    }
}

impl BoardConfig {
    /// Check that the config describes a playable board
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(BoardError::InvalidConfig(format!(
                "the board needs at least one row and one column, got {}x{}",
                self.columns, self.rows
            )));
        }

        if self.columns > MAX_DIMENSION || self.rows > MAX_DIMENSION {
            return Err(BoardError::InvalidConfig(format!(
                "boards are limited to {MAX_DIMENSION}x{MAX_DIMENSION}, got {}x{}",
                self.columns, self.rows
            )));
        }

        let max_win_length = self.columns.min(self.rows);
        if self.win_length < 2 || self.win_length > max_win_length {
            return Err(BoardError::InvalidConfig(format!(
                "win length must be between 2 and {max_win_length}, got {}",
                self.win_length
            )));
        }

        Ok(())
    }
}

/// The state of the game on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// There are still moves to make
    InProgress,
    /// The player completed a line
    Won(Player),
    /// The board filled up without a winner
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UndoRecord {
    column: usize,
    row: usize,
    /// This move completed the first winning line on the board
    decided_game: bool,
}

/// An owned connect-N board with make/unmake move support
///
/// This is the only mutation surface: moves are applied and reversed in place, the search never
/// clones the board per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    /// Row major, row `0` is the bottom of the board
    cells: Vec<Option<Player>>,
    heights: Vec<usize>,
    to_move: Player,
    winner: Option<Player>,
    history: Vec<UndoRecord>,
}

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Board {
    /// An empty board, [Player::First] to move
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;

        Ok(Self {
            config,
            cells: vec![None; config.columns * config.rows],
            heights: vec![0; config.columns],
            to_move: Player::First,
            winner: None,
            history: Vec::with_capacity(config.columns * config.rows),
        })
    }

    /// Build a board by playing the given columns in order, validating each move
    pub fn from_moves(config: BoardConfig, moves: &[usize]) -> Result<Self, BoardError> {
        let mut board = Self::new(config)?;
        for &column in moves {
            board.play(column)?;
        }

        Ok(board)
    }

    /// The dimensions of this board
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Play a move for the current player, rejecting illegal moves instead of panicking
    pub fn play(&mut self, column: usize) -> Result<(), BoardError> {
        if self.is_over() {
            return Err(BoardError::GameOver);
        }
        if column >= self.config.columns {
            return Err(BoardError::ColumnOutOfRange {
                column,
                columns: self.config.columns,
            });
        }
        if self.is_full(column) {
            return Err(BoardError::ColumnFull(column));
        }

        self.apply_move(column);
        Ok(())
    }

    /// The columns played so far, oldest first
    pub fn moves(&self) -> Vec<usize> {
        self.history.iter().map(|record| record.column).collect()
    }

    /// How many moves have been applied
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Columns that still have room, in ascending order
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.config.columns)
            .filter(|&column| !self.is_full(column))
            .collect()
    }

    /// Whether the game is still going, won or drawn
    pub fn outcome(&self) -> Outcome {
        match self.winner {
            Some(player) => Outcome::Won(player),
            None if self.history.len() == self.cells.len() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// The wire representation of this board
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            columns: self.config.columns,
            rows: self.config.rows,
            win_length: self.config.win_length,
            moves: self.moves(),
        }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.config.columns + column
    }

    fn offset(&self, row: usize, column: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(dr)?;
        let column = column.checked_add_signed(dc)?;

        (row < self.config.rows && column < self.config.columns).then_some((row, column))
    }

    fn run_length(&self, row: usize, column: usize, dr: isize, dc: isize) -> usize {
        let player = self.cells[self.index(row, column)];
        let mut length = 0;
        let (mut r, mut c) = (row, column);

        while let Some((next_r, next_c)) = self.offset(r, c, dr, dc) {
            if self.cells[self.index(next_r, next_c)] != player {
                break;
            }
            length += 1;
            r = next_r;
            c = next_c;
        }

        length
    }

    /// Whether the piece at the cell is part of a winning line
    fn completes_line(&self, row: usize, column: usize) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, column, dr, dc) + self.run_length(row, column, -dr, -dc)
                >= self.config.win_length
        })
    }
}

impl GridQueryableGame for Board {
    fn columns(&self) -> usize {
        self.config.columns
    }

    fn rows(&self) -> usize {
        self.config.rows
    }

    fn win_length(&self) -> usize {
        self.config.win_length
    }

    fn cell(&self, row: usize, column: usize) -> Option<Player> {
        self.cells[self.index(row, column)]
    }

    fn first_open_row(&self, column: usize) -> Option<usize> {
        let height = self.heights[column];
        (height < self.config.rows).then_some(height)
    }

    fn empty_cells(&self) -> usize {
        self.cells.len() - self.history.len()
    }
}

impl PlayerToMoveGame for Board {
    fn player_to_move(&self) -> Player {
        self.to_move
    }
}

impl ReversibleGame for Board {
    fn apply_move(&mut self, column: usize) {
        assert!(
            column < self.config.columns,
            "tried to play column {column} on a board with {} columns",
            self.config.columns
        );
        let row = self.heights[column];
        assert!(row < self.config.rows, "tried to play full column {column}");

        let index = self.index(row, column);
        self.cells[index] = Some(self.to_move);
        self.heights[column] += 1;

        let decided_game = self.winner.is_none() && self.completes_line(row, column);
        if decided_game {
            self.winner = Some(self.to_move);
        }

        self.history.push(UndoRecord {
            column,
            row,
            decided_game,
        });
        self.to_move = self.to_move.opponent();
    }

    fn undo_move(&mut self) {
        let record = self
            .history
            .pop()
            .expect("undo_move called with an empty move history");

        let index = self.index(record.row, record.column);
        self.cells[index] = None;
        self.heights[record.column] -= 1;
        if record.decided_game {
            self.winner = None;
        }
        self.to_move = self.to_move.opponent();
    }
}

impl VictorDeterminableGame for Board {
    fn is_over(&self) -> bool {
        self.winner.is_some() || self.history.len() == self.cells.len()
    }

    fn get_winner(&self) -> Option<Player> {
        self.winner
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.config.rows).rev() {
            for column in 0..self.config.columns {
                let symbol = self.cell(row, column).map_or('.', Player::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        for column in 0..self.config.columns {
            write!(f, "{}", column % 10)?;
        }

        Ok(())
    }
}
