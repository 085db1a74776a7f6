//! Capability traits for drop games
//!
//! Search code never touches board storage directly, it asks for exactly the capabilities it
//! needs through these traits. [crate::Board] implements all of them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// The player that moves first on an empty board
    First,
    /// The player that moves second
    Second,
}

impl Player {
    /// The other player
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// The character used to draw this player's pieces
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "first"),
            Player::Second => write!(f, "second"),
        }
    }
}

/// Geometric queries over the grid
///
/// Row `0` is the bottom row, so the first open row of a column is also its height.
pub trait GridQueryableGame {
    /// Number of columns
    fn columns(&self) -> usize;
    /// Number of rows
    fn rows(&self) -> usize;
    /// How many pieces in a line win the game
    fn win_length(&self) -> usize;
    /// Who occupies the given cell, `None` if it is empty
    fn cell(&self, row: usize, column: usize) -> Option<Player>;
    /// The lowest empty row of the column, `None` if the column is full
    fn first_open_row(&self, column: usize) -> Option<usize>;

    /// Whether every cell of the column is occupied
    fn is_full(&self, column: usize) -> bool {
        self.first_open_row(column).is_none()
    }

    /// Number of empty cells left on the whole board
    fn empty_cells(&self) -> usize {
        (0..self.columns())
            .map(|column| {
                self.first_open_row(column)
                    .map_or(0, |row| self.rows() - row)
            })
            .sum()
    }
}

/// Games that know whose turn it is
pub trait PlayerToMoveGame {
    /// The player that makes the next move
    fn player_to_move(&self) -> Player;
}

/// Make/unmake move support
///
/// Every `apply_move` must be matched by exactly one `undo_move`. Both panic when the contract is
/// broken: applying to a full or unknown column, or undoing with an empty history.
pub trait ReversibleGame {
    /// Drop the current mover's piece into `column` and pass the turn
    fn apply_move(&mut self, column: usize);
    /// Take back the most recent move
    fn undo_move(&mut self);
}

/// Games that can report if they are over and who won
pub trait VictorDeterminableGame {
    /// Whether someone has won or the board is full
    fn is_over(&self) -> bool;
    /// The winner, `None` while in progress or for a draw
    fn get_winner(&self) -> Option<Player>;
}
