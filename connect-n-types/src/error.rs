use thiserror::Error;

/// Errors returned by the checked board operations
///
/// Breaking the apply/undo discipline is not represented here, those are programming errors and
/// panic instead
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The requested dimensions or win length can't make a playable board
    #[error("invalid board config: {0}")]
    InvalidConfig(String),
    /// The column doesn't exist on this board
    #[error("column {column} is out of range for a board with {columns} columns")]
    ColumnOutOfRange {
        /// The column that was requested
        column: usize,
        /// How many columns the board has
        columns: usize,
    },
    /// Every cell in the column is already occupied
    #[error("column {0} is full")]
    ColumnFull(usize),
    /// Someone already won, or the board is full
    #[error("the game is already over")]
    GameOver,
}
