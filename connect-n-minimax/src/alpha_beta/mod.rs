//! Two player minimax with Alpha-Beta pruning, deepened until a wall clock budget runs out
//!
//! The searching player is always the maximizing player and every node is scored from its point
//! of view. The board is never cloned, each move is applied before recursing and undone right
//! after, including when the search runs out of time.
//!
//! ```rust
//! use std::time::Duration;
//! use connect_n_minimax::{
//!     alpha_beta::{AlphaBetaPlayer, EngineOptions},
//!     evaluator::LineEvaluator,
//! };
//! use types::{Board, BoardConfig};
//!
//! let mut board = Board::from_moves(BoardConfig::default(), &[0, 6, 1, 6, 2]).unwrap();
//! let before = board.clone();
//!
//! let mut player: AlphaBetaPlayer<i64, LineEvaluator> =
//!     AlphaBetaPlayer::new(LineEvaluator::default(), "doc", EngineOptions::default());
//! let column = player.decide(&mut board, Duration::from_millis(50));
//!
//! // The second player has to block the open end of the first player's three
//! assert_eq!(column, 3);
//! assert_eq!(board, before);
//! ```

mod clock;
mod eval;
mod minimax_return;
mod score;

pub use clock::{Clock, Deadline, SystemClock, TickingClock};
pub use eval::{
    AbortedEarly, AlphaBetaPlayer, Decision, DecisionSource, EngineOptions, PlyRamp, Pruning,
};
pub use minimax_return::MinMaxReturn;
pub use score::{Scorable, WrappedScorable, WrappedScore};
