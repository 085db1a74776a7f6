#![warn(missing_debug_implementations, missing_docs)]
//! Game types for connect-N style "drop" games played on a configurable grid.
//!
//! The [types] module holds the small capability traits that search code is generic over. The
//! [board::Board] struct is the concrete owned board that implements all of them, and
//! [wire_representation] is the JSON friendly record that boards are loaded from and saved to.

pub mod board;
pub mod error;
pub mod types;
pub mod wire_representation;

pub use board::{Board, BoardConfig, Outcome};
pub use error::BoardError;
pub use types::Player;
