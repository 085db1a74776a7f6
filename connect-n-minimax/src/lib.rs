#![deny(missing_debug_implementations, missing_docs)]
//! This crate picks moves for connect-N style drop games. You provide a 'scoring' function that
//! turns a board into anything that implements the `Ord` trait, or use the
//! [evaluator::LineEvaluator] that weighs open line windows.
//!
//! We lean on the `connect-n-types` crate for the board and its apply/undo move logic.

pub mod alpha_beta;
pub mod evaluator;
