//! Core types shared by the NoGo rules engine and the decision agents
//!
//! This crate provides the narrow interface the search consumes:
//! - `Side`: the two movers (black and white)
//! - `Place`: a copyable move naming a cell and the side placing on it
//! - `BoardGame`: the rules-engine contract, `place(move) -> legal | illegal`
//! - `IllegalMove`: why a placement was rejected

pub mod action;
pub mod board_game;
pub mod side;

pub use action::Place;
pub use board_game::{BoardGame, IllegalMove};
pub use side::{ParseSideError, Side};
