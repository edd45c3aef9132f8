//! UCT Core - Game contract and shared types
//!
//! This crate provides the `GameState` trait that any two-player zero-sum
//! perfect-information game implements to be searchable by the engine in
//! `uct-mcts`.
//!
//! # Types
//!
//! - [`GameState`] - Trait for game implementations
//! - [`ValueVector`] - Per-player payoff vector
//! - [`SearchError`] - Contract-violation errors

mod error;
mod game;
mod types;

pub use error::{Result, SearchError};
pub use game::GameState;
pub use types::ValueVector;
