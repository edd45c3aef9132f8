//! Bundled game implementations.
//!
//! Concrete instances of the `uct_core::GameState` contract, used to
//! exercise the engine end-to-end and by the self-play driver.

pub mod connect4;
pub mod tictactoe;

pub use connect4::{Connect4, Column, Disc};
pub use tictactoe::{Cell, Player, TicTacToe};
