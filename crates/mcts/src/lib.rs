//! Monte Carlo Tree Search with UCB1 selection.
//!
//! This crate provides a generic MCTS implementation that works with any
//! game implementing the `uct_core::GameState` trait.
//!
//! # Features
//!
//! - **Generic**: works with any `GameState` implementation
//! - **UCB1 selection**: bandit-style balance of exploitation and
//!   exploration over per-move statistics held at each node
//! - **Rollout estimates**: newly expanded nodes are valued by the mean
//!   of independent random playouts
//! - **Arena tree**: nodes live in dense storage with integer ids, so
//!   parent back-references need no ownership cycles, and advancing the
//!   root compacts away discarded siblings
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use uct_mcts::{games::TicTacToe, Mcts, SearchConfig};
//!
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(TicTacToe::new(), SearchConfig::default(), rng);
//!
//! mcts.run(100).expect("game contract holds");
//! let slot = mcts.best_slot().expect("empty board has moves");
//! assert!(slot < 9);
//!
//! // Commit to the move: the chosen child becomes the root and all
//! // sibling subtrees are discarded.
//! mcts.advance(slot).expect("slot is in range");
//! ```

pub mod config;
pub mod games;
pub mod node;
pub mod search;
pub mod tree;

pub use config::SearchConfig;
pub use node::{Node, NodeId};
pub use search::Mcts;
pub use tree::Tree;
