use std::fmt::Debug;
use std::hash::Hash;

use crate::{Result, ValueVector};

/// A playable game position.
///
/// This trait defines the interface that any game must implement to be
/// searchable by the engine. It is designed to be game-agnostic, supporting
/// tic-tac-toe, connect-four, and other zero-sum perfect-information games.
///
/// A `GameState` is a single mutable position: `make_move` advances it in
/// place, and `Clone` produces a deep copy that shares no mutable state with
/// the original. The engine relies on both properties when it expands nodes
/// and runs rollouts.
pub trait GameState: Clone {
    /// A move in this game (e.g., a board cell or a column)
    type Move: Copy + Eq + Hash + Debug;

    /// Number of players, and hence the length of every [`ValueVector`]
    /// this state produces
    fn num_players(&self) -> usize;

    /// 0-based index of the player to move in the current position
    fn player_to_move(&self) -> usize;

    /// Returns true if no further moves should be made (win, loss, draw,
    /// or no legal moves remain)
    fn is_terminal(&self) -> bool;

    /// Per-player payoff for this position.
    ///
    /// Only meaningful once the position is terminal; non-terminal
    /// positions must return the explicit neutral zero vector rather than
    /// leaving the result undefined.
    fn result(&self) -> ValueVector;

    /// All legal moves from the current position, in a deterministic order.
    ///
    /// The order must be stable across repeated calls on the same state
    /// instance until it is mutated.
    fn valid_moves(&self) -> Vec<Self::Move>;

    /// Applies `mv` in place and advances the player to move.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidMove`](crate::SearchError::InvalidMove)
    /// if `mv` is not currently legal, without mutating the position.
    fn make_move(&mut self, mv: Self::Move) -> Result<()>;
}
