use thiserror::Error;

/// Errors surfaced by the search engine and game implementations.
///
/// All variants are contract violations rather than recoverable runtime
/// conditions; nothing in the engine retries or swallows them.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A move outside the current legal set was applied.
    ///
    /// Games must detect this before mutating anything, so a failed
    /// `make_move` leaves the position untouched.
    #[error("illegal move: {0}")]
    InvalidMove(String),

    /// An attempt to expand a child slot that already holds a node.
    #[error("child slot {0} is already expanded")]
    DoubleExpansion(usize),

    /// Selection was requested at a non-terminal node with no legal moves,
    /// meaning the game's terminality and move enumeration disagree.
    #[error("no legal moves at a non-terminal node")]
    DegenerateSelection,
}

/// Convenience Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
