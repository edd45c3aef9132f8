//! Search tree nodes.
//!
//! Nodes live in an arena ([`Tree`](crate::tree::Tree)) and refer to each
//! other through stable integer indices, which keeps the parent
//! back-references needed for backpropagation free of ownership cycles.

use uct_core::GameState;

/// Index into the node arena.
///
/// A lightweight handle referencing a node in the tree. Using indices
/// instead of pointers avoids Rc/RefCell overhead and keeps parent links
/// plain data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the search tree.
///
/// Each node owns one game state and the bandit statistics for the moves
/// available there. Statistics are stored per child slot: slot `i`
/// corresponds to `valid_moves[i]`, and `action_values[i]` is the running
/// mean payoff of routing a simulation through that slot, seen from the
/// perspective of the player to move at *this* node.
#[derive(Clone, Debug)]
pub struct Node<G: GameState> {
    /// Game state at this node.
    pub state: G,

    /// Legal moves enumerated once at construction; fixes the node's arity.
    pub valid_moves: Vec<G::Move>,

    /// One optional child per move slot. A slot is populated at most once
    /// and never cleared.
    pub children: Vec<Option<NodeId>>,

    /// Simulations routed through each child slot.
    pub visit_counts: Vec<u32>,

    /// Running mean payoff per child slot (Q), from this node's
    /// player-to-move perspective.
    pub action_values: Vec<f32>,

    /// Sum of all routed simulations; always equals the sum of
    /// `visit_counts`.
    pub total_visits: u32,

    /// Owning node, absent only at the root. Used purely for
    /// backpropagation traversal.
    pub parent: Option<NodeId>,

    /// Move slot under which this node is registered in its parent,
    /// absent only at the root.
    pub slot_in_parent: Option<usize>,
}

impl<G: GameState> Node<G> {
    /// Create a node for `state`, enumerating its legal moves once.
    pub fn new(state: G, parent: Option<NodeId>, slot_in_parent: Option<usize>) -> Self {
        debug_assert_eq!(parent.is_some(), slot_in_parent.is_some());
        let valid_moves = state.valid_moves();
        let arity = valid_moves.len();
        Self {
            state,
            valid_moves,
            children: vec![None; arity],
            visit_counts: vec![0; arity],
            action_values: vec![0.0; arity],
            total_visits: 0,
            parent,
            slot_in_parent,
        }
    }

    /// Create a root node from an externally supplied initial state.
    pub fn root(state: G) -> Self {
        Self::new(state, None, None)
    }

    /// Number of child slots (one per legal move).
    pub fn arity(&self) -> usize {
        self.valid_moves.len()
    }

    /// Slot index of the highest running mean, ties broken by first-max.
    ///
    /// Returns `None` for a node with no move slots.
    pub fn best_value_slot(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &q) in self.action_values.iter().enumerate() {
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((i, q)),
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToe;

    #[test]
    fn test_root_node() {
        let root = Node::root(TicTacToe::new());
        assert_eq!(root.arity(), 9);
        assert_eq!(root.total_visits, 0);
        assert!(root.parent.is_none());
        assert!(root.slot_in_parent.is_none());
        assert!(root.children.iter().all(Option::is_none));
        assert!(root.visit_counts.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_best_value_slot_prefers_first_max() {
        let mut node = Node::root(TicTacToe::new());
        node.action_values[3] = 0.5;
        node.action_values[7] = 0.5;
        assert_eq!(node.best_value_slot(), Some(3));
    }

    #[test]
    fn test_best_value_slot_all_zero() {
        let node = Node::root(TicTacToe::new());
        assert_eq!(node.best_value_slot(), Some(0));
    }
}
