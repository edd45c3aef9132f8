//! Monte Carlo Tree Search with UCB1 selection.
//!
//! One [`Mcts::search`] call performs a single full iteration: descend the
//! tree, expand at most one new node (or hit a terminal state), estimate its
//! value with random rollouts, and propagate the estimate back to the root.

use crate::{
    config::SearchConfig,
    node::{Node, NodeId},
    tree::Tree,
};
use rand::Rng;
use tracing::trace;
use uct_core::{GameState, Result, SearchError, ValueVector};

/// Monte Carlo Tree Search engine.
///
/// Generic over:
/// - `G`: the game being searched
/// - `R`: the random number generator (seed it for reproducible searches)
///
/// The engine exclusively owns its tree. The caller controls the workload
/// by bounding the number of [`search`](Mcts::search) iterations and by
/// [advancing](Mcts::advance) the root along the chosen line of play, which
/// discards all sibling subtrees.
pub struct Mcts<G: GameState, R: Rng> {
    config: SearchConfig,
    tree: Tree<G>,
    rng: R,
}

impl<G, R> Mcts<G, R>
where
    G: GameState,
    R: Rng,
{
    /// Create an engine rooted at the given initial state.
    pub fn new(state: G, config: SearchConfig, rng: R) -> Self {
        Self {
            config,
            tree: Tree::new(state),
            rng,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The current root node.
    pub fn root(&self) -> &Node<G> {
        self.tree.root()
    }

    /// The underlying tree, for inspection.
    pub fn tree(&self) -> &Tree<G> {
        &self.tree
    }

    /// Run one full search iteration from the root.
    ///
    /// Descends via UCB1 selection until it either reaches a terminal node
    /// (whose true result is backpropagated; no node is added) or picks an
    /// unpopulated child slot, which is expanded, estimated by rollouts,
    /// and backpropagated. Exactly one new node is created per call in the
    /// latter case.
    ///
    /// Calling this on a terminal root is a no-op: the root has no parent
    /// chain to update. Drivers are expected to stop iterating once the
    /// root is terminal.
    pub fn search(&mut self) -> Result<()> {
        let mut id = self.tree.root_id();
        loop {
            if self.tree.get(id).state.is_terminal() {
                let update = self.tree.get(id).state.result();
                self.backpropagate(id, &update);
                return Ok(());
            }

            let slot = self.select_slot(id)?;
            match self.tree.get(id).children[slot] {
                None => {
                    let child = self.expand(id, slot)?;
                    let update = self.simulate(child)?;
                    self.backpropagate(child, &update);
                    return Ok(());
                }
                Some(next) => id = next,
            }
        }
    }

    /// Run `iterations` consecutive search iterations.
    pub fn run(&mut self, iterations: usize) -> Result<()> {
        for _ in 0..iterations {
            self.search()?;
        }
        Ok(())
    }

    /// Root slot with the highest running mean value, ties broken by
    /// first-max. `None` if the root has no legal moves.
    pub fn best_slot(&self) -> Option<usize> {
        self.tree.root().best_value_slot()
    }

    /// Root move with the highest running mean value.
    pub fn best_move(&self) -> Option<G::Move> {
        self.best_slot().map(|i| self.tree.root().valid_moves[i])
    }

    /// Advance the root to the child at `slot`, discarding all sibling
    /// subtrees and releasing their memory.
    ///
    /// A slot that was never expanded is materialised first (the move is
    /// applied to a clone of the root state; no rollouts are run).
    pub fn advance(&mut self, slot: usize) -> Result<()> {
        let root = self.tree.root_id();
        if slot >= self.tree.get(root).arity() {
            return Err(SearchError::InvalidMove(format!(
                "slot {slot} out of range for {} legal moves",
                self.tree.get(root).arity()
            )));
        }
        let child = match self.tree.get(root).children[slot] {
            Some(id) => id,
            None => self.expand(root, slot)?,
        };
        trace!(slot, "advancing root");
        self.tree.promote(child);
        Ok(())
    }

    /// Advance the root through `mv`, which must be legal at the root.
    ///
    /// Convenience for drivers that receive opponent moves rather than
    /// slot indices.
    pub fn advance_move(&mut self, mv: G::Move) -> Result<()> {
        let slot = self
            .tree
            .root()
            .valid_moves
            .iter()
            .position(|&m| m == mv)
            .ok_or_else(|| SearchError::InvalidMove(format!("{mv:?}")))?;
        self.advance(slot)
    }

    /// Pick a child slot at `id`: uniformly at random among slots that have
    /// never been visited, otherwise the UCB1 maximiser.
    ///
    /// A zero-visit slot is treated as unexpanded even though, in
    /// principle, population and visits are distinct; under this
    /// algorithm's invariants a populated slot always has at least one
    /// visit, and selection depends on exactly this proxy.
    fn select_slot(&mut self, id: NodeId) -> Result<usize> {
        let node = self.tree.get(id);
        if node.arity() == 0 {
            return Err(SearchError::DegenerateSelection);
        }

        let unvisited: Vec<usize> = node
            .visit_counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == 0)
            .map(|(i, _)| i)
            .collect();
        if !unvisited.is_empty() {
            let pick = unvisited[self.rng.gen_range(0..unvisited.len())];
            trace!(node = id.index(), slot = pick, "selected unvisited slot");
            return Ok(pick);
        }

        let node = self.tree.get(id);
        let total = node.total_visits as f32;
        let c = self.config.exploration_constant;
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (i, (&n, &q)) in node
            .visit_counts
            .iter()
            .zip(&node.action_values)
            .enumerate()
        {
            let score = q + c * (total.ln() / n as f32).sqrt();
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        Ok(best)
    }

    /// Populate the child slot: clone the parent state, apply the slot's
    /// move, and link the new node into the tree.
    fn expand(&mut self, parent: NodeId, slot: usize) -> Result<NodeId> {
        if self.tree.get(parent).children[slot].is_some() {
            return Err(SearchError::DoubleExpansion(slot));
        }

        let mut state = self.tree.get(parent).state.clone();
        let mv = self.tree.get(parent).valid_moves[slot];
        state.make_move(mv)?;

        let child = self.tree.add(Node::new(state, Some(parent), Some(slot)));
        self.tree.get_mut(parent).children[slot] = Some(child);
        trace!(parent = parent.index(), slot, child = child.index(), "expanded");
        Ok(child)
    }

    /// Monte Carlo value estimate for the node: the arithmetic mean of
    /// `rollouts_per_expansion` independent random playouts, each starting
    /// from a fresh clone of the node's state.
    fn simulate(&mut self, id: NodeId) -> Result<ValueVector> {
        let base = self.tree.get(id).state.clone();
        let rollouts = self.config.rollouts_per_expansion.max(1);

        let mut total = ValueVector::zeros(base.num_players());
        for _ in 0..rollouts {
            let mut state = base.clone();
            while !state.is_terminal() {
                let moves = state.valid_moves();
                if moves.is_empty() {
                    return Err(SearchError::DegenerateSelection);
                }
                let mv = moves[self.rng.gen_range(0..moves.len())];
                state.make_move(mv)?;
            }
            total.accumulate(&state.result());
        }
        Ok(total.scaled(1.0 / rollouts as f32))
    }

    /// Walk the parent chain from `start`, updating each ancestor's
    /// statistics for the slot the traversal passed through.
    ///
    /// Per step the slot's visit count is bumped, the slot's running mean
    /// absorbs `update` indexed by the *ancestor's* player to move (the
    /// slot statistics answer "how good is this move from that player's
    /// perspective"), and the ancestor's total is bumped. The start node
    /// itself is never mutated.
    fn backpropagate(&mut self, start: NodeId, update: &ValueVector) {
        let mut current = start;
        while let Some(parent) = self.tree.get(current).parent {
            let slot = self
                .tree
                .get(current)
                .slot_in_parent
                .expect("BUG: non-root node without a parent slot");

            let node = self.tree.get_mut(parent);
            let player = node.state.player_to_move();
            node.visit_counts[slot] += 1;
            node.action_values[slot] +=
                (update[player] - node.action_values[slot]) / node.visit_counts[slot] as f32;
            node.total_visits += 1;

            current = parent;
        }
        trace!(from = start.index(), "backpropagated to root");
    }
}
