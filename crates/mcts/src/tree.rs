//! Arena-allocated search tree.
//!
//! Using a `Vec<Node>` with indices provides better cache locality and
//! simpler ownership compared to `Rc<RefCell<Node>>`, and lets child nodes
//! hold a plain parent index for backpropagation without reference cycles.

use crate::node::{Node, NodeId};
use uct_core::GameState;

/// Arena-allocated search tree.
///
/// Nodes are stored in a contiguous vector and referenced by index. The
/// tree tracks which node is currently the root; [`Tree::promote`] moves
/// the root down to a child and compacts the arena so sibling subtrees are
/// actually released.
#[derive(Debug)]
pub struct Tree<G: GameState> {
    nodes: Vec<Node<G>>,
    root: NodeId,
}

impl<G: GameState> Tree<G> {
    /// Create a tree whose root holds the given initial state.
    pub fn new(state: G) -> Self {
        Self {
            nodes: vec![Node::root(state)],
            root: NodeId(0),
        }
    }

    /// Current root id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Current root node.
    pub fn root(&self) -> &Node<G> {
        self.get(self.root)
    }

    /// Get a reference to a node by id.
    ///
    /// # Panics
    /// Panics if the id is stale (from before a `promote`) or invalid.
    pub fn get(&self, id: NodeId) -> &Node<G> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by id.
    ///
    /// # Panics
    /// Panics if the id is stale or invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<G> {
        &mut self.nodes[id.0]
    }

    /// Add a node to the arena, returning its id.
    pub fn add(&mut self, node: Node<G>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true; a root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all live nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<G>> {
        self.nodes.iter()
    }

    /// Make `new_root` the root and drop every node outside its subtree.
    ///
    /// Node ids held by the caller are invalidated: the subtree is
    /// compacted to the front of the arena and re-indexed. The promoted
    /// node loses its parent link and slot, and the memory of all sibling
    /// subtrees is released.
    ///
    /// # Panics
    /// Panics if `new_root` is stale or invalid.
    pub fn promote(&mut self, new_root: NodeId) {
        // Breadth-first order over the retained subtree.
        let mut order = vec![new_root];
        let mut i = 0;
        while i < order.len() {
            let id = order[i];
            order.extend(self.nodes[id.0].children.iter().flatten().copied());
            i += 1;
        }

        let mut remap: Vec<Option<usize>> = vec![None; self.nodes.len()];
        for (new_idx, old) in order.iter().enumerate() {
            remap[old.0] = Some(new_idx);
        }

        let old_nodes = std::mem::take(&mut self.nodes);
        let mut slots: Vec<Option<Node<G>>> = old_nodes.into_iter().map(Some).collect();

        self.nodes = Vec::with_capacity(order.len());
        for &old in &order {
            let mut node = slots[old.0]
                .take()
                .expect("BUG: promote visited a node twice");
            node.parent = node
                .parent
                .and_then(|p| remap[p.0])
                .map(NodeId);
            for child in node.children.iter_mut() {
                *child = child.map(|c| {
                    NodeId(remap[c.0].expect("BUG: child outside promoted subtree"))
                });
            }
            self.nodes.push(node);
        }

        self.nodes[0].parent = None;
        self.nodes[0].slot_in_parent = None;
        self.root = NodeId(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToe;

    fn materialize(tree: &mut Tree<TicTacToe>, parent: NodeId, slot: usize) -> NodeId {
        let mut state = tree.get(parent).state.clone();
        let mv = tree.get(parent).valid_moves[slot];
        state.make_move(mv).unwrap();
        let id = tree.add(Node::new(state, Some(parent), Some(slot)));
        tree.get_mut(parent).children[slot] = Some(id);
        id
    }

    #[test]
    fn test_tree_creation() {
        let tree = Tree::new(TicTacToe::new());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert!(tree.root().parent.is_none());
    }

    #[test]
    fn test_tree_add_links() {
        let mut tree = Tree::new(TicTacToe::new());
        let root = tree.root_id();
        let child = materialize(&mut tree, root, 4);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.get(child).slot_in_parent, Some(4));
        assert_eq!(tree.root().children[4], Some(child));
    }

    #[test]
    fn test_promote_discards_siblings() {
        let mut tree = Tree::new(TicTacToe::new());
        let root = tree.root_id();
        let keep = materialize(&mut tree, root, 0);
        let _drop_a = materialize(&mut tree, root, 1);
        let _drop_b = materialize(&mut tree, root, 2);
        let grandchild = materialize(&mut tree, keep, 3);
        tree.get_mut(grandchild).total_visits = 7;

        tree.promote(keep);

        // Only the promoted subtree survives: keep + its one child.
        assert_eq!(tree.len(), 2);
        assert!(tree.root().parent.is_none());
        assert!(tree.root().slot_in_parent.is_none());

        let new_grandchild = tree.root().children[3].expect("subtree child retained");
        assert_eq!(tree.get(new_grandchild).total_visits, 7);
        assert_eq!(tree.get(new_grandchild).parent, Some(tree.root_id()));
    }
}
