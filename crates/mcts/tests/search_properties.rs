//! Property-based tests for the search engine's tree invariants.
//!
//! Checked across random seeds and iteration counts:
//! - conservation: every node's total equals the sum of its slot counts
//! - monotonic growth: populated child slots are never unpopulated again
//! - boundedness: with payoffs in {-1, 0, 1}, running means stay in [-1, 1]
//! - determinism: a fixed seed reproduces the search exactly

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_mcts::{games::TicTacToe, Mcts, SearchConfig};

fn engine(seed: u64) -> Mcts<TicTacToe, ChaCha8Rng> {
    Mcts::new(
        TicTacToe::new(),
        SearchConfig::default(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Iteration counts kept small enough for fast tests but large enough to
/// drive the search a few plies deep.
fn arb_iterations() -> impl Strategy<Value = usize> {
    1usize..150
}

proptest! {
    /// Every node satisfies `total_visits == sum(visit_counts)` at all times.
    #[test]
    fn prop_visit_conservation(seed in arb_seed(), iterations in arb_iterations()) {
        let mut mcts = engine(seed);
        mcts.run(iterations).unwrap();

        for node in mcts.tree().nodes() {
            let slot_sum: u32 = node.visit_counts.iter().sum();
            prop_assert_eq!(
                node.total_visits,
                slot_sum,
                "conservation violated at a node with arity {}",
                node.arity()
            );
        }
    }

    /// Populated child slots never become unpopulated by further searching.
    #[test]
    fn prop_monotonic_growth(
        seed in arb_seed(),
        first in arb_iterations(),
        second in arb_iterations()
    ) {
        let mut mcts = engine(seed);
        mcts.run(first).unwrap();

        let populated: Vec<Vec<bool>> = mcts
            .tree()
            .nodes()
            .map(|n| n.children.iter().map(Option::is_some).collect())
            .collect();

        mcts.run(second).unwrap();

        let after: Vec<Vec<bool>> = mcts
            .tree()
            .nodes()
            .map(|n| n.children.iter().map(Option::is_some).collect())
            .collect();

        // Node ids are stable while the root stays put, so the first
        // `populated.len()` entries line up.
        for (before_node, after_node) in populated.iter().zip(&after) {
            for (was, is) in before_node.iter().zip(after_node) {
                prop_assert!(!was || *is, "a populated slot was cleared");
            }
        }
    }

    /// With tic-tac-toe payoffs every running mean stays inside [-1, 1].
    #[test]
    fn prop_action_values_bounded(seed in arb_seed(), iterations in arb_iterations()) {
        let mut mcts = engine(seed);
        mcts.run(iterations).unwrap();

        for node in mcts.tree().nodes() {
            for &q in &node.action_values {
                prop_assert!(
                    (-1.0..=1.0).contains(&q),
                    "action value {} escaped [-1, 1]",
                    q
                );
            }
        }
    }

    /// The same seed reproduces the search exactly.
    #[test]
    fn prop_deterministic(seed in arb_seed(), iterations in arb_iterations()) {
        let run = |seed: u64| {
            let mut mcts = engine(seed);
            mcts.run(iterations).unwrap();
            (
                mcts.best_slot(),
                mcts.tree().len(),
                mcts.root().visit_counts.clone(),
                mcts.root().action_values.clone(),
            )
        };

        prop_assert_eq!(run(seed), run(seed));
    }
}
