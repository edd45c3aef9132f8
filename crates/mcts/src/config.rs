//! Search configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search
//! algorithm. Iterations per ply and ply limits are driver concerns and are
//! deliberately not part of this struct.

/// Search configuration parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// UCB1 exploration constant `C`.
    ///
    /// Scales the confidence term `sqrt(ln(total_visits) / visit_count)`.
    /// Higher values explore low-visit moves more aggressively.
    pub exploration_constant: f32,

    /// Number of independent random rollouts run from each newly
    /// expanded node. Their mean becomes the node's first value estimate.
    pub rollouts_per_expansion: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            rollouts_per_expansion: 16,
        }
    }
}

impl SearchConfig {
    /// Create a config with the given exploration constant.
    pub fn with_exploration(exploration_constant: f32) -> Self {
        Self {
            exploration_constant,
            ..Default::default()
        }
    }

    /// Create a config with the given rollout count per expansion.
    pub fn with_rollouts(rollouts_per_expansion: usize) -> Self {
        Self {
            rollouts_per_expansion,
            ..Default::default()
        }
    }
}
