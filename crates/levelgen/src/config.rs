//! Generation knobs. Every field has a default so partial config files work.

use serde::{Deserialize, Serialize};

/// Stress ratio (current length / max length) above which an edge is split.
pub const DEFAULT_STRESS_THRESHOLD: f64 = 1.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub stress_threshold: f64,
    /// Keep running expansion passes until the graph has this many nodes.
    /// `None` runs a single pass over the seed graph.
    pub target_node_count: Option<usize>,
    /// Relaxation after a template expansion.
    pub relax: RelaxConfig,
    /// Relaxation after an over-long edge is split.
    pub edge_relax: RelaxConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 85,
            stress_threshold: DEFAULT_STRESS_THRESHOLD,
            target_node_count: None,
            relax: RelaxConfig::default(),
            edge_relax: RelaxConfig { max_iterations: 1_000, ..RelaxConfig::default() },
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelaxConfig {
    /// Largest distance any node may move in one relaxation pass.
    pub max_move: f64,
    /// Converged once the largest force is below this...
    pub force_target: f64,
    /// ...and the largest move is below this.
    pub move_target: f64,
    /// Passes before relaxation gives up and fails.
    pub max_iterations: u32,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self { max_move: 1.0, force_target: 0.001, move_target: 0.01, max_iterations: 2_000 }
    }
}
