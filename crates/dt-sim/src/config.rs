//! World-level configuration.

use dt_spatial::{AlgorithmTag, NeighbourMode};

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    pub block_size: u32,
    pub max_blocks: usize,
    pub max_parallel_loaders: usize,
    pub neighbour_mode: NeighbourMode,
    /// Used only when [`WorldConfig::use_incremental_planner`] is `false`.
    pub default_algorithm: AlgorithmTag,
    pub default_cost_fn: String,
    pub default_heuristic_fn: String,
    /// Chebyshev radius, in cells, the world keeps loaded around a viewport.
    pub prefetch_distance: u32,
    /// Threshold passed to the route-change detector.
    pub route_change_threshold_deg: f64,
    /// History window `H` for the route-change detector.
    pub route_change_history: usize,
    pub spawn_batch_size: usize,
    pub despawn_batch_size: usize,
    /// When `true` (the default), every agent's per-tick plan is driven by a
    /// standing [`dt_spatial::DStarLite`] planner instead of a fresh static
    /// search each tick — the incremental replanning this crate exists to
    /// demonstrate. Set `false` to fall back to `default_algorithm` via the
    /// static finder dispatcher for every agent.
    pub use_incremental_planner: bool,
    /// Seeds the default block terrain factory ([`crate::facade::default_make_cell`]).
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            block_size: 16,
            max_blocks: 64,
            max_parallel_loaders: 4,
            neighbour_mode: NeighbourMode::Eight,
            default_algorithm: AlgorithmTag::AStar,
            default_cost_fn: "default".to_string(),
            default_heuristic_fn: "euclidean".to_string(),
            prefetch_distance: 2,
            route_change_threshold_deg: 10.0,
            route_change_history: 5,
            spawn_batch_size: 8,
            despawn_batch_size: 8,
            use_incremental_planner: true,
            rng_seed: 0,
        }
    }
}
