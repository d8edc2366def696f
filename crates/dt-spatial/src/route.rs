//! Shared route finder vocabulary: the result type, the algorithm tag, and
//! the one config record every static finder is driven from.

use dt_core::Coord;

use crate::error::{SpatialError, SpatialResult};
use crate::map::Map;
use crate::registry;

/// The result of any route search, static or D* Lite.
///
/// A search that fails (no path, planner exhausted, cancelled) still
/// returns a `Route` with `found == false` rather than an `Err` — see the
/// crate-level error propagation policy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub path: Vec<Coord>,
    pub cost: f64,
    pub found: bool,
}

impl Route {
    pub fn failed() -> Self {
        Self { path: Vec::new(), cost: 0.0, found: false }
    }

    pub fn trivial(at: Coord) -> Self {
        Self { path: vec![at], cost: 0.0, found: true }
    }

    pub fn is_trivial(&self) -> bool {
        self.found && self.path.len() <= 1
    }
}

/// Which search algorithm a [`FinderConfig`] selects.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmTag {
    AStar,
    Bfs,
    Dfs,
    Dijkstra,
    WeightedAStar,
    IdaStar,
    RtaStar,
    SmaStar,
    Fringe,
    FastMarching,
}

/// Everything a static finder needs besides the map and the start/goal pair.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinderConfig {
    pub algorithm: AlgorithmTag,
    /// Name registered in [`registry`] — ignored by `Bfs`/`Dfs` which never
    /// weigh edges.
    pub cost_fn: String,
    /// Name registered in [`registry`] — ignored by `Bfs`/`Dfs`/`Dijkstra`.
    pub heuristic_fn: String,
    /// Weighted A*'s `w` in `f = g + w*h`. Ignored by other algorithms.
    pub weight: f64,
    /// Bound on the open list for SMA*. Ignored by other algorithms.
    pub memory_bound: usize,
    /// RTA*'s bounded lookahead depth. Ignored by other algorithms.
    pub lookahead_depth: u32,
    /// Fringe search's initial threshold; `None` defaults to `h(start, goal)`.
    pub fringe_initial_threshold: Option<f64>,
    /// Fringe search's threshold increment per outer iteration.
    pub fringe_delta_epsilon: f64,
    /// Hard cap on expanded nodes before declaring
    /// [`SpatialError::PlannerExhausted`] (recovered into a failed route).
    pub max_expansions: u64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmTag::AStar,
            cost_fn: "default".to_string(),
            heuristic_fn: "euclidean".to_string(),
            weight: 1.5,
            memory_bound: 2_000,
            lookahead_depth: 8,
            fringe_initial_threshold: None,
            fringe_delta_epsilon: 1.0,
            max_expansions: 200_000,
        }
    }
}

impl FinderConfig {
    fn resolve(&self) -> SpatialResult<(registry::CostFn, registry::HeuristicFn)> {
        let cost = registry::cost_fn(&self.cost_fn)
            .ok_or_else(|| SpatialError::UnknownFunction(self.cost_fn.clone()))?;
        let heuristic = registry::heuristic_fn(&self.heuristic_fn)
            .ok_or_else(|| SpatialError::UnknownFunction(self.heuristic_fn.clone()))?;
        Ok((cost, heuristic))
    }
}

/// Dispatch to the configured static finder.
///
/// Returns `Err(SpatialError::UnknownFunction)` if `config` names a cost or
/// heuristic function that isn't registered — the one error kind that is
/// rejected before a search ever starts. Every other failure mode (no path,
/// planner exhausted) comes back as `Ok(Route { found: false, .. })`.
pub fn find_route(
    map: &Map,
    config: &FinderConfig,
    start: Coord,
    goal: Coord,
) -> SpatialResult<Route> {
    let (cost, heuristic) = config.resolve()?;

    if start == goal {
        return Ok(Route::trivial(start));
    }
    if map.is_blocked(start) || map.is_blocked(goal) {
        return Ok(Route::failed());
    }

    use crate::finders;
    let route = match config.algorithm {
        AlgorithmTag::AStar => finders::astar(map, start, goal, &cost, &heuristic, 1.0, config.max_expansions),
        AlgorithmTag::WeightedAStar => {
            finders::astar(map, start, goal, &cost, &heuristic, config.weight, config.max_expansions)
        }
        AlgorithmTag::Dijkstra => finders::dijkstra(map, start, goal, &cost, config.max_expansions),
        AlgorithmTag::Bfs => finders::bfs(map, start, goal, config.max_expansions),
        AlgorithmTag::Dfs => finders::dfs(map, start, goal, config.max_expansions),
        AlgorithmTag::IdaStar => finders::ida_star(map, start, goal, &cost, &heuristic, config.max_expansions),
        AlgorithmTag::RtaStar => {
            finders::rta_star(map, start, goal, &cost, &heuristic, config.lookahead_depth)
        }
        AlgorithmTag::SmaStar => finders::sma_star(
            map,
            start,
            goal,
            &cost,
            &heuristic,
            config.memory_bound,
            config.max_expansions,
        ),
        AlgorithmTag::Fringe => finders::fringe(
            map,
            start,
            goal,
            &cost,
            &heuristic,
            config.fringe_initial_threshold,
            config.fringe_delta_epsilon,
            config.max_expansions,
        ),
        AlgorithmTag::FastMarching => finders::fast_marching(map, start, goal, config.max_expansions),
    };

    Ok(route.unwrap_or_else(Route::failed))
}
