//! Named, process-wide registry of cost and heuristic functions.
//!
//! Finders and the D* Lite planner select their cost/heuristic function by
//! name (a [`crate::FinderConfig`] field) rather than by trait object
//! reference, so a route request that crosses a worker-pool boundary stays
//! `Copy`-cheap to pass around — only the name travels with the task, the
//! function pointer is resolved locally by each worker from the shared
//! registry.

use dt_core::Coord;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// A step cost function: cost of moving from `a` directly to a neighbour `b`.
///
/// Deliberately narrower than a `(map, from, to, user)` signature — every
/// bundled cost function is a pure function of the two coordinates, and
/// map-dependent blocking is already handled upstream by `Map::is_blocked`
/// before a finder ever calls into this. See `DESIGN.md` if a future cost
/// function needs to see the map or caller-supplied context directly.
pub type CostFn = Arc<dyn Fn(Coord, Coord) -> f64 + Send + Sync>;

/// An admissible-or-not distance estimate from `a` to `b`, used as the A*
/// family's `h` term. Same narrowed signature as [`CostFn`].
pub type HeuristicFn = Arc<dyn Fn(Coord, Coord) -> f64 + Send + Sync>;

fn cost_default(a: Coord, b: Coord) -> f64 {
    // 1 for an orthogonal step, sqrt(2) for a diagonal one — same edge
    // weighting as `cost_diagonal`. Whether `b` is passable at all is the
    // map's/agent's concern (`Map::is_blocked`), not this function's: by the
    // time a finder calls a cost fn it has already filtered to neighbours.
    cost_diagonal(a, b)
}

fn cost_zero(_a: Coord, _b: Coord) -> f64 {
    0.0
}

fn cost_diagonal(a: Coord, b: Coord) -> f64 {
    if a.x != b.x && a.y != b.y {
        std::f64::consts::SQRT_2
    } else {
        1.0
    }
}

fn heuristic_euclidean(a: Coord, b: Coord) -> f64 {
    a.euclidean(b) as f64
}

fn heuristic_manhattan(a: Coord, b: Coord) -> f64 {
    a.manhattan(b) as f64
}

fn heuristic_chebyshev(a: Coord, b: Coord) -> f64 {
    a.chebyshev(b) as f64
}

/// Octile distance: the admissible heuristic for 8-connected grids with
/// `cost_diagonal` edge costs.
fn heuristic_octile(a: Coord, b: Coord) -> f64 {
    let dx = (b.x - a.x).unsigned_abs() as f64;
    let dy = (b.y - a.y).unsigned_abs() as f64;
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    (hi - lo) + lo * std::f64::consts::SQRT_2
}

fn heuristic_zero(_a: Coord, _b: Coord) -> f64 {
    0.0 // turns A* into Dijkstra without changing the dispatch path
}

/// Holds both the cost and heuristic namespaces. The two are looked up
/// independently — a request names a cost function and a heuristic function
/// separately, they are never confused with each other even though some
/// share an implementation (e.g. `"zero"` exists in both namespaces).
struct Registry {
    costs: HashMap<&'static str, CostFn>,
    heuristics: HashMap<&'static str, HeuristicFn>,
}

fn build_default_registry() -> Registry {
    let mut costs: HashMap<&'static str, CostFn> = HashMap::new();
    costs.insert("default", Arc::new(cost_default));
    costs.insert("zero", Arc::new(cost_zero));
    costs.insert("diagonal", Arc::new(cost_diagonal));

    let mut heuristics: HashMap<&'static str, HeuristicFn> = HashMap::new();
    heuristics.insert("euclidean", Arc::new(heuristic_euclidean));
    heuristics.insert("manhattan", Arc::new(heuristic_manhattan));
    heuristics.insert("chebyshev", Arc::new(heuristic_chebyshev));
    heuristics.insert("octile", Arc::new(heuristic_octile));
    heuristics.insert("zero", Arc::new(heuristic_zero));
    // D* Lite computes its key's h-term against the planner's current start,
    // not a fixed goal; it reuses the same named heuristics by calling them
    // with the frontier coordinate and the live start coordinate, so no
    // separate "dstar" bundle is needed beyond what's already registered.

    Registry { costs, heuristics }
}

static REGISTRY: OnceLock<std::sync::RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static std::sync::RwLock<Registry> {
    REGISTRY.get_or_init(|| std::sync::RwLock::new(build_default_registry()))
}

/// Look up a cost function by name.
pub fn cost_fn(name: &str) -> Option<CostFn> {
    registry().read().unwrap().costs.get(name).cloned()
}

/// Look up a heuristic function by name.
pub fn heuristic_fn(name: &str) -> Option<HeuristicFn> {
    registry().read().unwrap().heuristics.get(name).cloned()
}

/// Register a custom cost function under `name`, replacing any existing
/// entry. Intended for application start-up, before any finder runs.
pub fn register_cost(name: &'static str, f: CostFn) {
    registry().write().unwrap().costs.insert(name, f);
}

/// Register a custom heuristic function under `name`, replacing any
/// existing entry.
pub fn register_heuristic(name: &'static str, f: HeuristicFn) {
    registry().write().unwrap().heuristics.insert(name, f);
}
