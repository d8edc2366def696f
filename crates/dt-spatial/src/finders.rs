//! Static (one-shot, full-information) route finders.
//!
//! Every function here takes a fully built [`Map`] and returns an optional
//! [`Route`] — `None` means "no path found" or "search exhausted", which
//! [`crate::route::find_route`] converts into `Route { found: false, .. }`
//! at the dispatch boundary. None of these talk to the D* Lite frontier in
//! [`crate::dstar`]; that planner keeps its own incremental state instead of
//! recomputing from scratch on every call.

use dt_core::Coord;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::map::Map;
use crate::registry::{CostFn, HeuristicFn};
use crate::route::Route;

fn reconstruct(parents: &FxHashMap<Coord, Coord>, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        match parents.get(&cur) {
            Some(&p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone)]
struct Node {
    f: f64,
    coord: Coord,
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.coord == other.coord
    }
}
impl Eq for Node {}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.coord.cmp(&other.coord))
    }
}

/// A*, and Weighted A* via `weight != 1.0` (`f = g + weight*h`). Best-first
/// over `f` with a closed set, the classical formulation.
pub fn astar(
    map: &Map,
    start: Coord,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    weight: f64,
    max_expansions: u64,
) -> Option<Route> {
    let mut open = BinaryHeap::new();
    let mut g: FxHashMap<Coord, f64> = FxHashMap::default();
    let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();
    let mut closed: FxHashSet<Coord> = FxHashSet::default();

    g.insert(start, 0.0);
    open.push(Node { f: weight * heuristic(start, goal), coord: start });

    let mut expansions = 0u64;
    while let Some(Node { coord, .. }) = open.pop() {
        if closed.contains(&coord) {
            continue;
        }
        if coord == goal {
            return Some(Route { cost: g[&coord], path: reconstruct(&parents, start, goal), found: true });
        }
        closed.insert(coord);
        expansions += 1;
        if expansions > max_expansions {
            return None;
        }

        let g_coord = g[&coord];
        for n in map.neighbours(coord) {
            if closed.contains(&n) {
                continue;
            }
            let tentative = g_coord + cost(coord, n);
            if tentative < *g.get(&n).unwrap_or(&f64::INFINITY) {
                g.insert(n, tentative);
                parents.insert(n, coord);
                open.push(Node { f: tentative + weight * heuristic(n, goal), coord: n });
            }
        }
    }
    None
}

/// Dijkstra's algorithm: A* with a zero heuristic, decrease-key implemented
/// by pushing a fresh heap entry and discarding stale pops lazily.
pub fn dijkstra(map: &Map, start: Coord, goal: Coord, cost: &CostFn, max_expansions: u64) -> Option<Route> {
    let zero: HeuristicFn = std::sync::Arc::new(|_, _| 0.0);
    astar(map, start, goal, cost, &zero, 1.0, max_expansions)
}

/// Breadth-first search. Ignores `cost` entirely — every edge counts as 1.
pub fn bfs(map: &Map, start: Coord, goal: Coord, max_expansions: u64) -> Option<Route> {
    let mut queue = VecDeque::new();
    let mut visited: FxHashSet<Coord> = FxHashSet::default();
    let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();

    queue.push_back(start);
    visited.insert(start);
    let mut expansions = 0u64;

    while let Some(coord) = queue.pop_front() {
        if coord == goal {
            let path = reconstruct(&parents, start, goal);
            return Some(Route { cost: (path.len() - 1) as f64, path, found: true });
        }
        expansions += 1;
        if expansions > max_expansions {
            return None;
        }
        for n in map.neighbours(coord) {
            if visited.insert(n) {
                parents.insert(n, coord);
                queue.push_back(n);
            }
        }
    }
    None
}

/// Depth-first search. Ignores `cost`; finds *a* path, not a shortest one.
pub fn dfs(map: &Map, start: Coord, goal: Coord, max_expansions: u64) -> Option<Route> {
    let mut stack = vec![start];
    let mut visited: FxHashSet<Coord> = FxHashSet::default();
    let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();
    visited.insert(start);
    let mut expansions = 0u64;

    while let Some(coord) = stack.pop() {
        if coord == goal {
            let path = reconstruct(&parents, start, goal);
            return Some(Route { cost: (path.len() - 1) as f64, path, found: true });
        }
        expansions += 1;
        if expansions > max_expansions {
            return None;
        }
        for n in map.neighbours(coord) {
            if visited.insert(n) {
                parents.insert(n, coord);
                stack.push(n);
            }
        }
    }
    None
}

/// Iterative-Deepening A*: repeated depth-first probes bounded by an
/// `f`-threshold that grows to the smallest excess seen on the previous
/// probe, trading memory for repeated work.
pub fn ida_star(
    map: &Map,
    start: Coord,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    max_expansions: u64,
) -> Option<Route> {
    let mut threshold = heuristic(start, goal);
    let mut path = vec![start];
    let mut expansions = 0u64;

    loop {
        let mut next_threshold = f64::INFINITY;
        let found = ida_probe(
            map,
            goal,
            cost,
            heuristic,
            &mut path,
            0.0,
            threshold,
            &mut next_threshold,
            &mut expansions,
            max_expansions,
        );
        match found {
            ProbeResult::Found => {
                let cost_total = path
                    .windows(2)
                    .map(|w| cost(w[0], w[1]))
                    .sum();
                return Some(Route { path, cost: cost_total, found: true });
            }
            ProbeResult::Exhausted => return None,
            ProbeResult::NotFound => {
                if next_threshold.is_infinite() {
                    return None;
                }
                threshold = next_threshold;
            }
        }
    }
}

enum ProbeResult {
    Found,
    NotFound,
    Exhausted,
}

#[allow(clippy::too_many_arguments)]
fn ida_probe(
    map: &Map,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    path: &mut Vec<Coord>,
    g: f64,
    threshold: f64,
    next_threshold: &mut f64,
    expansions: &mut u64,
    max_expansions: u64,
) -> ProbeResult {
    let coord = *path.last().unwrap();
    let f = g + heuristic(coord, goal);
    if f > threshold {
        *next_threshold = next_threshold.min(f);
        return ProbeResult::NotFound;
    }
    if coord == goal {
        return ProbeResult::Found;
    }
    *expansions += 1;
    if *expansions > max_expansions {
        return ProbeResult::Exhausted;
    }

    for n in map.neighbours(coord) {
        if path.contains(&n) {
            continue;
        }
        path.push(n);
        match ida_probe(map, goal, cost, heuristic, path, g + cost(coord, n), threshold, next_threshold, expansions, max_expansions) {
            ProbeResult::Found => return ProbeResult::Found,
            ProbeResult::Exhausted => return ProbeResult::Exhausted,
            ProbeResult::NotFound => {}
        }
        path.pop();
    }
    ProbeResult::NotFound
}

/// Real-Time A*: repeatedly runs a bounded-depth A* lookahead from the
/// current position and commits to one step toward the best-looking
/// neighbour, the way an agent with a limited planning horizon would.
pub fn rta_star(
    map: &Map,
    start: Coord,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    lookahead_depth: u32,
) -> Option<Route> {
    let mut current = start;
    let mut path = vec![start];
    let mut total_cost = 0.0;
    let max_steps = 10_000u32;

    for _ in 0..max_steps {
        if current == goal {
            return Some(Route { path, cost: total_cost, found: true });
        }
        let neighbours = map.neighbours(current);
        if neighbours.is_empty() {
            return None;
        }
        // Evaluate each neighbour by a bounded-depth lookahead estimate:
        // g(current->n) + (depth-limited A* probe's best f from n to goal).
        let mut best: Option<(Coord, f64, f64)> = None; // (coord, step_cost, f_estimate)
        for n in neighbours {
            let step_cost = cost(current, n);
            let f_estimate = lookahead_min_f(map, n, goal, cost, heuristic, lookahead_depth, step_cost);
            if best.is_none() || f_estimate < best.unwrap().2 {
                best = Some((n, step_cost, f_estimate));
            }
        }
        let (next, step_cost, _) = best.unwrap();
        current = next;
        total_cost += step_cost;
        path.push(current);
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn lookahead_min_f(
    map: &Map,
    from: Coord,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    depth: u32,
    g_so_far: f64,
) -> f64 {
    if depth == 0 || from == goal {
        return g_so_far + heuristic(from, goal);
    }
    map.neighbours(from)
        .into_iter()
        .map(|n| lookahead_min_f(map, n, goal, cost, heuristic, depth - 1, g_so_far + cost(from, n)))
        .fold(g_so_far + heuristic(from, goal), f64::min)
}

/// Simplified Memory-bounded A*: A* whose open list is capped at
/// `memory_bound` entries, trimming the currently-worst (highest `f`)
/// entries whenever it would grow past the bound.
pub fn sma_star(
    map: &Map,
    start: Coord,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    memory_bound: usize,
    max_expansions: u64,
) -> Option<Route> {
    use crate::cost_pq::FloatPriorityQueue;

    let mut open = FloatPriorityQueue::new();
    let mut g: FxHashMap<Coord, f64> = FxHashMap::default();
    let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();
    let mut closed: FxHashSet<Coord> = FxHashSet::default();

    g.insert(start, 0.0);
    open.update_cost(start, heuristic(start, goal));

    let mut expansions = 0u64;
    while let Some((coord, _)) = open.pop() {
        if coord == goal {
            return Some(Route { cost: g[&coord], path: reconstruct(&parents, start, goal), found: true });
        }
        closed.insert(coord);
        expansions += 1;
        if expansions > max_expansions {
            return None;
        }

        let g_coord = g[&coord];
        for n in map.neighbours(coord) {
            if closed.contains(&n) {
                continue;
            }
            let tentative = g_coord + cost(coord, n);
            if tentative < *g.get(&n).unwrap_or(&f64::INFINITY) {
                g.insert(n, tentative);
                parents.insert(n, coord);
                open.update_cost(n, tentative + heuristic(n, goal));
            }
        }

        if memory_bound > 0 && open.len() > memory_bound {
            for (dropped, _) in open.trim_worst_n(open.len() - memory_bound) {
                g.remove(&dropped);
                parents.remove(&dropped);
            }
        }
    }
    None
}

/// Fringe search: A*-equivalent result using two linked lists (`now`,
/// `later`) and a rising `f`-threshold instead of a binary heap.
#[allow(clippy::too_many_arguments)]
pub fn fringe(
    map: &Map,
    start: Coord,
    goal: Coord,
    cost: &CostFn,
    heuristic: &HeuristicFn,
    initial_threshold: Option<f64>,
    delta_epsilon: f64,
    max_expansions: u64,
) -> Option<Route> {
    let mut threshold = initial_threshold.unwrap_or_else(|| heuristic(start, goal));
    let mut now: VecDeque<Coord> = VecDeque::from([start]);
    let mut g: FxHashMap<Coord, f64> = FxHashMap::from_iter([(start, 0.0)]);
    let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();
    let mut in_fringe: FxHashSet<Coord> = FxHashSet::from_iter([start]);
    let mut expansions = 0u64;

    loop {
        let mut later: VecDeque<Coord> = VecDeque::new();
        let mut next_threshold = f64::INFINITY;
        let mut progressed = false;

        while let Some(coord) = now.pop_front() {
            let f = g[&coord] + heuristic(coord, goal);
            if f > threshold {
                next_threshold = next_threshold.min(f);
                later.push_back(coord);
                continue;
            }
            if coord == goal {
                return Some(Route { cost: g[&coord], path: reconstruct(&parents, start, goal), found: true });
            }
            in_fringe.remove(&coord);
            progressed = true;
            expansions += 1;
            if expansions > max_expansions {
                return None;
            }

            for n in map.neighbours(coord) {
                let tentative = g[&coord] + cost(coord, n);
                if tentative < *g.get(&n).unwrap_or(&f64::INFINITY) {
                    g.insert(n, tentative);
                    parents.insert(n, coord);
                    if !in_fringe.contains(&n) {
                        now.push_back(n);
                        in_fringe.insert(n);
                    }
                }
            }
        }

        now = later;
        if now.is_empty() {
            return None;
        }
        if !progressed && next_threshold.is_finite() {
            threshold = next_threshold;
        } else {
            threshold += delta_epsilon;
        }
    }
}

/// Fast Marching: Dijkstra over 8-connected cells using the diagonal-aware
/// cost function regardless of the finder config's named cost — the whole
/// point is the `sqrt(2)` diagonal weighting, not a pluggable cost term.
pub fn fast_marching(map: &Map, start: Coord, goal: Coord, max_expansions: u64) -> Option<Route> {
    let diagonal: CostFn = std::sync::Arc::new(|a: Coord, b: Coord| {
        if a.x != b.x && a.y != b.y {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    });
    dijkstra(map, start, goal, &diagonal, max_expansions)
}
