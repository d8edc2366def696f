//! D* Lite: an incremental shortest-path planner that replans cheaply after
//! local edge-cost changes, instead of re-running a static finder from
//! scratch every time an obstacle moves.
//!
//! The planner keeps `g`/`rhs` estimates per vertex and a priority frontier
//! of vertices whose two values disagree (`g(u) != rhs(u)`). A local change
//! (an obstacle appearing near the agent) only needs to re-settle the
//! vertices reachable from that change, not the whole graph — the frontier
//! does that work incrementally in [`DStarLite::compute_shortest_path`].
//!
//! The key is a flat `(k1, k2)` float pair compared lexicographically with
//! an epsilon tolerance, and the frontier keeps a coord-side index purely
//! so `contains`/`remove` are not a heap scan.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use dt_core::Coord;

use crate::containers::CoordHash;
use crate::error::{SpatialError, SpatialResult};
use crate::map::Map;
use crate::registry::{self, CostFn, HeuristicFn};
use crate::route::Route;

/// Epsilon below which two key components (or key vectors) are treated as
/// equal — float accumulation over many replans would otherwise make the
/// lexicographic order jitter.
const KEY_EPSILON: f64 = 1e-6;

// ── DStarKey ────────────────────────────────────────────────────────────────

/// A D* Lite priority: `(k1, k2) = (min(g,rhs) + h(start,s) + km, min(g,rhs))`.
///
/// Ordered lexicographically on `(k1, k2)` with [`KEY_EPSILON`]-tolerant
/// equality, matching the reference implementation.
#[derive(Copy, Clone, Debug)]
pub struct DStarKey(pub f64, pub f64);

impl DStarKey {
    pub const INFINITE: DStarKey = DStarKey(f64::INFINITY, f64::INFINITY);

    fn cmp_component(a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= KEY_EPSILON {
            Ordering::Equal
        } else {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
    }
}

impl PartialEq for DStarKey {
    fn eq(&self, other: &Self) -> bool {
        Self::cmp_component(self.0, other.0) == Ordering::Equal
            && Self::cmp_component(self.1, other.1) == Ordering::Equal
    }
}

impl PartialOrd for DStarKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(match Self::cmp_component(self.0, other.0) {
            Ordering::Equal => Self::cmp_component(self.1, other.1),
            ord => ord,
        })
    }
}

// ── DStarPq ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct HeapEntry {
    key: DStarKey,
    coord: Coord,
}

/// The D* Lite frontier: a priority queue over [`Coord`] keyed by
/// [`DStarKey`], with the invariant that **at most one entry exists per
/// coordinate** — pushing a coordinate that is already present first removes
/// its stale entry.
///
/// Implemented as lazy deletion over a plain binary heap plus a coord→key
/// side index: `contains`/`remove` consult the side index in O(1)/O(log n),
/// the heap itself is only ever scanned on `pop`/`peek`, where stale entries
/// (whose heap key no longer matches the side index) are skipped.
#[derive(Default)]
pub struct DStarPq {
    heap: Vec<HeapEntry>,
    index: CoordHash<DStarKey>,
}

impl DStarPq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index.contains(coord)
    }

    /// The key last pushed for `coord`, if it is still in the frontier.
    pub fn key_of(&self, coord: Coord) -> Option<DStarKey> {
        self.index.get(coord).copied()
    }

    /// Push `coord` at `key`. If `coord` is already present, its old entry is
    /// removed first — enforcing the single-entry-per-coord invariant.
    pub fn push(&mut self, key: DStarKey, coord: Coord) {
        self.index.set(coord, key);
        self.heap.push(HeapEntry { key, coord });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove `coord` from the frontier entirely (lazy: the side index entry
    /// is dropped immediately, the heap entry is skipped lazily on pop).
    pub fn remove(&mut self, coord: Coord) -> Option<DStarKey> {
        self.index.remove(coord)
    }

    /// The lowest key currently in the frontier, or [`DStarKey::INFINITE`]
    /// if empty (per the reference's "top key of an empty queue" sentinel).
    pub fn top_key(&mut self) -> DStarKey {
        self.peek().map(|(k, _)| k).unwrap_or(DStarKey::INFINITE)
    }

    /// The lowest-keyed live entry without removing it.
    pub fn peek(&mut self) -> Option<(DStarKey, Coord)> {
        self.drop_stale_top();
        self.heap.first().map(|e| (e.key, e.coord))
    }

    /// Remove and return the lowest-keyed live entry.
    pub fn pop(&mut self) -> Option<(DStarKey, Coord)> {
        self.drop_stale_top();
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.index.remove(top.coord);
        Some((top.key, top.coord))
    }

    fn is_stale(&self, entry: &HeapEntry) -> bool {
        self.index.get(entry.coord) != Some(&entry.key)
    }

    /// Discard heap-top entries whose side-index entry has since been
    /// removed or superseded by a newer push for the same coord.
    fn drop_stale_top(&mut self) {
        while let Some(top) = self.heap.first() {
            if self.is_stale(top) {
                let last = self.heap.len() - 1;
                self.heap.swap(0, last);
                self.heap.pop();
                if !self.heap.is_empty() {
                    self.sift_down(0);
                }
            } else {
                break;
            }
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].key.partial_cmp(&self.heap[parent].key) == Some(Ordering::Less) {
                self.heap.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let (l, r) = (2 * i + 1, 2 * i + 2);
            let mut smallest = i;
            if l < len && self.heap[l].key.partial_cmp(&self.heap[smallest].key) == Some(Ordering::Less) {
                smallest = l;
            }
            if r < len && self.heap[r].key.partial_cmp(&self.heap[smallest].key) == Some(Ordering::Less) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}

// ── Cancellation handle ────────────────────────────────────────────────────

/// A cheaply-cloned latch for cancelling a running [`DStarLite::find_loop`]
/// from another thread.
///
/// Setting the latch does not interrupt a mid-iteration
/// `compute_shortest_path` call — per spec, cancellation is checked only at
/// the outer loop boundary of `find_loop`.
#[derive(Clone, Default)]
pub struct ForceQuit(Arc<AtomicBool>);

impl ForceQuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, AtomicOrdering::Relaxed);
    }
}

// ── DStarLite ─────────────────────────────────────────────────────────────────

/// Tunables separated from the hot per-vertex state so [`DStarLite::reset`]
/// can clear the latter while keeping the former.
#[derive(Clone, Debug)]
pub struct DStarTunables {
    /// Range swept by [`DStarLite::update_vertex_auto_range`] around a
    /// changed coordinate.
    pub max_range: u32,
    /// Step interval used to derive the `find_loop` sleep, in milliseconds.
    pub interval_msec: u64,
    /// Cap on `find_loop` iterations.
    pub real_loop_max_retry: u64,
    /// Cap on `compute_shortest_path` iterations.
    pub compute_max_retry: u64,
    /// Cap on `reconstruct_route` iterations.
    pub reconstruct_max_retry: u64,
}

impl Default for DStarTunables {
    fn default() -> Self {
        Self {
            max_range: 3,
            interval_msec: 50,
            real_loop_max_retry: 100_000,
            compute_max_retry: 200_000,
            reconstruct_max_retry: 10_000,
        }
    }
}

/// The incremental replanning engine.
///
/// One instance is owned per agent. `start`/`goal` are mutated in place as
/// the agent moves (`find_loop`) rather than requiring a fresh planner per
/// step — that is the entire point of keeping `g`/`rhs` around between
/// calls.
pub struct DStarLite {
    pub start: Coord,
    pub goal: Coord,
    km: f64,
    g: CoordHash<f64>,
    rhs: CoordHash<f64>,
    frontier: DStarPq,
    cost_fn: CostFn,
    heuristic_fn: HeuristicFn,
    pub tunables: DStarTunables,
    pub force_quit: ForceQuit,
    /// The route produced by the last [`DStarLite::find`] call.
    pub proto_route: Route,
    /// The trace of cells actually walked by the last [`DStarLite::find_loop`].
    pub real_route: Vec<Coord>,
}

impl DStarLite {
    pub fn new(
        start: Coord,
        goal: Coord,
        cost_name: &str,
        heuristic_name: &str,
    ) -> SpatialResult<Self> {
        let cost_fn = registry::cost_fn(cost_name)
            .ok_or_else(|| SpatialError::UnknownFunction(cost_name.to_string()))?;
        let heuristic_fn = registry::heuristic_fn(heuristic_name)
            .ok_or_else(|| SpatialError::UnknownFunction(heuristic_name.to_string()))?;
        Ok(Self {
            start,
            goal,
            km: 0.0,
            g: CoordHash::new(),
            rhs: CoordHash::new(),
            frontier: DStarPq::new(),
            cost_fn,
            heuristic_fn,
            tunables: DStarTunables::default(),
            force_quit: ForceQuit::new(),
            proto_route: Route::failed(),
            real_route: Vec::new(),
        })
    }

    fn g_of(&self, s: Coord) -> f64 {
        self.g.get(s).copied().unwrap_or(f64::INFINITY)
    }

    fn rhs_of(&self, s: Coord) -> f64 {
        self.rhs.get(s).copied().unwrap_or(f64::INFINITY)
    }

    /// `key(s) = (min(g,rhs) + h(start,s) + km, min(g,rhs))`.
    pub fn key(&self, s: Coord) -> DStarKey {
        let m = self.g_of(s).min(self.rhs_of(s));
        let k1 = if m.is_finite() {
            m + (self.heuristic_fn)(self.start, s) + self.km
        } else {
            f64::INFINITY
        };
        DStarKey(k1, m)
    }

    /// Successors of `u` under the map's connectivity — identical to
    /// predecessors since grid adjacency here is symmetric (an edge exists
    /// whenever the *destination* cell is passable, regardless of the
    /// source's own blocked status).
    fn successors(&self, map: &Map, u: Coord) -> Vec<Coord> {
        map.neighbours(u)
    }

    /// Clear all per-vertex state and seed the frontier from `goal`.
    pub fn init(&mut self) {
        self.g.clear();
        self.rhs.clear();
        self.frontier = DStarPq::new();
        self.rhs.set(self.goal, 0.0);
        self.frontier.push(self.key(self.goal), self.goal);
    }

    /// Recompute `rhs(u)` from its successors and re-file it in the frontier
    /// if `g`/`rhs` still disagree.
    pub fn update_vertex(&mut self, map: &Map, u: Coord) {
        if u != self.goal {
            let best = self
                .successors(map, u)
                .into_iter()
                .map(|s| (self.cost_fn)(u, s) + self.g_of(s))
                .fold(f64::INFINITY, f64::min);
            self.rhs.set(u, best);
        }
        self.frontier.remove(u);
        if (self.g_of(u) - self.rhs_of(u)).abs() > KEY_EPSILON {
            self.frontier.push(self.key(u), u);
        }
    }

    /// `update_vertex` applied to every cell within `radius` of `center`
    /// (inclusive of `center` itself).
    pub fn update_vertex_range(&mut self, map: &Map, center: Coord, radius: u32) {
        self.update_vertex(map, center);
        for c in map.neighbours_range(center, radius) {
            self.update_vertex(map, c);
        }
    }

    /// [`DStarLite::update_vertex_range`] using `self.tunables.max_range`.
    pub fn update_vertex_auto_range(&mut self, map: &Map, center: Coord) {
        let r = self.tunables.max_range;
        self.update_vertex_range(map, center, r);
    }

    /// Drain the frontier until the start vertex is locally consistent (or
    /// the retry cap is hit). Returns `true` on success.
    pub fn compute_shortest_path(&mut self, map: &Map) -> bool {
        let mut iterations = 0u64;
        loop {
            let top_key = self.frontier.top_key();
            let start_key = self.key(self.start);
            if self.frontier.is_empty()
                || (top_key.partial_cmp(&start_key) != Some(Ordering::Less)
                    && (self.rhs_of(self.start) - self.g_of(self.start)).abs() <= KEY_EPSILON)
            {
                return true;
            }
            if iterations >= self.tunables.compute_max_retry {
                return false;
            }
            iterations += 1;

            let (k_old, u) = self.frontier.peek().expect("frontier non-empty checked above");
            let k_new = self.key(u);

            if k_old.partial_cmp(&k_new) == Some(Ordering::Less) {
                self.frontier.remove(u);
                self.frontier.push(k_new, u);
                continue;
            }

            if self.g_of(u) > self.rhs_of(u) {
                self.g.set(u, self.rhs_of(u));
                self.frontier.pop();
                for p in self.successors(map, u) {
                    self.update_vertex(map, p);
                }
            } else {
                self.g.set(u, f64::INFINITY);
                let mut to_update = self.successors(map, u);
                to_update.push(u);
                for p in to_update {
                    self.update_vertex(map, p);
                }
            }
        }
    }

    /// Walk `start → goal` by repeatedly taking the successor minimising
    /// `cost + g`, the way an agent commits to its next step.
    pub fn reconstruct_route(&self, map: &Map) -> SpatialResult<Route> {
        if self.rhs_of(self.start).is_infinite() {
            return Ok(Route::failed());
        }
        let mut path = vec![self.start];
        let mut cur = self.start;
        let mut cost = 0.0;
        let mut iterations = 0u64;

        while cur != self.goal {
            if iterations >= self.tunables.reconstruct_max_retry {
                return Err(SpatialError::ReconstructFailed(cur));
            }
            iterations += 1;

            let mut best: Option<(Coord, f64)> = None;
            for s in self.successors(map, cur) {
                let step = (self.cost_fn)(cur, s) + self.g_of(s);
                if step.is_finite() && best.is_none_or(|(_, b)| step < b) {
                    best = Some((s, step));
                }
            }
            let Some((next, _)) = best else {
                return Err(SpatialError::ReconstructFailed(cur));
            };
            cost += (self.cost_fn)(cur, next);
            cur = next;
            path.push(cur);
        }

        Ok(Route { path, cost, found: true })
    }

    /// `init` → `compute_shortest_path` → `reconstruct_route`, returning the
    /// route (or a failed one, never an `Err` — see crate error policy).
    /// The result is also stashed in `self.proto_route`.
    ///
    /// This is the cold-start entry point: it throws away any `g`/`rhs`
    /// state from a prior call. To actually replan incrementally after a
    /// local change, call [`DStarLite::update_vertex_range`] (or
    /// `_auto_range`) for the changed coordinates and then [`DStarLite::replan`]
    /// instead — that is the entire point of keeping this planner alive
    /// across ticks rather than constructing a fresh one.
    pub fn find(&mut self, map: &Map) -> Route {
        self.init();
        self.replan(map)
    }

    /// Resume planning from the current `g`/`rhs`/frontier state without an
    /// `init()` — the actual incremental half of D* Lite. Call this after
    /// [`DStarLite::advance_start`] and any `update_vertex*` calls for
    /// coordinates that changed since the last `find`/`replan`.
    pub fn replan(&mut self, map: &Map) -> Route {
        let route = if !self.compute_shortest_path(map) {
            Route::failed()
        } else {
            self.reconstruct_route(map).unwrap_or_else(|_| Route::failed())
        };
        self.proto_route = route.clone();
        route
    }

    /// Move the start vertex, bumping `km` by `h(old_start, new_start)` so
    /// every key already in the frontier stays valid without being
    /// recomputed — the mechanism that makes repeated replanning as an
    /// agent advances cheap. A no-op if `new_start == self.start`.
    pub fn advance_start(&mut self, new_start: Coord) {
        if new_start != self.start {
            self.km += (self.heuristic_fn)(self.start, new_start);
            self.start = new_start;
        }
    }

    /// Drive the agent from `start` to `goal` one step at a time, replanning
    /// whenever `changed_coords` reports dynamic obstacle changes.
    ///
    /// `move_fn(next)` is called once per committed step. `changed_coords`
    /// is polled after every step and should return the coordinates whose
    /// blocked status changed since the previous poll (empty most ticks).
    /// Cancellation via [`ForceQuit::signal`] is observed at the top of each
    /// iteration only, never mid-`compute_shortest_path`.
    pub fn find_loop(
        &mut self,
        map: &Map,
        mut move_fn: impl FnMut(Coord),
        mut changed_coords: impl FnMut() -> Vec<Coord>,
    ) -> SpatialResult<()> {
        self.real_route.clear();
        self.real_route.push(self.start);
        let mut last = self.start;
        let mut retry = 0u64;

        while self.start != self.goal {
            if self.force_quit.is_set() {
                return Err(SpatialError::Cancelled);
            }
            if retry >= self.tunables.real_loop_max_retry {
                return Err(SpatialError::PlannerExhausted);
            }
            retry += 1;

            if self.rhs_of(self.start).is_infinite() {
                return Err(SpatialError::RouteNotFound { from: self.start, to: self.goal });
            }

            let mut best: Option<(Coord, f64)> = None;
            for s in self.successors(map, self.start) {
                let step = (self.cost_fn)(self.start, s) + self.g_of(s);
                if step.is_finite() && best.is_none_or(|(_, b)| step < b) {
                    best = Some((s, step));
                }
            }
            let Some((next, _)) = best else {
                return Err(SpatialError::RouteNotFound { from: self.start, to: self.goal });
            };

            move_fn(next);
            self.start = next;
            std::thread::sleep(Duration::from_millis(self.tunables.interval_msec));

            let changed = changed_coords();
            if !changed.is_empty() {
                self.km += (self.heuristic_fn)(last, self.start);
                last = self.start;
                for c in &changed {
                    self.update_vertex_auto_range(map, *c);
                }
                self.compute_shortest_path(map);
            }
            self.real_route.push(self.start);
        }
        Ok(())
    }

    /// Clear per-vertex state while keeping `start`, `goal`, and `km` — used
    /// when an agent is reassigned without abandoning its spatial continuity.
    pub fn reset(&mut self) {
        self.g.clear();
        self.rhs.clear();
        self.frontier = DStarPq::new();
        self.proto_route = Route::failed();
        self.real_route.clear();
    }
}
