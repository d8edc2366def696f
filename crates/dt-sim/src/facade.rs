//! The world facade: the single point of contact a host UI drives —
//! commands, queries, events, and the tick loop — sitting on top of the
//! block cache, loader, agent registry, and the two `dt-schedule` engines.
//!
//! The facade is the only place that owns `&mut` access to world state;
//! the engines it drives only ever see owned snapshots (`Arc<Map>`, a
//! cloned `AnimatorState`) handed to them from here, never a live
//! reference into `registry` or `cache`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rustc_hash::{FxHashMap, FxHashSet};

use dt_agent::{Agent, AgentRegistry};
use dt_behavior::RouteChangeDetector;
use dt_core::{AgentId, Coord, Rect, SimClock, SimRng, Terrain, TerrainSet};
use dt_mobility::TickOutcome;
use dt_schedule::{AnimatorEngine, FinderEngine, FinderJob};
use dt_spatial::{BlockedPredicate, DStarLite, FinderConfig, Map};

use crate::block::{origin_of, Block, MakeCell};
use crate::cache::BlockCache;
use crate::cell::{Cell, CellFlags};
use crate::config::WorldConfig;
use crate::event::WorldEvent;
use crate::loader::{BlockFactory, LoadResult, Loader};

/// What a UI click currently means; set via `World::set_click_mode`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickMode {
    SelectAgent,
    SpawnAgentAt,
    DespawnAgentAt,
    Obstacle,
}

/// A spawn waiting on its target block to become resident before it can be
/// placed, or an agent detached by a prior eviction waiting to be placed
/// back once its block reloads.
enum SpawnJob {
    Fresh { id: AgentId, start: Coord },
    Reattach(Box<Agent>),
}

fn spawn_job_id(job: &SpawnJob) -> &AgentId {
    match job {
        SpawnJob::Fresh { id, .. } => id,
        SpawnJob::Reattach(agent) => &agent.id,
    }
}

#[derive(Clone)]
enum DespawnReason {
    /// Requested directly through [`World::despawn_agent`] — the agent is
    /// deleted outright when this drains.
    Explicit,
    /// Cascaded from the block-evict→despawn pipeline — the agent is only
    /// detached, and stashed under `origin` so it comes back with all of
    /// its state intact if the block reloads.
    BlockEvicted { origin: Coord },
}

struct PendingDespawn {
    id: AgentId,
    reason: DespawnReason,
}

/// The block-paged grid world: block cache + loader + agent registry + the
/// two worker-pool engines, wired together behind a command/query/event
/// surface.
pub struct World {
    config: WorldConfig,
    cache: BlockCache,
    loader: Loader,
    block_factory: BlockFactory,
    registry: AgentRegistry,
    finder_engine: FinderEngine,
    animator_engine: AnimatorEngine,
    route_change: RouteChangeDetector,
    planners: FxHashMap<AgentId, Arc<Mutex<DStarLite>>>,
    clock: SimClock,

    viewport_center: Coord,
    click_mode: ClickMode,
    selected_agent: Option<AgentId>,
    tick_interval_msec: u64,

    pending_spawns: FxHashMap<Coord, Vec<(AgentId, Coord)>>,
    dormant: FxHashMap<Coord, Vec<Agent>>,
    spawn_queue: VecDeque<SpawnJob>,
    despawn_queue: VecDeque<PendingDespawn>,
    evict_sink: Arc<Mutex<VecDeque<(Coord, Vec<AgentId>)>>>,
    animating_in_flight: FxHashSet<AgentId>,

    /// Coordinates that changed since the last tick's planning pass — drives
    /// incremental `update_vertex_auto_range` calls on every live `DStarLite`.
    changed_coords: Vec<Coord>,
    events: VecDeque<WorldEvent>,
}

impl World {
    /// Construct a world whose blocks are materialised by `make_cell`.
    pub fn new(config: WorldConfig, make_cell: MakeCell) -> Self {
        let block_factory = make_block_factory(make_cell);
        let evict_sink: Arc<Mutex<VecDeque<(Coord, Vec<AgentId>)>>> =
            Arc::new(Mutex::new(VecDeque::new()));

        let mut cache = BlockCache::new(config.max_blocks);
        let sink = Arc::clone(&evict_sink);
        cache.set_before_evict(Box::new(move |origin, block| {
            let ids: Vec<AgentId> = block.cells().flat_map(|c| c.agent_ids.clone()).collect();
            sink.lock().expect("evict sink mutex poisoned").push_back((origin, ids));
        }));

        let workers = config.max_parallel_loaders.max(1);
        Self {
            loader: Loader::new(workers),
            finder_engine: FinderEngine::new(workers),
            animator_engine: AnimatorEngine::new(workers),
            block_factory,
            cache,
            registry: AgentRegistry::new(),
            route_change: RouteChangeDetector::new(config.route_change_history),
            planners: FxHashMap::default(),
            clock: SimClock::new(),
            viewport_center: Coord::ZERO,
            click_mode: ClickMode::SelectAgent,
            selected_agent: None,
            tick_interval_msec: 16,
            pending_spawns: FxHashMap::default(),
            dormant: FxHashMap::default(),
            spawn_queue: VecDeque::new(),
            despawn_queue: VecDeque::new(),
            evict_sink,
            animating_in_flight: FxHashSet::default(),
            changed_coords: Vec::new(),
            events: VecDeque::new(),
            config,
        }
    }

    /// A world whose blocks are generated by the bundled default terrain
    /// factory, seeded from `config.rng_seed` — see [`default_make_cell`].
    pub fn with_default_terrain(config: WorldConfig) -> Self {
        let seed = config.rng_seed;
        Self::new(config, default_make_cell(seed))
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Shut down both engines and the loader, joining their worker threads.
    pub fn shutdown(self) {
        self.finder_engine.shutdown();
        self.animator_engine.shutdown();
        self.loader.shutdown();
    }

    // ── Commands: agent lifecycle ──────────────────────────────────────────

    /// Idempotent on `id`: spawning an id that is already attached is a
    /// no-op, except that it cancels a pending eviction-triggered despawn
    /// for that id (so a viewport flicker can't both detach and re-request
    /// the same agent in the same tick).
    pub fn spawn_agent(&mut self, id: AgentId, coord: Coord) {
        self.cancel_pending_despawn(&id);
        if self.registry.contains(&id) {
            return;
        }
        let origin = origin_of(coord, self.config.block_size);
        if self.cache.contains(origin) {
            self.attach_fresh(id, coord);
        } else {
            self.pending_spawns.entry(origin).or_default().push((id, coord));
            self.ensure_block_loaded(origin);
        }
    }

    /// Queue `id` for removal. Idempotent: despawning an id with no live
    /// agent, or one already queued, is a no-op beyond the queue entry.
    pub fn despawn_agent(&mut self, id: AgentId) {
        if self.registry.contains(&id) {
            self.despawn_queue.push_back(PendingDespawn { id, reason: DespawnReason::Explicit });
        }
    }

    pub fn select_agent(&mut self, id: AgentId) {
        if self.registry.contains(&id) {
            self.selected_agent = Some(id.clone());
            self.events.push_back(WorldEvent::AgentSelected(id));
        }
    }

    // ── Commands: goals ─────────────────────────────────────────────────────

    pub fn set_goal(&mut self, agent_id: &AgentId, coord: Coord) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.flags.insert(CellFlags::GOAL);
        }
        if let Some(agent) = self.registry.get_mut(agent_id) {
            agent.set_goal(coord);
            agent.advance_goal_queue();
        }
    }

    pub fn append_goal(&mut self, agent_id: &AgentId, coord: Coord) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.flags.insert(CellFlags::GOAL);
        }
        let Some(agent) = self.registry.get_mut(agent_id) else { return };
        agent.append_goal(coord);
        if agent.goal.is_none() {
            agent.advance_goal_queue();
        }
    }

    // ── Commands: obstacles ─────────────────────────────────────────────────

    /// Make `coord` impassable for `agent_id`: switch its terrain to one
    /// outside the agent's movable set, preferring `Mountain`, falling back
    /// to `Forbidden` if the agent tolerates every other tag.
    pub fn set_obstacle(&mut self, coord: Coord, agent_id: &AgentId) {
        let Some(agent) = self.registry.get(agent_id) else { return };
        let movable = agent.movable_terrain;
        let blocking = if !movable.allows(Terrain::Mountain) {
            Terrain::Mountain
        } else if movable == TerrainSet::all_passable() {
            Terrain::Forbidden
        } else {
            [Terrain::Water, Terrain::Forest, Terrain::Normal]
                .into_iter()
                .find(|t| !movable.allows(*t))
                .unwrap_or(Terrain::Forbidden)
        };
        if let Some(cell) = self.cell_mut(coord) {
            cell.terrain = blocking;
        }
        self.record_changed(coord);
    }

    /// Revert `coord` to `agent_id`'s native terrain.
    pub fn remove_obstacle(&mut self, coord: Coord, agent_id: &AgentId) {
        let Some(agent) = self.registry.get(agent_id) else { return };
        let native = agent.native_terrain;
        if let Some(cell) = self.cell_mut(coord) {
            cell.terrain = native;
        }
        self.record_changed(coord);
    }

    pub fn toggle_obstacle(&mut self, coord: Coord, agent_id: &AgentId) {
        let Some(agent) = self.registry.get(agent_id) else { return };
        let blocked_for_agent = self
            .cell(coord)
            .is_some_and(|c| c.is_forbidden() || !agent.movable_terrain.allows(c.terrain));
        if blocked_for_agent {
            self.remove_obstacle(coord, agent_id);
        } else {
            self.set_obstacle(coord, agent_id);
        }
    }

    // ── Commands: viewport / UI state ───────────────────────────────────────

    pub fn set_click_mode(&mut self, mode: ClickMode) {
        self.click_mode = mode;
    }

    pub fn click_mode(&self) -> ClickMode {
        self.click_mode
    }

    pub fn set_tick_interval_msec(&mut self, n: u64) {
        self.tick_interval_msec = n;
    }

    pub fn tick_interval_msec(&self) -> u64 {
        self.tick_interval_msec
    }

    /// Move the viewport centre by `(dx, dy) * distance`, then let the
    /// route-change detector decide between halo loading and forward
    /// prefetch along the new heading.
    pub fn move_viewport(&mut self, dx: i32, dy: i32, distance: i32) {
        let distance = distance.max(1);
        let from = self.viewport_center;
        let to = Coord::new(from.x + dx * distance, from.y + dy * distance);
        self.viewport_center = to;
        self.events.push_back(WorldEvent::ViewportChanged(to));
        self.apply_prefetch(from, to);
    }

    /// An absolute jump: always halo-loads around the new centre (no
    /// forward-prefetch heading to speak of) and resets the detector's
    /// history, since a teleport isn't part of any continuous trajectory.
    pub fn set_viewport_center(&mut self, x: i32, y: i32) {
        let to = Coord::new(x, y);
        self.viewport_center = to;
        self.route_change.clear();
        self.events.push_back(WorldEvent::ViewportChanged(to));
        let rect = Rect::centered(to, self.config.prefetch_distance);
        self.load_blocks_around_rect(rect, 0, 0);
    }

    fn apply_prefetch(&mut self, from: Coord, to: Coord) {
        let turned = self.route_change.has_changed(from, to, self.config.route_change_threshold_deg);
        if turned || !self.route_change.is_warm() {
            let rect = Rect::centered(to, self.config.prefetch_distance);
            self.load_blocks_around_rect(rect, 0, 0);
        } else {
            let dx = (to.x - from.x).signum();
            let dy = (to.y - from.y).signum();
            let rect = Rect::centered(to, self.config.prefetch_distance);
            self.load_blocks_forward_for_rect(rect, dx, dy, self.config.prefetch_distance);
        }
    }

    // ── Block-paged queries ─────────────────────────────────────────────────

    /// Origin keys of every block whose footprint intersects `rect`.
    pub fn blocks_for_rect(&self, rect: Rect) -> Vec<Coord> {
        if rect.w == 0 || rect.h == 0 {
            return Vec::new();
        }
        let b = self.config.block_size;
        let step = b as i32;
        let x0 = origin_of(Coord::new(rect.x, rect.y), b).x;
        let y0 = origin_of(Coord::new(rect.x, rect.y), b).y;
        let x1 = origin_of(Coord::new(rect.x + rect.w as i32 - 1, rect.y), b).x;
        let y1 = origin_of(Coord::new(rect.x, rect.y + rect.h as i32 - 1), b).y;

        let mut out = Vec::new();
        let mut y = y0;
        while y <= y1 {
            let mut x = x0;
            while x <= x1 {
                out.push(Coord::new(x, y));
                x += step;
            }
            y += step;
        }
        out
    }

    pub fn is_rect_loaded(&self, rect: Rect) -> bool {
        self.blocks_for_rect(rect).into_iter().all(|k| self.cache.contains(k))
    }

    /// Queue every not-yet-resident block in `rect`, expanded by
    /// `expand + offset` cells on every side.
    pub fn load_blocks_around_rect(&self, rect: Rect, expand: u32, offset: u32) {
        let expanded = rect.expanded(expand + offset);
        for key in self.blocks_for_rect(expanded) {
            self.ensure_block_loaded(key);
        }
    }

    /// Queue the motion-predictive halo ahead of `rect` along `(dx, dy)`:
    /// for each of `rect`'s blocks, and each step `1..=distance` along the
    /// heading, queue the ±1-block sliver around that anchor — three cells
    /// for an axis-aligned heading, the four-cell corner pattern (straight,
    /// back-x, back-y, back-xy) for a diagonal one. Never loads the full
    /// halo, only the cells a continued straight-line move would reach.
    pub fn load_blocks_forward_for_rect(&self, rect: Rect, dx: i32, dy: i32, distance: u32) {
        for key in self.forward_keys_for_rect(rect, dx, dy, distance) {
            self.ensure_block_loaded(key);
        }
    }

    pub fn is_blocks_loaded_forward_for_rect(&self, rect: Rect, dx: i32, dy: i32, distance: u32) -> bool {
        self.forward_keys_for_rect(rect, dx, dy, distance)
            .into_iter()
            .all(|k| self.cache.contains(k))
    }

    fn forward_keys_for_rect(&self, rect: Rect, dx: i32, dy: i32, distance: u32) -> Vec<Coord> {
        let dx = dx.signum();
        let dy = dy.signum();
        let b = self.config.block_size as i32;
        let mut out = Vec::new();
        for base in self.blocks_for_rect(rect) {
            for i in 1..=distance as i32 {
                let anchor = Coord::new(base.x + dx * i * b, base.y + dy * i * b);
                let offsets: &[(i32, i32)] = if dx != 0 && dy != 0 {
                    &[(0, 0), (-1, 0), (0, -1), (-1, -1)]
                } else if dx != 0 {
                    &[(0, 0), (0, -1), (0, 1)]
                } else if dy != 0 {
                    &[(0, 0), (-1, 0), (1, 0)]
                } else {
                    &[]
                };
                for &(ox, oy) in offsets {
                    let sign_x = if dx != 0 { dx } else { 1 };
                    let sign_y = if dy != 0 { dy } else { 1 };
                    out.push(Coord::new(anchor.x + ox * sign_x * b, anchor.y + oy * sign_y * b));
                }
            }
        }
        out.sort();
        out.dedup();
        out
    }

    fn ensure_block_loaded(&self, origin: Coord) {
        if !self.cache.contains(origin) && !self.loader.is_loading(origin) {
            self.loader.queue(origin, self.config.block_size, Arc::clone(&self.block_factory));
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn cells_in_rect(&self, rect: Rect) -> Vec<(Coord, Cell)> {
        rect.coords().filter_map(|c| self.cell(c).map(|cell| (c, cell.clone()))).collect()
    }

    pub fn agents_in_rect(&self, rect: Rect) -> Vec<Agent> {
        self.registry.iter().filter(|(_, a)| rect.contains(a.start)).map(|(_, a)| a.clone()).collect()
    }

    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.registry.get(id)
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selected_agent.as_ref().and_then(|id| self.registry.get(id))
    }

    pub fn block_count(&self) -> usize {
        self.cache.len()
    }

    pub fn agent_count(&self) -> usize {
        self.registry.len()
    }

    /// Best-effort: resident cells' in-memory footprint plus the agent
    /// table's. Not a precise allocator accounting.
    pub fn memory_usage(&self) -> usize {
        let cell_size = std::mem::size_of::<Cell>();
        let cells_per_block = (self.config.block_size as usize).pow(2);
        self.cache.len() * cells_per_block * cell_size + self.registry.len() * std::mem::size_of::<Agent>()
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        self.events.drain(..).collect()
    }

    fn cell(&self, c: Coord) -> Option<&Cell> {
        let origin = origin_of(c, self.config.block_size);
        self.cache.get(origin).and_then(|b| b.get(c))
    }

    fn cell_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        let origin = origin_of(c, self.config.block_size);
        self.cache.get_mut(origin).and_then(|b| b.get_mut(c))
    }

    fn record_changed(&mut self, coord: Coord) {
        if !self.changed_coords.contains(&coord) {
            self.changed_coords.push(coord);
        }
    }

    fn cancel_pending_despawn(&mut self, id: &AgentId) {
        self.despawn_queue.retain(|d| &d.id != id);
    }

    fn attach_fresh(&mut self, id: AgentId, coord: Coord) {
        let mut agent = self.registry.create(id.clone(), coord);
        agent.algorithm = self.config.default_algorithm;
        agent.finder_config.cost_fn = self.config.default_cost_fn.clone();
        agent.finder_config.heuristic_fn = self.config.default_heuristic_fn.clone();
        if self.registry.attach(agent).is_ok() {
            if let Some(cell) = self.cell_mut(coord) {
                cell.add_agent(id.clone());
                cell.flags.insert(CellFlags::START);
            }
            self.events.push_back(WorldEvent::AgentCreated(id));
        }
    }

    fn attach_dormant(&mut self, agent: Agent) {
        let id = agent.id.clone();
        let coord = agent.start;
        if self.registry.attach(agent).is_ok() {
            if let Some(cell) = self.cell_mut(coord) {
                cell.add_agent(id.clone());
                cell.flags.insert(CellFlags::START);
            }
            self.events.push_back(WorldEvent::AgentCreated(id));
        }
    }

    fn detach_from_cell(&mut self, agent: &Agent) {
        if let Some(cell) = self.cell_mut(agent.start) {
            cell.remove_agent(&agent.id);
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advance the simulation by `dt_seconds`: apply cascaded block-load/
    /// evict pipelines, then run every agent's per-tick contract (submit
    /// planning, start/advance animators, commit arrivals).
    pub fn tick(&mut self, dt_seconds: f64) {
        self.clock.advance(dt_seconds);

        self.drain_loader();
        self.drain_evictions();
        self.drain_spawn_queue();
        self.drain_despawn_queue();

        self.apply_finder_results();
        self.submit_planning_requests();
        self.start_idle_animators();
        self.submit_animator_ticks(dt_seconds);
        self.apply_animator_results();

        self.changed_coords.clear();
        self.events.push_back(WorldEvent::TickElapsedMs(dt_seconds * 1000.0));
    }

    fn drain_loader(&mut self) {
        for result in self.loader.drain() {
            match result {
                LoadResult::Loaded(key, block) => {
                    self.cache.insert(key, block);
                    self.events.push_back(WorldEvent::BlockLoaded(key));
                    if let Some(pending) = self.pending_spawns.remove(&key) {
                        for (id, start) in pending {
                            self.spawn_queue.push_back(SpawnJob::Fresh { id, start });
                        }
                    }
                    if let Some(agents) = self.dormant.remove(&key) {
                        for agent in agents {
                            self.spawn_queue.push_back(SpawnJob::Reattach(Box::new(agent)));
                        }
                    }
                }
                LoadResult::Failed(key, reason) => {
                    tracing::warn!(x = key.x, y = key.y, %reason, "block load failed");
                }
            }
        }
    }

    fn drain_evictions(&mut self) {
        let evicted: Vec<(Coord, Vec<AgentId>)> = {
            let mut sink = self.evict_sink.lock().expect("evict sink mutex poisoned");
            sink.drain(..).collect()
        };
        for (origin, ids) in evicted {
            self.events.push_back(WorldEvent::BlockEvicted(origin));
            for id in ids {
                self.spawn_queue.retain(|job| spawn_job_id(job) != &id);
                self.despawn_queue.push_back(PendingDespawn { id, reason: DespawnReason::BlockEvicted { origin } });
            }
        }
    }

    fn drain_spawn_queue(&mut self) {
        for _ in 0..self.config.spawn_batch_size {
            let Some(job) = self.spawn_queue.pop_front() else { break };
            match job {
                SpawnJob::Fresh { id, start } => {
                    self.cancel_pending_despawn(&id);
                    self.attach_fresh(id, start);
                }
                SpawnJob::Reattach(agent) => {
                    self.cancel_pending_despawn(&agent.id);
                    self.attach_dormant(*agent);
                }
            }
        }
    }

    fn drain_despawn_queue(&mut self) {
        for _ in 0..self.config.despawn_batch_size {
            let Some(pending) = self.despawn_queue.pop_front() else { break };
            match pending.reason {
                DespawnReason::Explicit => {
                    if let Some(agent) = self.registry.delete(&pending.id) {
                        self.detach_from_cell(&agent);
                        self.planners.remove(&pending.id);
                        if self.selected_agent.as_ref() == Some(&pending.id) {
                            self.selected_agent = None;
                        }
                        self.events.push_back(WorldEvent::AgentDeleted(pending.id));
                    }
                }
                DespawnReason::BlockEvicted { origin } => {
                    if let Some(agent) = self.registry.detach(&pending.id) {
                        self.detach_from_cell(&agent);
                        self.planners.remove(&pending.id);
                        self.events.push_back(WorldEvent::AgentDeleted(pending.id.clone()));
                        self.dormant.entry(origin).or_default().push(agent);
                    }
                }
            }
        }
    }

    fn apply_finder_results(&mut self) {
        for (id, route) in self.finder_engine.drain() {
            if let Some(agent) = self.registry.get_mut(&id) {
                agent.proto_route = route;
                agent.cur_index = 0;
                agent.planning_in_flight = false;
            }
        }
    }

    fn submit_planning_requests(&mut self) {
        let ids: Vec<AgentId> = self.registry.ids().cloned().collect();
        for id in ids {
            self.advance_goal_if_idle(&id);
            self.submit_plan_if_needed(&id);
        }
    }

    fn advance_goal_if_idle(&mut self, id: &AgentId) {
        let Some(agent) = self.registry.get_mut(id) else { return };
        if agent.goal.is_some() && agent.reached_goal() && !agent.goal_queue.is_empty() {
            agent.goal = None;
        }
        if agent.goal.is_none() && !agent.goal_queue.is_empty() {
            agent.advance_goal_queue();
        }
    }

    /// Submit a planning task for `id` if it has a pending goal, isn't
    /// already at it, and doesn't already have a task outstanding.
    fn submit_plan_if_needed(&mut self, id: &AgentId) {
        let (goal, start, use_incremental, algorithm, finder_config) = {
            let Some(agent) = self.registry.get(id) else { return };
            if agent.planning_in_flight || agent.reached_goal() {
                return;
            }
            let Some(goal) = agent.goal else { return };
            (goal, agent.start, self.config.use_incremental_planner, agent.algorithm, agent.finder_config.clone())
        };

        let map = self.agent_map(id);

        if use_incremental {
            let planner = self.get_or_create_planner(id.clone(), start, goal);
            {
                let mut p = planner.lock().expect("D* Lite planner mutex poisoned");
                if p.goal != goal {
                    p.goal = goal;
                    p.init();
                }
                p.advance_start(start);
                for c in &self.changed_coords {
                    p.update_vertex_auto_range(&map, *c);
                }
            }
            if let Some(agent) = self.registry.get_mut(id) {
                agent.planning_in_flight = true;
            }
            if self.finder_engine.submit(id.clone(), FinderJob::Incremental { planner, map }).is_err() {
                if let Some(agent) = self.registry.get_mut(id) {
                    agent.planning_in_flight = false;
                }
            }
        } else {
            if let Some(agent) = self.registry.get_mut(id) {
                agent.planning_in_flight = true;
            }
            let config = FinderConfig { algorithm, ..finder_config };
            let job = FinderJob::Static { map, start, goal, config };
            if self.finder_engine.submit(id.clone(), job).is_err() {
                if let Some(agent) = self.registry.get_mut(id) {
                    agent.planning_in_flight = false;
                }
            }
        }
    }

    fn get_or_create_planner(&mut self, id: AgentId, start: Coord, goal: Coord) -> Arc<Mutex<DStarLite>> {
        if let Some(p) = self.planners.get(&id) {
            return Arc::clone(p);
        }
        let mut planner = DStarLite::new(start, goal, &self.config.default_cost_fn, &self.config.default_heuristic_fn)
            .unwrap_or_else(|_| {
                DStarLite::new(start, goal, "default", "euclidean")
                    .expect("bundled cost/heuristic names are always registered")
            });
        planner.init();
        let planner = Arc::new(Mutex::new(planner));
        self.planners.insert(id, Arc::clone(&planner));
        planner
    }

    /// Build a foreground coordinate-snapshot `Map` for `id`'s planning
    /// task: a fresh, unbounded `Map` whose `BlockedPredicate` closes over
    /// an `Arc<FxHashMap<Coord, bool>>` computed once, right now, over every
    /// currently resident cell — never a live view into `cache`, so no
    /// worker ever observes a half-applied obstacle toggle. Coordinates not
    /// yet loaded are treated
    /// as passable (optimistic — the agent will replan once they load and
    /// turn out otherwise).
    fn agent_map(&self, id: &AgentId) -> Arc<Map> {
        let movable = self.registry.get(id).map(|a| a.movable_terrain).unwrap_or_else(TerrainSet::native);
        let self_id = id.clone();

        let mut blocked: FxHashMap<Coord, bool> = FxHashMap::default();
        for origin in self.cache.keys() {
            if let Some(block) = self.cache.get(origin) {
                for cell in block.cells() {
                    let is_blocked =
                        cell.is_forbidden() || !movable.allows(cell.terrain) || cell.is_occupied_by_other(&self_id);
                    blocked.insert(cell.coord, is_blocked);
                }
            }
        }

        let snapshot = Arc::new(blocked);
        let mut map = Map::new(0, 0, self.config.neighbour_mode);
        let predicate: BlockedPredicate = Arc::new(move |c: Coord| snapshot.get(&c).copied().unwrap_or(false));
        map.set_blocked_predicate(Some(predicate));
        Arc::new(map)
    }

    fn start_idle_animators(&mut self) {
        let ids: Vec<AgentId> = self.registry.ids().cloned().collect();
        for id in ids {
            let Some(agent) = self.registry.get_mut(&id) else { continue };
            if agent.animator.is_running {
                continue;
            }
            let Some(next) = agent.next_step() else { continue };
            let cur = agent.start;
            let direction = ((next.x - cur.x) as f32, (next.y - cur.y) as f32);
            agent.animator.start(next, direction);
        }
    }

    fn submit_animator_ticks(&mut self, dt: f64) {
        let ids: Vec<AgentId> = self.registry.ids().cloned().collect();
        for id in ids {
            if self.animating_in_flight.contains(&id) {
                continue;
            }
            let Some(agent) = self.registry.get_mut(&id) else { continue };
            if !agent.animator.is_running {
                continue;
            }
            let state = agent.animator.clone();
            self.animating_in_flight.insert(id.clone());
            self.animator_engine.submit(id, state, dt);
        }
    }

    fn apply_animator_results(&mut self) {
        for outcome in self.animator_engine.drain() {
            self.animating_in_flight.remove(&outcome.agent_id);
            let Some(agent) = self.registry.get_mut(&outcome.agent_id) else { continue };
            agent.animator = outcome.state;
            if outcome.outcome == TickOutcome::Arrived {
                let old = agent.start;
                if let Some(new) = agent.commit_step() {
                    self.migrate_cell_membership(&outcome.agent_id, old, new);
                    self.changed_coords.push(old);
                    self.changed_coords.push(new);
                }
            }
        }
    }

    fn migrate_cell_membership(&mut self, id: &AgentId, old: Coord, new: Coord) {
        if let Some(cell) = self.cell_mut(old) {
            cell.remove_agent(id);
            cell.flags.remove(CellFlags::START);
        }
        if let Some(cell) = self.cell_mut(new) {
            cell.add_agent(id.clone());
            cell.flags.insert(CellFlags::START);
        }
    }
}

fn make_block_factory(make_cell: MakeCell) -> BlockFactory {
    Arc::new(move |origin, block_size| Ok(Block::load(origin, block_size, &make_cell)))
}

/// The bundled default terrain generator, grounded in
/// [`dt_core::rng::SimRng`]'s own doc comment ("default terrain generation
/// for freshly loaded blocks"). Stateless per call — a fresh `SimRng` seeded
/// from `world_seed` mixed with the coordinate's packed key — so it stays
/// safe to invoke concurrently from any loader worker thread, unlike a
/// shared `FnMut` closure would be.
pub fn default_make_cell(world_seed: u64) -> MakeCell {
    Arc::new(move |c: Coord| {
        let mixed = world_seed ^ c.pack().wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = SimRng::new(mixed);
        let mut cell = Cell::new(c);
        cell.terrain = match rng.gen_range(0u32..100) {
            0..=74 => Terrain::Normal,
            75..=84 => Terrain::Forest,
            85..=92 => Terrain::Water,
            93..=97 => Terrain::Mountain,
            _ => Terrain::Forbidden,
        };
        cell
    })
}
