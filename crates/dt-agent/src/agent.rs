//! The per-NPC record: identity, goal queue, planner configuration, and
//! animation state.

use std::collections::VecDeque;

use dt_core::{AgentId, Coord, Terrain, TerrainSet};
use dt_spatial::{AlgorithmTag, FinderConfig, Route};

use crate::animator::AnimatorState;

/// A single NPC: where it is, where it wants to go, how it plans routes
/// there, and how it animates each step.
///
/// `Agent` owns no reference into the world — it is plain data. The engines
/// in `dt-schedule` read/write it through `&mut Agent` borrows obtained from
/// an [`crate::AgentRegistry`]; the `is_blocked` predicate an agent installs
/// on the map before planning is assembled by the world layer (which knows
/// about `Cell`/terrain), from this agent's `movable_terrain`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,

    /// Current authoritative cell. Updated only on step arrival, never
    /// during interpolation — `animator.disp_dx/dy` carries the visual lag.
    pub start: Coord,
    pub goal: Option<Coord>,
    pub goal_queue: VecDeque<Coord>,

    pub native_terrain: Terrain,
    pub movable_terrain: TerrainSet,

    pub algorithm: AlgorithmTag,
    pub finder_config: FinderConfig,
    /// `true` while a planning task for this agent is outstanding on the
    /// route-finder engine — guards against submitting a second one.
    pub planning_in_flight: bool,

    /// The route produced by the planner's last one-shot `find`.
    pub proto_route: Route,
    /// The trace of cells actually walked, if real-route logging is on.
    pub real_route: Option<Vec<Coord>>,
    /// Index into `proto_route.path` of the next cell to step toward.
    pub cur_index: usize,

    pub animator: AnimatorState,
}

impl Agent {
    pub fn new(id: AgentId, start: Coord) -> Self {
        Self {
            id,
            start,
            goal: None,
            goal_queue: VecDeque::new(),
            native_terrain: Terrain::Normal,
            movable_terrain: TerrainSet::native(),
            algorithm: AlgorithmTag::AStar,
            finder_config: FinderConfig::default(),
            planning_in_flight: false,
            proto_route: Route::failed(),
            real_route: None,
            cur_index: 0,
            animator: AnimatorState::default(),
        }
    }

    /// Enable real-route logging (an append-only trace of cells walked).
    pub fn enable_real_route_log(&mut self) {
        self.real_route.get_or_insert_with(Vec::new);
    }

    /// Replace the goal queue with a single destination.
    pub fn set_goal(&mut self, coord: Coord) {
        self.goal_queue.clear();
        self.goal_queue.push_back(coord);
        self.proto_route = Route::failed();
        self.cur_index = 0;
    }

    /// Append a destination to the goal queue without disturbing the
    /// current plan.
    pub fn append_goal(&mut self, coord: Coord) {
        self.goal_queue.push_back(coord);
    }

    /// `true` if this agent has somewhere left to go: an active goal, or a
    /// queued one waiting to become active.
    pub fn has_pending_goal(&self) -> bool {
        self.goal.is_some() || !self.goal_queue.is_empty()
    }

    /// Pop the next destination off the queue and make it the active goal.
    pub fn advance_goal_queue(&mut self) -> Option<Coord> {
        let next = self.goal_queue.pop_front();
        if next.is_some() {
            self.goal = next;
            self.cur_index = 0;
        }
        next
    }

    /// `true` once the agent has stepped through the whole proto route.
    pub fn reached_goal(&self) -> bool {
        self.proto_route.found && self.cur_index + 1 >= self.proto_route.path.len()
    }

    /// The next cell to step toward, if any remain in the proto route.
    pub fn next_step(&self) -> Option<Coord> {
        self.proto_route.path.get(self.cur_index + 1).copied()
    }

    /// Commit arrival at the next step: advance the index and authoritative
    /// position. Returns the new position.
    pub fn commit_step(&mut self) -> Option<Coord> {
        let next = self.next_step()?;
        self.cur_index += 1;
        self.start = next;
        if let Some(log) = self.real_route.as_mut() {
            log.push(next);
        }
        Some(next)
    }
}
