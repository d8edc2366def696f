//! The world's id→agent table.
//!
//! `AgentId` is an opaque, externally-chosen string rather than a
//! recyclable array index, so this is a hash map keyed by `AgentId` rather
//! than a dense `u32`-indexed SoA array.

use rustc_hash::FxHashMap;

use dt_core::{AgentId, Coord};

use crate::agent::Agent;
use crate::error::{AgentError, AgentResult};

/// Live agent table. `create` just allocates the record; `attach` is what
/// makes it visible to lookups.
#[derive(Default)]
pub struct AgentRegistry {
    agents: FxHashMap<AgentId, Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh `Agent` record without inserting it.
    pub fn create(&self, id: AgentId, start: Coord) -> Agent {
        Agent::new(id, start)
    }

    /// Install `agent` into the registry. Errors if its id is already
    /// present — callers should `detach`/`delete` first if replacing.
    pub fn attach(&mut self, agent: Agent) -> AgentResult<()> {
        if self.agents.contains_key(&agent.id) {
            return Err(AgentError::AlreadyAttached(agent.id.clone()));
        }
        self.agents.insert(agent.id.clone(), agent);
        Ok(())
    }

    /// Remove `id` from the registry, returning the agent so the caller may
    /// re-attach it elsewhere (e.g. across a block reload).
    pub fn detach(&mut self, id: &AgentId) -> Option<Agent> {
        self.agents.remove(id)
    }

    /// Remove `id` permanently. Distinct from `detach` only in intent at
    /// this layer — the world layer additionally cancels outstanding
    /// planner work before calling this.
    pub fn delete(&mut self, id: &AgentId) -> Option<Agent> {
        self.agents.remove(id)
    }

    pub fn get(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn get_mut(&mut self, id: &AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.agents.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &AgentId> {
        self.agents.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &Agent)> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&AgentId, &mut Agent)> {
        self.agents.iter_mut()
    }

    /// Agents whose `start` falls in `origin_key`'s block — used by the
    /// world's evict→despawn pipeline.
    pub fn ids_in_block(&self, origin: Coord, block_size: u32) -> Vec<AgentId> {
        self.agents
            .values()
            .filter(|a| {
                let bx = a.start.x.div_euclid(block_size as i32) * block_size as i32;
                let by = a.start.y.div_euclid(block_size as i32) * block_size as i32;
                Coord::new(bx, by) == origin
            })
            .map(|a| a.id.clone())
            .collect()
    }
}
