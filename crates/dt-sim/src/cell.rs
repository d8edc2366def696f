//! The block-paged world's per-coordinate record.
//!
//! `Cell` is owned by the world layer, not by `dt-spatial` — the planners
//! only ever see a `Coord` and whatever `Map::is_blocked` says about it.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use dt_core::{AgentId, Coord, Terrain};

bitflags! {
    /// Rendering/bookkeeping markers a viewport cares about; none of them
    /// affect passability.
    #[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellFlags: u8 {
        const START   = 0b0001;
        const GOAL    = 0b0010;
        const ROUTE   = 0b0100;
        const VISITED = 0b1000;
    }
}

/// Whether a cell currently hosts at least one agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Empty,
    Agent,
}

/// One grid cell, as tracked by the resident block it belongs to.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub coord: Coord,
    pub terrain: Terrain,
    pub status: CellStatus,
    pub flags: CellFlags,
    pub agent_ids: Vec<AgentId>,
    /// `[0, 1]` — 0 is dark, 1 is fully lit.
    pub light_level: f32,
    pub zone_id: u32,
    pub items: Vec<String>,
    pub owner: Option<AgentId>,
    pub effect: Option<String>,
    pub event: Option<String>,
    pub custom: FxHashMap<String, String>,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            terrain: Terrain::Normal,
            status: CellStatus::Empty,
            flags: CellFlags::empty(),
            agent_ids: Vec::new(),
            light_level: 1.0,
            zone_id: 0,
            items: Vec::new(),
            owner: None,
            effect: None,
            event: None,
            custom: FxHashMap::default(),
        }
    }

    /// `true` if `terrain` is `Forbidden` — impassable to every agent
    /// regardless of movable-terrain set.
    pub fn is_forbidden(&self) -> bool {
        self.terrain == Terrain::Forbidden
    }

    pub fn add_agent(&mut self, id: AgentId) {
        if !self.agent_ids.contains(&id) {
            self.agent_ids.push(id);
        }
        self.status = CellStatus::Agent;
    }

    pub fn remove_agent(&mut self, id: &AgentId) {
        self.agent_ids.retain(|a| a != id);
        if self.agent_ids.is_empty() {
            self.status = CellStatus::Empty;
        }
    }

    pub fn is_occupied_by_other(&self, id: &AgentId) -> bool {
        self.agent_ids.iter().any(|a| a != id)
    }
}
