//! The external query surface: read-only requests a host UI can make
//! against the world, and the data shapes they return — everything a
//! renderer needs without reaching into `dt_sim` internals directly.

use dt_agent::Agent;
use dt_core::{AgentId, Coord, Rect};
use dt_sim::facade::World;
use dt_sim::Cell;

use crate::error::{OutputError, OutputResult};

/// One external read-only request a host UI can make against a `World`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Query {
    CellsInRect { rect: Rect },
    AgentsInRect { rect: Rect },
    Agent { id: AgentId },
    SelectedAgent,
    BlockCount,
    AgentCount,
    MemoryUsage,
    BlocksForRect { rect: Rect },
    IsRectLoaded { rect: Rect },
    IsBlocksLoadedForwardForRect { rect: Rect, dx: i32, dy: i32, distance: u32 },
}

/// The answer to a [`Query`]. One variant per query, carrying only what
/// that query asked for.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryResponse {
    Cells(Vec<(Coord, Cell)>),
    Agents(Vec<Agent>),
    MaybeAgent(Option<Agent>),
    Count(usize),
    Blocks(Vec<Coord>),
    Bool(bool),
}

impl Query {
    /// Answer this query against `world`. [`Query::Agent`] is the only
    /// variant that can fail — naming an id not currently attached.
    pub fn run(self, world: &World) -> OutputResult<QueryResponse> {
        Ok(match self {
            Query::CellsInRect { rect } => QueryResponse::Cells(world.cells_in_rect(rect)),
            Query::AgentsInRect { rect } => QueryResponse::Agents(world.agents_in_rect(rect)),
            Query::Agent { id } => {
                let agent = world.agent(&id).cloned();
                if agent.is_none() {
                    return Err(OutputError::UnknownAgent(id));
                }
                QueryResponse::MaybeAgent(agent)
            }
            Query::SelectedAgent => QueryResponse::MaybeAgent(world.selected_agent().cloned()),
            Query::BlockCount => QueryResponse::Count(world.block_count()),
            Query::AgentCount => QueryResponse::Count(world.agent_count()),
            Query::MemoryUsage => QueryResponse::Count(world.memory_usage()),
            Query::BlocksForRect { rect } => QueryResponse::Blocks(world.blocks_for_rect(rect)),
            Query::IsRectLoaded { rect } => QueryResponse::Bool(world.is_rect_loaded(rect)),
            Query::IsBlocksLoadedForwardForRect { rect, dx, dy, distance } => {
                QueryResponse::Bool(world.is_blocks_loaded_forward_for_rect(rect, dx, dy, distance))
            }
        })
    }
}
