//! The external command surface: every mutation a host UI can ask the world
//! to make, collapsed into one serializable enum so it can cross a process
//! boundary (a UI thread, a replay log, a remote session) instead of calling
//! `dt_sim::facade::World`'s methods directly.

use dt_core::{AgentId, Coord};
use dt_sim::facade::{ClickMode, World};

/// One external command a host UI can issue against a `World`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    SpawnAgent { id: AgentId, coord: Coord },
    DespawnAgent { id: AgentId },
    SelectAgent { id: AgentId },
    SetGoal { id: AgentId, coord: Coord },
    AppendGoal { id: AgentId, coord: Coord },
    SetObstacle { coord: Coord, agent_id: AgentId },
    RemoveObstacle { coord: Coord, agent_id: AgentId },
    ToggleObstacle { coord: Coord, agent_id: AgentId },
    MoveViewport { dx: i32, dy: i32, distance: i32 },
    SetViewportCenter { x: i32, y: i32 },
    SetClickMode { mode: ClickMode },
    SetTickIntervalMsec { msec: u64 },
}

impl Command {
    /// Apply this command to `world`. Naming an agent that doesn't exist is
    /// a no-op — `World`'s own methods already absorb that, so this never
    /// fails.
    pub fn apply(self, world: &mut World) {
        match self {
            Command::SpawnAgent { id, coord } => world.spawn_agent(id, coord),
            Command::DespawnAgent { id } => world.despawn_agent(id),
            Command::SelectAgent { id } => world.select_agent(id),
            Command::SetGoal { id, coord } => world.set_goal(&id, coord),
            Command::AppendGoal { id, coord } => world.append_goal(&id, coord),
            Command::SetObstacle { coord, agent_id } => world.set_obstacle(coord, &agent_id),
            Command::RemoveObstacle { coord, agent_id } => world.remove_obstacle(coord, &agent_id),
            Command::ToggleObstacle { coord, agent_id } => world.toggle_obstacle(coord, &agent_id),
            Command::MoveViewport { dx, dy, distance } => world.move_viewport(dx, dy, distance),
            Command::SetViewportCenter { x, y } => world.set_viewport_center(x, y),
            Command::SetClickMode { mode } => world.set_click_mode(mode),
            Command::SetTickIntervalMsec { msec } => world.set_tick_interval_msec(msec),
        }
    }
}
