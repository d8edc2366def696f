//! Events the world raises for a host UI to observe.

use dt_core::{AgentId, Coord};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldEvent {
    BlockLoaded(Coord),
    BlockEvicted(Coord),
    AgentCreated(AgentId),
    AgentDeleted(AgentId),
    AgentSelected(AgentId),
    ViewportChanged(Coord),
    TickElapsedMs(f64),
}
