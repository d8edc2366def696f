//! `dt-core` — foundational types shared by every crate in this workspace.
//!
//! This crate is a dependency of every other `dt-*` crate. It intentionally
//! has no `dt-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                     |
//! |-------------|-----------------------------------------------|
//! | [`coord`]   | `Coord`, the grid coordinate value type        |
//! | [`ids`]     | `AgentId`                                      |
//! | [`time`]    | `Tick`, `SimClock`                             |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)      |
//! | [`terrain`] | `Terrain`, `TerrainSet`                        |
//! | [`rect`]    | `Rect` — the viewport/query rectangle          |
//! | [`error`]   | `DtError`, `DtResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod coord;
pub mod error;
pub mod ids;
pub mod rect;
pub mod rng;
pub mod terrain;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use error::{DtError, DtResult};
pub use ids::AgentId;
pub use rect::Rect;
pub use rng::{AgentRng, SimRng};
pub use terrain::{Terrain, TerrainSet};
pub use time::{SimClock, Tick};
