//! `dt-sim` — the block-paged grid world and its facade.
//!
//! This crate owns the parts of the simulation that are neither pure
//! pathfinding (`dt-spatial`) nor per-agent state machinery (`dt-agent`,
//! `dt-behavior`, `dt-mobility`): the lazily-materialised [`Block`] grid, its
//! LRU [`BlockCache`], the [`Loader`] worker pool that fills cache misses off
//! the foreground thread, and the [`facade::World`] that ties all of it
//! together behind a command/query/event surface.
//!
//! # Tick loop
//!
//! Each call to [`facade::World::tick`] runs, in order:
//!
//! 1. Drain the [`Loader`]'s completed/failed block loads, installing newly
//!    resident blocks into the cache and resolving any spawns waiting on
//!    them.
//! 2. Drain the cache's eviction sink, queuing a despawn for every agent
//!    resident in an evicted block.
//! 3. Drain the batched spawn and despawn queues (spawn always drains
//!    before despawn).
//! 4. Apply finished planning results from the `dt-schedule` finder engine.
//! 5. Submit a planning request for every agent with a pending goal and no
//!    task outstanding — driving a standing [`dt_spatial::DStarLite`] per
//!    agent when `WorldConfig::use_incremental_planner` is set, or the
//!    static finder dispatcher otherwise.
//! 6. Start idle animators, submit this tick's animator-engine ticks, apply
//!    finished animator results, committing arrivals and migrating cell
//!    membership.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `Block`, `Cell`, and `WorldConfig`, enabling an optional per-block JSON round-trip (not a full persistence subsystem — see `DESIGN.md`). |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dt_core::Coord;
//! use dt_sim::{WorldConfig, facade::World};
//!
//! let mut world = World::with_default_terrain(WorldConfig::default());
//! world.spawn_agent("scout".into(), Coord::new(0, 0));
//! world.set_goal(&"scout".into(), Coord::new(20, 20));
//! for _ in 0..200 {
//!     world.tick(1.0 / 30.0);
//! }
//! ```

pub mod block;
pub mod cache;
pub mod cell;
pub mod config;
pub mod error;
pub mod event;
pub mod facade;
pub mod loader;

#[cfg(test)]
mod tests;

pub use block::{Block, MakeCell};
pub use cache::BlockCache;
pub use cell::{Cell, CellFlags, CellStatus};
pub use config::WorldConfig;
pub use error::{SimError, SimResult};
pub use event::WorldEvent;
pub use facade::{default_make_cell, ClickMode, World};
pub use loader::{BlockFactory, LoadResult, Loader};
