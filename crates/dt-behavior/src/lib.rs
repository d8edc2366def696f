//! `dt-behavior` — the route-change detector.
//!
//! The world uses [`RouteChangeDetector`] to decide, on a viewport move,
//! whether the agent/viewport's recent direction history has "turned"
//! enough to switch from halo loading to forward prefetch along the new
//! heading (see `dt-sim::facade::World::move_viewport`).
//!
//! # Crate layout
//!
//! | Module          | Contents                              |
//! |-----------------|----------------------------------------|
//! | [`route_change`]| `RouteChangeDetector`                 |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`  |

pub mod error;
pub mod route_change;

#[cfg(test)]
mod tests;

pub use error::{BehaviorError, BehaviorResult};
pub use route_change::RouteChangeDetector;
