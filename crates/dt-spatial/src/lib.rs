//! `dt-spatial` — grid geometry and route-finding: the coordinate-keyed
//! containers, the pluggable cost/heuristic registry, the classical static
//! finders, and the incremental D* Lite planner.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`containers`] | `CoordHash`, `CoordList`                                     |
//! | [`cost_pq`]    | `FloatPriorityQueue` — the classical finders' open list       |
//! | [`map`]        | `Map`, `NeighbourMode`, `BlockedPredicate`                    |
//! | [`registry`]   | Named cost/heuristic function registry                        |
//! | [`finders`]    | A*, BFS, DFS, Dijkstra, Weighted A*, IDA*, RTA*, SMA*, Fringe, Fast Marching |
//! | [`route`]      | `Route`, `AlgorithmTag`, `FinderConfig`, `find_route` dispatcher |
//! | [`dstar`]      | `DStarLite` — the incremental replanning engine                |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.      |

pub mod containers;
pub mod cost_pq;
pub mod dstar;
pub mod error;
pub mod finders;
pub mod map;
pub mod registry;
pub mod route;

#[cfg(test)]
mod tests;

pub use containers::{CoordHash, CoordList};
pub use cost_pq::FloatPriorityQueue;
pub use dstar::{DStarKey, DStarLite, DStarPq};
pub use error::{SpatialError, SpatialResult};
pub use map::{BlockedPredicate, Map, NeighbourMode};
pub use registry::{cost_fn, heuristic_fn, register_cost, register_heuristic, CostFn, HeuristicFn};
pub use route::{find_route, AlgorithmTag, FinderConfig, Route};
