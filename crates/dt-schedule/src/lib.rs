//! `dt-schedule` — the route-finder and animator worker-pool engines.
//!
//! The simulation is single-threaded and authoritative on the foreground:
//! only it mutates the world or an `Agent`. These two engines are the only
//! place work leaves that thread — each is a fixed-size `std::thread` pool
//! fed by an unbounded MPSC queue, computing against read-only snapshots
//! (`Arc<Map>`, a moved-in owned `AnimatorState`) and handing results back
//! through a second channel the foreground drains once per tick.
//!
//! # Crate layout
//!
//! | Module            | Contents                                          |
//! |--------------------|---------------------------------------------------|
//! | [`pool`]           | `WorkerPool<T>` — the shared MPSC + thread-pool plumbing |
//! | [`finder_engine`]  | `FinderEngine`, `FinderJob`, `FinderTask`          |
//! | [`animator_engine`]| `AnimatorEngine`, `AnimatorTask`, `AnimatorOutcome`|
//! | [`error`]          | `EngineError`, `EngineResult<T>`                  |
//!
//! Shutdown closes each pool's queue with one sentinel per worker, then
//! joins them — no task is dropped mid-flight, but nothing new is accepted
//! once `shutdown` has been called.

pub mod animator_engine;
pub mod error;
pub mod finder_engine;
pub mod pool;

#[cfg(test)]
mod tests;

pub use animator_engine::{AnimatorEngine, AnimatorOutcome, AnimatorTask};
pub use error::{EngineError, EngineResult};
pub use finder_engine::{FinderEngine, FinderJob, FinderOutcome, FinderTask};
pub use pool::WorkerPool;
