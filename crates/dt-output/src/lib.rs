//! `dt-output` — the external command/query/event surface a host UI drives
//! instead of calling `dt_sim::facade::World` directly.
//!
//! This crate adds no state of its own: [`Command`] and [`Query`] are thin,
//! serializable envelopes around `World`'s own methods, useful once a host
//! wants to ship requests across a boundary (a UI thread, a replay log, a
//! remote session) rather than link against `dt-sim` directly. [`EventSink`]
//! is the matching read side for `World::drain_events`.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                          |
//! |---------|------------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `Command`, `Query`, and `QueryResponse`, for shipping them as JSON or any other wire format. |
//!
//! Persistence of the full world is explicitly out of scope; the `serde`
//! feature only reaches as far as these request/response envelopes and,
//! independently, `dt-sim`'s own optional per-`Block` JSON round-trip.

pub mod command;
pub mod error;
pub mod query;
pub mod sink;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::{OutputError, OutputResult};
pub use query::{Query, QueryResponse};
pub use sink::{EventSink, NoopSink, TracingSink};
