//! `dt-mobility` — the per-tick animator advance.
//!
//! The interpolation *state* (`AnimatorState`) lives in `dt-agent`, next to
//! the rest of `Agent`; this crate holds the *behavior* — `tick()` and
//! arrival detection — so the animator-engine worker pool in `dt-schedule`
//! depends on this crate alone for "how to advance one agent's animation by
//! Δt".
//!
//! # Crate layout
//!
//! | Module      | Contents                         |
//! |-------------|------------------------------------|
//! | [`animator`]| `tick`, `TickOutcome`              |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>` |

pub mod animator;
pub mod error;

#[cfg(test)]
mod tests;

pub use animator::{tick, TickOutcome};
pub use error::{MobilityError, MobilityResult};
