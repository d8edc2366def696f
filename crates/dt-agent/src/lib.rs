//! `dt-agent` — the per-NPC record and the world's agent registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|---------------------------------------------------------|
//! | [`agent`]    | `Agent` — identity, goal queue, planner state, animation |
//! | [`animator`] | `AnimatorState` — the sub-cell interpolation fields      |
//! | [`registry`] | `AgentRegistry` — id → `Agent`                           |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Propagates `Serialize`/`Deserialize` derives.              |

pub mod agent;
pub mod animator;
pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use animator::AnimatorState;
pub use error::{AgentError, AgentResult};
pub use registry::AgentRegistry;
