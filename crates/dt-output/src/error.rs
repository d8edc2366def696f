//! Error types for dt-output.

use thiserror::Error;

/// Errors surfaced while dispatching a [`crate::Query`] against a
/// [`dt_sim::facade::World`]. [`crate::Command`] never fails — every
/// command naming an unknown agent or coordinate is the documented no-op
/// `dt_sim::facade::World`'s own methods already absorb.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unknown agent: {0}")]
    UnknownAgent(dt_core::AgentId),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
