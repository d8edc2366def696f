//! Framework error type.
//!
//! Sub-crates define their own narrow error enums and convert them into a
//! caller's error with `#[from]`/`?`; `DtError` is only the base case for
//! code that has no more specific enum of its own.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `dt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DtError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `dt-*` crates.
pub type DtResult<T> = Result<T, DtError>;
