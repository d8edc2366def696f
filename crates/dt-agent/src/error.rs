//! Error kinds for agent lifecycle operations.

use dt_core::AgentId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("agent {0} not found")]
    NotFound(AgentId),
    #[error("agent {0} already attached")]
    AlreadyAttached(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
