use thiserror::Error;

/// Errors raised at task-dispatch time, before a task ever reaches a worker.
///
/// Once a task is queued, failure is folded into its result value (a failed
/// `Route`, a `TickOutcome::Idle`) rather than surfaced as an `Err` — see
/// the crate-level error propagation policy shared with `dt-spatial`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("route-finder engine: {0}")]
    Finder(#[from] dt_spatial::SpatialError),

    #[error("engine is shutting down; task rejected")]
    ShuttingDown,
}

pub type EngineResult<T> = Result<T, EngineError>;
