//! Spatial-subsystem error type.

use dt_core::Coord;
use thiserror::Error;

/// Errors produced by `dt-spatial`.
///
/// Per the propagation policy: every variant except [`SpatialError::UnknownFunction`]
/// is recovered into a failed [`crate::Route`] by the planner's own entry
/// points and never escapes as an `Err` from `find`/`find_loop`.
/// `UnknownFunction` is rejected eagerly at dispatch time, before a worker
/// ever starts planning, so it is the one variant callers must actually
/// handle as an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    #[error("coordinate {0} is out of bounds")]
    OutOfBounds(Coord),

    #[error("unknown cost/heuristic function: {0}")]
    UnknownFunction(String),

    #[error("planner exhausted its open set without reaching the goal")]
    PlannerExhausted,

    #[error("no route exists from {from} to {to}")]
    RouteNotFound { from: Coord, to: Coord },

    #[error("failed to reconstruct route at {0}")]
    ReconstructFailed(Coord),

    #[error("route search was cancelled")]
    Cancelled,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
