use thiserror::Error;

/// Mobility-layer errors. `tick()` itself cannot fail (there is no terrain
/// or blocking concept at this layer — that lives in `dt-sim`), but
/// the type is kept so callers that wrap animator advancement with other
/// fallible bookkeeping have a natural error to convert into.
#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("animator configuration error: {0}")]
    Config(String),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
