use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("world configuration error: {0}")]
    Config(String),

    #[error("block load failed at ({x}, {y}): {reason}")]
    BlockLoadFailed { x: i32, y: i32, reason: String },

    #[error("agent error: {0}")]
    Agent(#[from] dt_agent::AgentError),

    #[error("engine error: {0}")]
    Engine(#[from] dt_schedule::EngineError),

    #[error("spatial error: {0}")]
    Spatial(#[from] dt_spatial::SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
