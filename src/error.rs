use thiserror::Error;

/// Errors raised at the boundaries of the analysis engine.
///
/// The per-frame computations never fail; these cover malformed landmark
/// input from the pose source and invalid configuration.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Missing landmark: {0}")]
    MissingLandmark(&'static str),
    #[error("Unknown landmark: {0}")]
    UnknownLandmark(String),
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Malformed pose frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}
