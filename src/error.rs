// Typed errors with thiserror. Surface meaningful messages to JS.
// Carousel jumps, config parsing and scene serialization produce errors; DOM absence never does.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Carousel index {index} out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
