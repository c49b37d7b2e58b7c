//! Error types for the canvas rasterizer

use thiserror::Error;

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or drawing on a canvas
///
/// Out-of-bounds pixel writes, `restore()` on an empty stack and degenerate
/// geometry are deliberately not errors; they are silently ignored.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a value the drawing API cannot accept
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Invalid canvas configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A scene description could not be decoded or replayed
    #[error("Scene error: {0}")]
    SceneError(String),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::ValidationError(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SceneError(err.to_string())
    }
}
