//! Error types for terrain scene generation

use thiserror::Error;

/// Main error type for the generator
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid generation parameters with no safe default
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Terrain query outside the terrain extent
    #[error("Position ({x}, {z}) lies outside the terrain")]
    Bounds { x: f32, z: f32 },

    /// Persisted parameter record could not be parsed
    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generation was stopped through a `CancelToken`
    #[error("Generation cancelled")]
    Cancelled,
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Shorthand for a format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
