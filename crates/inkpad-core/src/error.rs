//! Error types shared by the canvas core.

use thiserror::Error;

/// Errors produced by scene operations, configuration and image loading.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The operation does not apply to the current group/scene state.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
    #[error("Surface has been disposed")]
    Disposed,
    #[error("Unsupported brush width: {0}")]
    UnsupportedBrushWidth(u32),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Failed to load image: {0}")]
    ImageLoad(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl CanvasError {
    /// Check if this is an invalid-state error.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, CanvasError::InvalidState(_))
    }
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
