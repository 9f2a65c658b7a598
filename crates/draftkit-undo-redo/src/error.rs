//! Error types for the undo/redo system

use thiserror::Error;

/// Error type returned by apply/reverse callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in the undo/redo system
#[derive(Debug, Error)]
pub enum UndoRedoError {
    /// The apply callback of a change failed
    #[error("Failed to apply change")]
    ApplyFailed(#[source] BoxError),

    /// The reverse callback of a change failed
    #[error("Failed to reverse change")]
    ReverseFailed(#[source] BoxError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(#[from] draftkit_common::LoggingError),

    /// Configuration loaded but is not usable
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration could not be written as TOML
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl UndoRedoError {
    /// Create a new ValidationError with context
    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// The callback error, if this error came from a change callback
    pub fn callback_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::ApplyFailed(source) | Self::ReverseFailed(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}
