/// Core error types for the audiotags workspace
use thiserror::Error;

/// Result type alias using `AudiotagsError`
pub type Result<T> = std::result::Result<T, AudiotagsError>;

/// Unified error type shared across the audiotags crates
#[derive(Error, Debug)]
pub enum AudiotagsError {
    /// The file could not be opened as a supported, tag-capable container
    #[error("Open error: {0}")]
    Open(String),

    /// The file opened, but no tag dialect produced any properties
    #[error("No metadata")]
    NoMetadata,

    /// Metadata parsing/normalization errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Tag persistence errors (the in-memory mutation succeeded, the save did not)
    #[error("Write error: {0}")]
    Write(String),

    /// Artwork extraction errors
    #[error("Artwork error: {0}")]
    Artwork(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AudiotagsError {
    /// Create an open error
    pub fn open(msg: impl Into<String>) -> Self {
        Self::Open(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create an artwork error
    pub fn artwork(msg: impl Into<String>) -> Self {
        Self::Artwork(msg.into())
    }
}
