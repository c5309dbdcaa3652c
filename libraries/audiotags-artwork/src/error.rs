use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during artwork extraction
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying metadata layer could not open or parse the file
    #[error("Metadata error: {0}")]
    Metadata(#[from] audiotags::MetadataError),
}

impl From<ArtworkError> for audiotags_core::AudiotagsError {
    fn from(err: ArtworkError) -> Self {
        audiotags_core::AudiotagsError::Artwork(err.to_string())
    }
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
