/// Metadata-specific errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found or not readable
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The content did not parse as any supported container
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The container parsed but exposes no tag facility
    #[error("No tag facility: {0}")]
    NoTagFacility(String),

    /// A handle exists but no dialect produced any properties
    #[error("No metadata")]
    NoMetadata,

    /// Mutation attempted through a handle without write access
    #[error("Handle is read-only")]
    ReadOnly,

    /// Tag writing error
    #[error("Tag writing error: {0}")]
    WriteError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for audiotags_core::AudiotagsError {
    fn from(err: MetadataError) -> Self {
        use audiotags_core::AudiotagsError;

        match err {
            MetadataError::FileNotFound(_)
            | MetadataError::UnsupportedFormat(_)
            | MetadataError::NoTagFacility(_) => AudiotagsError::Open(err.to_string()),
            MetadataError::NoMetadata => AudiotagsError::NoMetadata,
            MetadataError::ReadOnly | MetadataError::WriteError(_) => {
                AudiotagsError::Write(err.to_string())
            },
            MetadataError::Io(e) => AudiotagsError::Io(e),
            MetadataError::Lofty(e) => AudiotagsError::Metadata(e.to_string()),
        }
    }
}
