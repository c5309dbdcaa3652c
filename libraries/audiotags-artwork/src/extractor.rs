use crate::error::{ArtworkError, Result};
use crate::types::ArtworkData;
use audiotags::FileHandle;
use audiotags_core::ImageSink;
use std::path::Path;

/// Fallback when the container does not declare the picture's MIME type
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Extracts front-cover artwork from audio files.
///
/// Stateless by design: every extraction opens, scans, and releases its own
/// handle, and nothing is cached between calls.
pub struct ArtworkExtractor;

impl ArtworkExtractor {
    /// Create a new artwork extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the front cover from an audio file
    ///
    /// Returns `Ok(Some(artwork))` if a cover was found, `Ok(None)` if the
    /// file has none (a defined outcome, not an error), or `Err` if the file
    /// could not be opened as a supported container.
    pub fn extract(&self, path: &Path) -> Result<Option<ArtworkData>> {
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path.to_path_buf()));
        }

        let handle = FileHandle::open(path)?;
        Ok(handle.front_cover().map(|cover| {
            let mime_type = cover
                .mime_type
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
            ArtworkData::new(cover.data, mime_type)
        }))
    }

    /// Whether the file embeds a front cover, without extracting the bytes
    pub fn has_artwork(&self, path: &Path) -> Result<bool> {
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path.to_path_buf()));
        }

        let handle = FileHandle::open(path)?;
        Ok(handle.has_front_cover())
    }

    /// Extract artwork and encode as base64
    ///
    /// Convenience method that combines `extract()` and base64 encoding.
    pub fn extract_base64(&self, path: &Path) -> Result<Option<String>> {
        match self.extract(path)? {
            Some(artwork) => Ok(Some(artwork.to_base64())),
            None => Ok(None),
        }
    }
}

impl Default for ArtworkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the front cover and hand its bytes to the sink.
///
/// The sink receives the payload exactly once, and only when a cover
/// exists; ownership of the bytes ends with the call.
pub fn read_picture(path: &Path, sink: &mut dyn ImageSink) -> Result<()> {
    let extractor = ArtworkExtractor::new();
    if let Some(artwork) = extractor.extract(path)? {
        sink.put_image(&artwork.data);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_nonexistent_file_returns_error() {
        let extractor = ArtworkExtractor::new();
        let result = extractor.extract(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(ArtworkError::FileNotFound(_))));
    }

    #[test]
    fn sink_is_not_invoked_without_a_picture() {
        let mut invoked = false;
        let mut sink = |_: &[u8]| invoked = true;

        let result = read_picture(Path::new("/nonexistent/file.mp3"), &mut sink);

        assert!(result.is_err());
        assert!(!invoked);
    }
}
