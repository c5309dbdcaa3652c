/// Text handling configuration
use serde::{Deserialize, Serialize};

/// Controls how textual tag content is encoded when persisted.
///
/// This is a plain value threaded through the write path. There is no
/// process-wide encoding switch; callers that need Latin-1 output for legacy
/// ID3v2 consumers construct their own options and pass them along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    /// Prefer a Unicode-capable encoding (UTF-8) for written text frames.
    ///
    /// When false, frames that support it are written Latin-1 encoded.
    /// Reading is unaffected; extracted text is always Unicode.
    pub prefer_unicode: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            prefer_unicode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unicode() {
        assert!(TextOptions::default().prefer_unicode);
    }
}
