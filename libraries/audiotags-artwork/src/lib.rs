//! Audiotags Artwork - Audio file artwork extraction
//!
//! This library extracts embedded front-cover art from audio files through
//! the `audiotags` format dispatch. Each container stores pictures in its
//! own structure (ID3v2 APIC frames, FLAC picture blocks,
//! METADATA_BLOCK_PICTURE in Vorbis comments, MP4 `covr` atoms); the
//! extractor exposes one uniform outcome: zero or one cover.
//!
//! # Example
//!
//! ```no_run
//! use audiotags_artwork::ArtworkExtractor;
//! use std::path::Path;
//!
//! let extractor = ArtworkExtractor::new();
//! let path = Path::new("music/track.mp3");
//!
//! match extractor.extract(path) {
//!     Ok(Some(artwork)) => {
//!         println!("Found artwork: {} bytes, type: {}",
//!             artwork.data.len(), artwork.mime_type);
//!     }
//!     Ok(None) => println!("No artwork found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]

mod error;
mod extractor;
mod types;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use extractor::{read_picture, ArtworkExtractor};
pub use types::ArtworkData;
