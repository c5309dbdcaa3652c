//! Audiotags
//!
//! Format dispatch and metadata normalization for audio files.
//!
//! This crate provides:
//! - Content-based container detection and a scoped file handle
//! - A normalized key/value property model across incompatible tag dialects
//!   (ID3v2, ID3v1, Vorbis comments, MP4 ilst, APE)
//! - Dialect precedence for containers that can host several tags at once
//! - Front-cover presence/extraction per container
//! - Generic field-level tag writing and removal
//!
//! Byte-level container parsing is delegated to [`lofty`]; this crate owns
//! only the dispatch and normalization layer above it.
//!
//! # Example
//!
//! ```rust,no_run
//! use audiotags::{read, write_tag, FileHandle};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // One-shot read of normalized tags + audio properties
//! let metadata = read("/music/song.flac", true)?;
//! println!("artist: {:?}", metadata.tags.get("ARTIST"));
//! println!("length: {}ms", metadata.properties.length_ms);
//!
//! // Field-level write (whole-field replacement)
//! write_tag("/music/song.flac", "crossonic_id_abc", "tr_123")?;
//!
//! // Handle-based access when several operations share one open file
//! let handle = FileHandle::open("/music/song.flac")?;
//! if handle.has_front_cover() {
//!     let cover = handle.front_cover();
//! }
//! handle.close();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod handle;
mod mutate;
mod normalize;
mod picture;

pub use error::{MetadataError, Result};
pub use handle::FileHandle;
pub use mutate::{remove_field, write_field};
pub use picture::FrontCover;

use std::path::Path;

use audiotags_core::Metadata;

/// Key prefix under which this system stores its per-instance track ids.
pub const CROSSONIC_ID_PREFIX: &str = "CROSSONIC_ID_";

/// Read a file's normalized tags and audio properties in one shot.
///
/// Opens the file, extracts the authoritative dialect's properties and the
/// stream properties, optionally checks for an embedded front cover, and
/// closes the handle. The returned [`Metadata`] is a deep copy with no tie
/// to the (already released) handle.
///
/// Errors with [`MetadataError::NoMetadata`] when the file opened but no
/// dialect produced properties; open failures carry their own variants.
pub fn read(path: impl AsRef<Path>, check_has_image: bool) -> Result<Metadata> {
    let handle = FileHandle::open(path)?;

    let tags = handle.read_properties().ok_or(MetadataError::NoMetadata)?;
    let properties = handle.read_audio_properties();
    let has_image = check_has_image.then(|| handle.has_front_cover());

    Ok(Metadata {
        tags,
        properties,
        has_image,
    })
}

/// Set a single tag field, replacing any existing values under the key.
///
/// The key is uppercased into the canonical key space before writing, so
/// `crossonic_id_abc` and `CROSSONIC_ID_ABC` address the same field.
pub fn write_tag(path: impl AsRef<Path>, key: &str, value: &str) -> Result<()> {
    mutate::write_field(path, &key.to_uppercase(), value)
}

/// Remove this system's per-instance id fields.
///
/// With a non-empty `instance_id`, removes exactly
/// `CROSSONIC_ID_<INSTANCE_ID>`; with an empty one, removes every field
/// under the `CROSSONIC_ID_` prefix. Unrelated fields are never touched.
pub fn remove_crossonic_id(path: impl AsRef<Path>, instance_id: &str) -> Result<()> {
    mutate::remove_field(path, CROSSONIC_ID_PREFIX, &instance_id.to_uppercase())
}
