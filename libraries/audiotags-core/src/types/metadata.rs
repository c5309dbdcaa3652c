/// Aggregated file metadata
use serde::{Deserialize, Serialize};

use super::{AudioProperties, PropertyMap};

/// Everything a single read of an audio file produces.
///
/// A `Metadata` is a deep copy owned entirely by the caller; it stays valid
/// after the handle that produced it is closed. Releasing it is ordinary
/// ownership — there is no separate free call, and a double release is
/// unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Normalized tag properties
    pub tags: PropertyMap,

    /// Stream-level audio properties
    pub properties: AudioProperties,

    /// Whether the file embeds a front cover.
    ///
    /// `None` when the caller did not ask for the (potentially costly) check.
    pub has_image: Option<bool>,
}

impl Metadata {
    /// Create a metadata aggregate without the picture check
    pub fn new(tags: PropertyMap, properties: AudioProperties) -> Self {
        Self {
            tags,
            properties,
            has_image: None,
        }
    }
}
