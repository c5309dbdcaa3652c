mod audio;
mod metadata;
mod properties;

pub use audio::AudioProperties;
pub use metadata::Metadata;
pub use properties::PropertyMap;
