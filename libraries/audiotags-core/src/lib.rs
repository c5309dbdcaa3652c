//! Audiotags Core
//!
//! Shared types, traits, and error handling for the audiotags workspace.
//!
//! This crate defines:
//! - **Domain Types**: `PropertyMap`, `AudioProperties`, `Metadata`
//! - **Boundary Traits**: `ImageSink`
//! - **Error Handling**: Unified `AudiotagsError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use audiotags_core::{AudioProperties, PropertyMap};
//!
//! let mut tags = PropertyMap::new();
//! tags.push("ARTIST", "Some Artist");
//! tags.push("ARTIST", "Other Artist");
//! tags.replace("TITLE", "Some Title");
//!
//! assert_eq!(tags.get_all("ARTIST").len(), 2);
//!
//! let props = AudioProperties::default();
//! assert!(props.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::TextOptions;
pub use error::{AudiotagsError, Result};
pub use traits::ImageSink;
pub use types::{AudioProperties, Metadata, PropertyMap};
