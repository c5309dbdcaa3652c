/// Audio stream properties
use serde::{Deserialize, Serialize};

/// Immutable snapshot of stream-level facts about an audio file.
///
/// Derived once at read time from the container's stream info and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioProperties {
    /// Stream length in milliseconds
    pub length_ms: u64,

    /// Audio bitrate in kbps
    pub bitrate: u32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel count (1 = mono, 2 = stereo, ...)
    pub channels: u8,
}

impl AudioProperties {
    /// Create a new property snapshot
    pub fn new(length_ms: u64, bitrate: u32, sample_rate: u32, channels: u8) -> Self {
        Self {
            length_ms,
            bitrate,
            sample_rate,
            channels,
        }
    }

    /// All-zero properties mark a file that carries no usable audio stream.
    ///
    /// Scanners use this to reject files that parsed as a container but are
    /// not actually media.
    pub fn is_empty(&self) -> bool {
        self.length_ms == 0 && self.bitrate == 0 && self.sample_rate == 0 && self.channels == 0
    }
}
