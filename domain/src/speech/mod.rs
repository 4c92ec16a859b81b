//! Speech-side domain concepts.
//!
//! - [`AudioFormat`]: codec/sample-format descriptor passed to speech engines
//! - [`normalize::normalize_for_speech`]: strip formatting artifacts before synthesis
//! - [`audio_units`]: slice synthesized audio into bounded transfer units

pub mod normalize;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default audio format when the client specifies none.
pub const DEFAULT_AUDIO_FORMAT: &str = "pcm16";

/// Default size of one audio transfer unit, before encoding.
pub const DEFAULT_AUDIO_CHUNK_BYTES: usize = 1024;

/// Codec / sample-format descriptor, e.g. `pcm16`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioFormat(String);

impl AudioFormat {
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self(DEFAULT_AUDIO_FORMAT.to_string())
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split audio into units of at most `unit_bytes` (zero is treated as one).
pub fn audio_units(audio: &[u8], unit_bytes: usize) -> impl Iterator<Item = &[u8]> {
    audio.chunks(unit_bytes.max(1))
}
