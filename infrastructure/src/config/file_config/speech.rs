//! Speech configuration from TOML (`[speech]` section)

use ragcast_domain::AudioFormat;
use ragcast_domain::speech::DEFAULT_AUDIO_FORMAT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpeechConfig {
    /// Audio format used when a request doesn't name one
    pub default_format: String,
}

impl Default for FileSpeechConfig {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_AUDIO_FORMAT.to_string(),
        }
    }
}

impl FileSpeechConfig {
    pub fn audio_format(&self) -> AudioFormat {
        AudioFormat::new(self.default_format.trim())
    }
}
