//! Speech engine ports
//!
//! Speech-to-text and text-to-speech are pluggable request/response engines.

use async_trait::async_trait;
use ragcast_domain::AudioFormat;
use thiserror::Error;

/// Errors reported by speech engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),
}

/// Text-to-speech engine.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` as audio bytes in `format`.
    async fn synthesize(&self, text: &str, format: &AudioFormat) -> Result<Vec<u8>, SpeechError>;
}

/// Speech-to-text engine.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe raw audio bytes recorded in `format`.
    async fn transcribe(&self, audio: &[u8], format: &AudioFormat) -> Result<String, SpeechError>;
}
