//! Placeholder speech engines.
//!
//! Stand-ins used until a real speech service is wired in. The synthesizer
//! returns the UTF-8 bytes of the text, the recognizer a marker derived from
//! the first bytes of the audio. Both make sessions observable end to end.

use async_trait::async_trait;
use ragcast_application::{SpeechError, SpeechRecognizer, SpeechSynthesizer};
use ragcast_domain::AudioFormat;
use std::fmt::Write;

/// Audio bytes included in a placeholder transcription.
const TRANSCRIPT_PREFIX_BYTES: usize = 16;

/// Synthesizer that "speaks" by returning the text's bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderSynthesizer;

#[async_trait]
impl SpeechSynthesizer for PlaceholderSynthesizer {
    async fn synthesize(&self, text: &str, _format: &AudioFormat) -> Result<Vec<u8>, SpeechError> {
        Ok(text.as_bytes().to_vec())
    }
}

/// Recognizer that reports `[transcription:<hex of the first 16 bytes>]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRecognizer;

#[async_trait]
impl SpeechRecognizer for PlaceholderRecognizer {
    async fn transcribe(&self, audio: &[u8], _format: &AudioFormat) -> Result<String, SpeechError> {
        let mut hex = String::with_capacity(TRANSCRIPT_PREFIX_BYTES * 2);
        for byte in audio.iter().take(TRANSCRIPT_PREFIX_BYTES) {
            let _ = write!(hex, "{:02x}", byte);
        }
        Ok(format!("[transcription:{}]", hex))
    }
}
