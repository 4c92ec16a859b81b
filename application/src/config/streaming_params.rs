//! Streaming parameters: orchestrator control.
//!
//! [`StreamingParams`] groups the static parameters that control how
//! [`StreamChatUseCase`](crate::use_cases::stream_chat::StreamChatUseCase)
//! segments, paces and synthesizes a session. These are application-layer
//! concerns, not domain policy.

use ragcast_domain::speech::DEFAULT_AUDIO_CHUNK_BYTES;
use ragcast_domain::stream::segmenter::DEFAULT_FLUSH_WORD_THRESHOLD;
use ragcast_domain::stream::words::DEFAULT_WORDS_PER_CHUNK;
use ragcast_domain::TextWithAudioPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Streaming session control parameters.
///
/// | Parameter                  | Used by                     |
/// |----------------------------|-----------------------------|
/// | `flush_word_threshold`     | live proxy segmentation     |
/// | `fallback_words_per_chunk` | fallback chunking           |
/// | `fallback_pacing`          | fallback chunking           |
/// | `audio_chunk_bytes`        | speech synthesis            |
/// | `text_with_audio`          | modality routing            |
/// | `requery_for_speech`       | synthesis after live proxy  |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingParams {
    /// Word count that forces a segment flush without sentence punctuation.
    pub flush_word_threshold: usize,
    /// Words per text event when replaying a non-streamed answer.
    pub fallback_words_per_chunk: usize,
    /// Delay between fallback text events.
    pub fallback_pacing: Duration,
    /// Maximum size of one synthesized audio event.
    pub audio_chunk_bytes: usize,
    pub text_with_audio: TextWithAudioPolicy,
    /// Ask the backend once more for the full answer before synthesizing.
    pub requery_for_speech: bool,
}

impl Default for StreamingParams {
    fn default() -> Self {
        Self {
            flush_word_threshold: DEFAULT_FLUSH_WORD_THRESHOLD,
            fallback_words_per_chunk: DEFAULT_WORDS_PER_CHUNK,
            fallback_pacing: Duration::from_millis(20),
            audio_chunk_bytes: DEFAULT_AUDIO_CHUNK_BYTES,
            text_with_audio: TextWithAudioPolicy::Suppress,
            requery_for_speech: true,
        }
    }
}

impl StreamingParams {
    // ==================== Builder Methods ====================

    pub fn with_flush_word_threshold(mut self, words: usize) -> Self {
        self.flush_word_threshold = words;
        self
    }

    pub fn with_fallback_words_per_chunk(mut self, words: usize) -> Self {
        self.fallback_words_per_chunk = words;
        self
    }

    pub fn with_fallback_pacing(mut self, pacing: Duration) -> Self {
        self.fallback_pacing = pacing;
        self
    }

    pub fn with_audio_chunk_bytes(mut self, bytes: usize) -> Self {
        self.audio_chunk_bytes = bytes;
        self
    }

    pub fn with_text_with_audio(mut self, policy: TextWithAudioPolicy) -> Self {
        self.text_with_audio = policy;
        self
    }

    pub fn with_requery_for_speech(mut self, requery: bool) -> Self {
        self.requery_for_speech = requery;
        self
    }
}
