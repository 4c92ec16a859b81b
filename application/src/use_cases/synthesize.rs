//! Speech synthesis pipeline.
//!
//! Runs once per session after the text phase, when audio was requested:
//! pick the text, normalize it for speech, synthesize, then slice the audio
//! into bounded transfer units. A synthesis failure only skips the audio.
//! Audio for a replayed answer is paced like the replayed text.

use crate::ports::event_sink::{ClientDisconnected, EventSink};
use crate::ports::speech::SpeechSynthesizer;
use crate::ports::upstream_gateway::UpstreamGateway;
use ragcast_domain::{
    AudioFormat, OutputEvent, StreamId, UpstreamQuery, audio_units, normalize_for_speech,
    primary_answer,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the text to be spoken comes from.
#[derive(Debug, Clone)]
pub enum SpeechSource {
    /// A complete answer from a non-streaming query.
    Answer(String),
    /// Text reassembled from streamed fragments. The backend may be asked
    /// again for the full answer.
    Streamed(String),
}

pub struct SynthesisPipeline {
    gateway: Arc<dyn UpstreamGateway>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    audio_chunk_bytes: usize,
    requery: bool,
    answer_pacing: Duration,
}

impl SynthesisPipeline {
    pub fn new(
        gateway: Arc<dyn UpstreamGateway>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        audio_chunk_bytes: usize,
        requery: bool,
    ) -> Self {
        Self {
            gateway,
            synthesizer,
            audio_chunk_bytes,
            requery,
            answer_pacing: Duration::ZERO,
        }
    }

    /// Delay between audio units when speaking a replayed answer.
    pub fn with_answer_pacing(mut self, pacing: Duration) -> Self {
        self.answer_pacing = pacing;
        self
    }

    /// Synthesize and emit audio events. Returns the number of events sent.
    pub async fn run(
        &self,
        sink: &mut EventSink,
        stream_id: &StreamId,
        source: SpeechSource,
        query: &UpstreamQuery,
        format: &AudioFormat,
    ) -> Result<usize, ClientDisconnected> {
        let (text, pacing) = match source {
            SpeechSource::Answer(answer) => (answer, self.answer_pacing),
            SpeechSource::Streamed(aggregated) => {
                (self.authoritative_text(query, aggregated).await, Duration::ZERO)
            }
        };

        let speech = normalize_for_speech(&text);
        if speech.is_empty() {
            debug!("Nothing to synthesize for stream {}", stream_id);
            return Ok(0);
        }

        let audio = match self.synthesizer.synthesize(&speech, format).await {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Skipping audio for stream {}: {}", stream_id, e);
                return Ok(0);
            }
        };

        let mut emitted = 0;
        for unit in audio_units(&audio, self.audio_chunk_bytes) {
            if emitted > 0 && !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }
            sink.emit(OutputEvent::audio(stream_id, unit)).await?;
            emitted += 1;
        }
        info!(
            "Synthesized {} bytes of {} audio in {} chunks for stream {}",
            audio.len(),
            format,
            emitted,
            stream_id
        );
        Ok(emitted)
    }

    async fn authoritative_text(&self, query: &UpstreamQuery, aggregated: String) -> String {
        if !self.requery {
            return aggregated;
        }
        match self.gateway.query(query).await {
            Ok(body) => primary_answer(&body).unwrap_or(aggregated),
            Err(e) => {
                debug!("Re-query for speech failed, using streamed text: {}", e);
                aggregated
            }
        }
    }
}
