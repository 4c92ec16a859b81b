//! Stream Chat use case.
//!
//! Drives one streaming session through its phases:
//!
//! ```text
//! AttemptProxy ──ok──▶ ProxyStreaming ──────────────────────────▶ Done
//!      │
//!      └─fail──▶ FallbackQuery ──ok──▶ FallbackChunking ────────▶ Done
//!                      │
//!                      └─fail──▶ error text event ──────────────▶ Done
//! ```
//!
//! Once proxying has started there is no second fallback: a broken stream
//! is finalized with whatever was already delivered. Every path ends with
//! exactly one terminal event unless the client went away.

use crate::config::StreamingParams;
use crate::ports::event_sink::{ClientDisconnected, EventSink};
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use crate::ports::speech::SpeechSynthesizer;
use crate::ports::upstream_gateway::{UpstreamError, UpstreamGateway, UpstreamLines};
use crate::use_cases::synthesize::{SpeechSource, SynthesisPipeline};
use futures::StreamExt;
use ragcast_domain::util::log_preview;
use ragcast_domain::{
    AudioFormat, Modalities, ModalityRouter, OutputEvent, StreamId, TextSegmenter,
    UpstreamChunk, UpstreamQuery, chunk_by_words, classify_line, extract_answer,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for the [`StreamChatUseCase`].
#[derive(Debug, Clone)]
pub struct StreamChatInput {
    pub stream_id: StreamId,
    pub query: UpstreamQuery,
    pub modalities: Modalities,
    pub audio_format: AudioFormat,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The streaming endpoint ran to completion.
    Proxied,
    /// The streaming endpoint broke after it had started.
    ProxyInterrupted,
    /// Streaming was unavailable; the answer was replayed from one query.
    FallbackAnswered,
    /// Streaming and the fallback query both failed.
    FallbackFailed,
    ClientDisconnected,
}

impl StreamOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamOutcome::Proxied => "proxied",
            StreamOutcome::ProxyInterrupted => "proxy_interrupted",
            StreamOutcome::FallbackAnswered => "fallback_answered",
            StreamOutcome::FallbackFailed => "fallback_failed",
            StreamOutcome::ClientDisconnected => "client_disconnected",
        }
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone)]
pub struct StreamReport {
    pub stream_id: StreamId,
    pub outcome: StreamOutcome,
    pub text_chunks: usize,
    pub audio_chunks: usize,
}

enum StreamPhase {
    AttemptProxy,
    ProxyStreaming(UpstreamLines),
    FallbackQuery,
    FallbackChunking(String),
    Done(StreamOutcome),
}

/// Per-session state, owned by the task running the session.
struct StreamSession {
    input: StreamChatInput,
    router: ModalityRouter,
    segmenter: TextSegmenter,
    sink: EventSink,
}

impl StreamSession {
    async fn emit_segment(&mut self, segment: String) -> Result<(), ClientDisconnected> {
        debug!("Segment: {}", log_preview(&segment, 80));
        match self.router.route(&self.input.stream_id, segment) {
            Some(event) => self.sink.emit(event).await,
            None => Ok(()),
        }
    }
}

/// Use case for one streaming chat session.
pub struct StreamChatUseCase {
    gateway: Arc<dyn UpstreamGateway>,
    synthesis: SynthesisPipeline,
    params: StreamingParams,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl StreamChatUseCase {
    pub fn new(
        gateway: Arc<dyn UpstreamGateway>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        params: StreamingParams,
    ) -> Self {
        let synthesis = SynthesisPipeline::new(
            gateway.clone(),
            synthesizer,
            params.audio_chunk_bytes,
            params.requery_for_speech,
        )
        .with_answer_pacing(params.fallback_pacing);
        Self {
            gateway,
            synthesis,
            params,
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    /// Run the session to completion, feeding `sink`.
    ///
    /// The sink is dropped on return, which closes the client stream.
    pub async fn execute(&self, input: StreamChatInput, sink: EventSink) -> StreamReport {
        let router = ModalityRouter::new(input.modalities, self.params.text_with_audio);
        info!(
            "Stream {} started (text: {}, audio: {}): {}",
            input.stream_id,
            input.modalities.wants_text(),
            input.modalities.wants_audio(),
            log_preview(&input.query.query, 100)
        );
        self.exchange_logger.log(ExchangeEvent::new(
            "stream_started",
            serde_json::json!({
                "stream_id": input.stream_id.as_str(),
                "query": input.query.query,
                "text": input.modalities.wants_text(),
                "audio": input.modalities.wants_audio(),
            }),
        ));

        let mut session = StreamSession {
            input,
            router,
            segmenter: TextSegmenter::new(self.params.flush_word_threshold),
            sink,
        };

        let mut phase = StreamPhase::AttemptProxy;
        let outcome = loop {
            phase = match phase {
                StreamPhase::AttemptProxy => self.attempt_proxy(&session).await,
                StreamPhase::ProxyStreaming(lines) => StreamPhase::Done(
                    self.proxy(&mut session, lines)
                        .await
                        .unwrap_or(StreamOutcome::ClientDisconnected),
                ),
                StreamPhase::FallbackQuery => self.fallback_query(&mut session).await,
                StreamPhase::FallbackChunking(answer) => StreamPhase::Done(
                    self.replay(&mut session, answer)
                        .await
                        .unwrap_or(StreamOutcome::ClientDisconnected),
                ),
                StreamPhase::Done(outcome) => break outcome,
            };
        };

        let stats = session.sink.stats();
        let report = StreamReport {
            stream_id: session.input.stream_id,
            outcome,
            text_chunks: stats.text_chunks,
            audio_chunks: stats.audio_chunks,
        };
        info!(
            "Stream {} finished: {} ({} text, {} audio events)",
            report.stream_id,
            outcome.as_str(),
            report.text_chunks,
            report.audio_chunks
        );
        self.exchange_logger.log(ExchangeEvent::new(
            "stream_completed",
            serde_json::json!({
                "stream_id": report.stream_id.as_str(),
                "outcome": outcome.as_str(),
                "text_chunks": report.text_chunks,
                "audio_chunks": report.audio_chunks,
            }),
        ));
        report
    }

    async fn attempt_proxy(&self, session: &StreamSession) -> StreamPhase {
        let opened = tokio::select! {
            biased;
            _ = session.sink.closed() => {
                return StreamPhase::Done(StreamOutcome::ClientDisconnected);
            }
            opened = self.gateway.open_stream(&session.input.query) => opened,
        };

        match opened {
            Ok(lines) => {
                debug!("Stream {} proxying upstream", session.input.stream_id);
                StreamPhase::ProxyStreaming(lines)
            }
            Err(e) => {
                warn!(
                    "Stream {}: streaming endpoint unavailable ({}), falling back to a single query",
                    session.input.stream_id,
                    e.describe_brief()
                );
                self.exchange_logger.log(ExchangeEvent::new(
                    "stream_fallback",
                    serde_json::json!({
                        "stream_id": session.input.stream_id.as_str(),
                        "reason": e.describe(),
                    }),
                ));
                StreamPhase::FallbackQuery
            }
        }
    }

    async fn proxy(
        &self,
        session: &mut StreamSession,
        mut lines: UpstreamLines,
    ) -> Result<StreamOutcome, ClientDisconnected> {
        let mut outcome = StreamOutcome::Proxied;
        loop {
            let next = tokio::select! {
                biased;
                _ = session.sink.closed() => return Err(ClientDisconnected),
                next = lines.next() => next,
            };
            match next {
                Some(Ok(line)) => self.handle_line(session, &line).await?,
                Some(Err(e)) => {
                    warn!(
                        "Stream {}: upstream interrupted, finishing with partial output: {}",
                        session.input.stream_id, e
                    );
                    outcome = StreamOutcome::ProxyInterrupted;
                    break;
                }
                None => break,
            }
        }
        drop(lines);

        if session.router.emits_text() {
            if let Some(rest) = session.segmenter.finish() {
                session.emit_segment(rest).await?;
            }
        } else {
            session.segmenter.discard_pending();
        }

        let aggregated = session.segmenter.aggregated().text();
        self.finish(session, SpeechSource::Streamed(aggregated)).await?;
        Ok(outcome)
    }

    async fn handle_line(
        &self,
        session: &mut StreamSession,
        line: &str,
    ) -> Result<(), ClientDisconnected> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        debug!("Upstream line: {}", log_preview(line, 120));

        match classify_line(line) {
            // Upstream audio is opaque and always forwarded.
            UpstreamChunk::AudioDelta { payload } => {
                let event = OutputEvent::AudioPassthrough {
                    stream_id: session.input.stream_id.clone(),
                    audio: payload,
                };
                session.sink.emit(event).await?;
            }
            chunk => {
                if let Some(text) = chunk.text()
                    && let Some(segment) = session.segmenter.append(text)
                {
                    session.emit_segment(segment).await?;
                }
            }
        }
        Ok(())
    }

    async fn fallback_query(&self, session: &mut StreamSession) -> StreamPhase {
        let answered = tokio::select! {
            biased;
            _ = session.sink.closed() => {
                return StreamPhase::Done(StreamOutcome::ClientDisconnected);
            }
            answered = self.gateway.query(&session.input.query) => answered,
        };

        match answered {
            Ok(body) => StreamPhase::FallbackChunking(extract_answer(&body)),
            Err(e) => StreamPhase::Done(
                self.report_failure(session, &e)
                    .await
                    .unwrap_or(StreamOutcome::ClientDisconnected),
            ),
        }
    }

    async fn report_failure(
        &self,
        session: &mut StreamSession,
        error: &UpstreamError,
    ) -> Result<StreamOutcome, ClientDisconnected> {
        warn!(
            "Stream {}: fallback query failed: {}",
            session.input.stream_id,
            error.describe()
        );
        let event = OutputEvent::text(&session.input.stream_id, error.describe_brief());
        session.sink.emit(event).await?;
        session.sink.finish().await?;
        Ok(StreamOutcome::FallbackFailed)
    }

    async fn replay(
        &self,
        session: &mut StreamSession,
        answer: String,
    ) -> Result<StreamOutcome, ClientDisconnected> {
        if session.router.emits_text() {
            let pieces = chunk_by_words(&answer, self.params.fallback_words_per_chunk);
            let last = pieces.len().saturating_sub(1);
            for (idx, piece) in pieces.into_iter().enumerate() {
                session
                    .sink
                    .emit(OutputEvent::text(&session.input.stream_id, piece))
                    .await?;
                if idx < last && !self.params.fallback_pacing.is_zero() {
                    tokio::time::sleep(self.params.fallback_pacing).await;
                }
            }
        }

        self.finish(session, SpeechSource::Answer(answer)).await?;
        Ok(StreamOutcome::FallbackAnswered)
    }

    /// Synthesize if audio was requested, then terminate.
    async fn finish(
        &self,
        session: &mut StreamSession,
        source: SpeechSource,
    ) -> Result<(), ClientDisconnected> {
        if session.router.synthesizes_audio() {
            self.synthesis
                .run(
                    &mut session.sink,
                    &session.input.stream_id,
                    source,
                    &session.input.query,
                    &session.input.audio_format,
                )
                .await?;
        }
        session.sink.finish().await
    }
}
