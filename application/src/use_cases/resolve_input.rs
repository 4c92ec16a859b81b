//! Resolve Input use case.
//!
//! Turns a client [`ChatRequest`] into everything a session needs: the
//! backend query (with any inline audio transcribed), the requested output
//! modalities and the audio format.

use crate::config::RequestSettings;
use crate::ports::speech::SpeechRecognizer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ragcast_domain::chat::request::InputAudio;
use ragcast_domain::util::log_preview;
use ragcast_domain::{
    AudioFormat, ChatRequest, ContentPart, DomainError, Modalities, MessageContent,
    TypedPart, UpstreamQuery,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Placeholder contributed by audio that could not be turned into text.
pub const UNTRANSCRIBABLE_AUDIO: &str = "[untranscribable audio]";

#[derive(Error, Debug)]
pub enum ResolveInputError {
    #[error(transparent)]
    InvalidRequest(#[from] DomainError),
}

/// A request resolved into session inputs.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub query: UpstreamQuery,
    pub modalities: Modalities,
    /// Format of synthesized audio.
    pub audio_format: AudioFormat,
    pub streaming: bool,
}

pub struct ResolveInputUseCase {
    recognizer: Arc<dyn SpeechRecognizer>,
    settings: RequestSettings,
}

impl ResolveInputUseCase {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, settings: RequestSettings) -> Self {
        Self {
            recognizer,
            settings,
        }
    }

    pub async fn execute(&self, request: &ChatRequest) -> Result<ResolvedInput, ResolveInputError> {
        let content = request
            .last_user_content()
            .ok_or(DomainError::NoUserMessage)?;

        let text = match content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => self.resolve_parts(parts).await,
        };
        if text.trim().is_empty() {
            return Err(DomainError::EmptyUserText.into());
        }
        debug!("Resolved user query: {}", log_preview(&text, 100));

        let modalities = Modalities::from_requested(request.modalities.as_deref());
        Ok(ResolvedInput {
            query: self.settings.build_query(text, request.history()),
            modalities,
            audio_format: request.audio_format(&self.settings.default_audio_format),
            streaming: request.is_streaming(),
        })
    }

    async fn resolve_parts(&self, parts: &[ContentPart]) -> String {
        let mut collected = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                ContentPart::Typed(TypedPart::Text { text }) => {
                    if !text.is_empty() {
                        collected.push(text.clone());
                    }
                }
                ContentPart::Typed(TypedPart::InputAudio { input_audio }) => {
                    if let Some(transcript) = self.transcribe(input_audio).await {
                        collected.push(transcript);
                    }
                }
                ContentPart::Raw(value) => collected.push(value.to_string()),
            }
        }
        collected.join(" ").trim().to_string()
    }

    /// Audio parts without data contribute nothing.
    async fn transcribe(&self, input_audio: &InputAudio) -> Option<String> {
        let data = input_audio.data.as_deref().filter(|d| !d.is_empty())?;
        let format = input_audio
            .format
            .as_deref()
            .map(AudioFormat::new)
            .unwrap_or_else(|| self.settings.default_audio_format.clone());

        let bytes = match BASE64.decode(data) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Input audio is not valid base64: {}", e);
                return Some(UNTRANSCRIBABLE_AUDIO.to_string());
            }
        };

        match self.recognizer.transcribe(&bytes, &format).await {
            Ok(transcript) => Some(transcript),
            Err(e) => {
                warn!("{}", e);
                Some(UNTRANSCRIBABLE_AUDIO.to_string())
            }
        }
    }
}
