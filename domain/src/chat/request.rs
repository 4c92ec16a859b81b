//! Chat request model.
//!
//! Clients send OpenAI-style chat requests. Message content may be a plain
//! string or a list of typed parts, where `input_audio` parts carry base64
//! audio that has to be transcribed before it can be queried.

use crate::speech::AudioFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat request as received from the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Absent means streaming.
    #[serde(default)]
    pub stream: Option<bool>,
    /// Requested output modalities, e.g. `["text", "audio"]`.
    #[serde(default)]
    pub modalities: Option<Vec<String>>,
    #[serde(default)]
    pub audio: Option<AudioOptions>,
}

impl ChatRequest {
    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(true)
    }

    /// Content of the last message whose role is `user` (case-insensitive).
    pub fn last_user_content(&self) -> Option<&MessageContent> {
        self.last_user_index().map(|idx| &self.messages[idx].content)
    }

    /// Plain-text turns preceding the last user message.
    ///
    /// Messages whose content is not a plain string are skipped.
    pub fn history(&self) -> Vec<HistoryTurn> {
        let end = self.last_user_index().unwrap_or(self.messages.len());
        self.messages[..end]
            .iter()
            .filter_map(|m| match &m.content {
                MessageContent::Text(text) if !text.trim().is_empty() => Some(HistoryTurn {
                    role: m.role.to_lowercase(),
                    content: text.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// The requested audio format, or `default` when the client sent none.
    pub fn audio_format(&self, default: &AudioFormat) -> AudioFormat {
        self.audio
            .as_ref()
            .and_then(|a| a.format.as_deref())
            .filter(|f| !f.trim().is_empty())
            .map(AudioFormat::new)
            .unwrap_or_else(|| default.clone())
    }

    fn last_user_index(&self) -> Option<usize> {
        self.messages
            .iter()
            .rposition(|m| m.role.eq_ignore_ascii_case("user"))
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }
}

/// Message content: a plain string or a list of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One element of a multi-part message.
///
/// Parts that don't match a known shape are kept as raw JSON so they can
/// still be rendered into the query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Typed(TypedPart),
    Raw(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedPart {
    Text {
        #[serde(default)]
        text: String,
    },
    InputAudio { input_audio: InputAudio },
}

/// Inline audio attached to a user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputAudio {
    /// Base64 encoded audio bytes.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Audio output options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioOptions {
    #[serde(default)]
    pub format: Option<String>,
}

/// One prior conversation turn forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}
