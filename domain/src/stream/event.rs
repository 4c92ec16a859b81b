//! Client-facing output events.

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of one client stream, stable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of the synthesized audio track, distinct from text events.
    pub fn audio_track_id(&self) -> String {
        format!("{}-audio", self.0)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One wire-level unit sent to the client.
///
/// Every session ends with exactly one [`OutputEvent::Terminal`].
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    TextChunk {
        stream_id: StreamId,
        text: String,
    },
    /// A slice of locally synthesized audio (raw bytes; encoded on the wire).
    AudioChunk {
        stream_id: StreamId,
        audio_id: String,
        data: Vec<u8>,
    },
    /// An upstream audio object forwarded as-is under this session's id.
    AudioPassthrough { stream_id: StreamId, audio: Value },
    Terminal,
}

impl OutputEvent {
    pub fn text(stream_id: &StreamId, text: impl Into<String>) -> Self {
        OutputEvent::TextChunk {
            stream_id: stream_id.clone(),
            text: text.into(),
        }
    }

    pub fn audio(stream_id: &StreamId, data: impl Into<Vec<u8>>) -> Self {
        OutputEvent::AudioChunk {
            stream_id: stream_id.clone(),
            audio_id: stream_id.audio_track_id(),
            data: data.into(),
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            OutputEvent::TextChunk { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(
            self,
            OutputEvent::AudioChunk { .. } | OutputEvent::AudioPassthrough { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OutputEvent::Terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(StreamId::generate(), StreamId::generate());
    }

    #[test]
    fn audio_track_id_is_suffixed() {
        let id = StreamId::new("abc");
        assert_eq!(id.audio_track_id(), "abc-audio");
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn event_helpers() {
        let id = StreamId::new("s1");
        let text = OutputEvent::text(&id, "hi");
        assert_eq!(text.text_content(), Some("hi"));
        assert!(!text.is_audio());

        let audio = OutputEvent::audio(&id, vec![1u8, 2, 3]);
        assert!(audio.is_audio());
        match audio {
            OutputEvent::AudioChunk { audio_id, data, .. } => {
                assert_eq!(audio_id, "s1-audio");
                assert_eq!(data, vec![1, 2, 3]);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        assert!(OutputEvent::Terminal.is_terminal());
        assert!(!OutputEvent::Terminal.is_audio());
    }
}
