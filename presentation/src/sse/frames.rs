//! Wire frames.
//!
//! Each [`OutputEvent`] becomes exactly one SSE `data:` frame. Text and
//! audio share the OpenAI chunk envelope; the terminal event is the literal
//! `[DONE]` sentinel. No buffering happens here.

use axum::response::sse::Event;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ragcast_domain::OutputEvent;
use serde::Serialize;
use serde_json::Value;

/// Payload of the terminal frame.
pub const DONE_SENTINEL: &str = "[DONE]";

const CHUNK_OBJECT: &str = "chat.completion.chunk";

#[derive(Serialize)]
struct ChunkFrame<'a> {
    id: &'a str,
    object: &'static str,
    choices: [ChunkChoice<'a>; 1],
}

#[derive(Serialize)]
struct ChunkChoice<'a> {
    delta: Delta<'a>,
}

#[derive(Serialize)]
enum Delta<'a> {
    #[serde(rename = "content")]
    Content(&'a str),
    #[serde(rename = "audio")]
    Audio { id: &'a str, data: String },
    /// Upstream audio objects are forwarded untouched.
    #[serde(rename = "audio")]
    Passthrough(&'a Value),
}

impl<'a> ChunkFrame<'a> {
    fn new(id: &'a str, delta: Delta<'a>) -> Self {
        Self {
            id,
            object: CHUNK_OBJECT,
            choices: [ChunkChoice { delta }],
        }
    }
}

/// The `data:` payload of the frame for `event`.
pub fn frame_payload(event: &OutputEvent) -> String {
    let frame = match event {
        OutputEvent::TextChunk { stream_id, text } => {
            ChunkFrame::new(stream_id.as_str(), Delta::Content(text))
        }
        OutputEvent::AudioChunk {
            stream_id,
            audio_id,
            data,
        } => ChunkFrame::new(
            stream_id.as_str(),
            Delta::Audio {
                id: audio_id,
                data: BASE64.encode(data),
            },
        ),
        OutputEvent::AudioPassthrough { stream_id, audio } => {
            ChunkFrame::new(stream_id.as_str(), Delta::Passthrough(audio))
        }
        OutputEvent::Terminal => return DONE_SENTINEL.to_string(),
    };
    // Serializing borrowed strings and JSON values can't fail.
    serde_json::to_string(&frame).unwrap_or_default()
}

/// Convert an event into an axum SSE event.
pub fn to_sse_event(event: &OutputEvent) -> Event {
    Event::default().data(frame_payload(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragcast_domain::StreamId;
    use serde_json::json;

    fn parse(event: &OutputEvent) -> Value {
        serde_json::from_str(&frame_payload(event)).unwrap()
    }

    #[test]
    fn test_text_frame() {
        let id = StreamId::new("s1");
        assert_eq!(
            parse(&OutputEvent::text(&id, "Hello world.")),
            json!({
                "id": "s1",
                "object": "chat.completion.chunk",
                "choices": [{"delta": {"content": "Hello world."}}]
            })
        );
    }

    #[test]
    fn test_audio_frame() {
        let id = StreamId::new("s1");
        assert_eq!(
            parse(&OutputEvent::audio(&id, b"hi".to_vec())),
            json!({
                "id": "s1",
                "object": "chat.completion.chunk",
                "choices": [{"delta": {"audio": {"id": "s1-audio", "data": "aGk="}}}]
            })
        );
    }

    #[test]
    fn test_passthrough_frame_keeps_payload() {
        let event = OutputEvent::AudioPassthrough {
            stream_id: StreamId::new("s1"),
            audio: json!({"id": "upstream", "data": "AAA=", "transcript": "x"}),
        };
        let frame = parse(&event);
        assert_eq!(frame["id"], "s1");
        assert_eq!(
            frame["choices"][0]["delta"]["audio"],
            json!({"id": "upstream", "data": "AAA=", "transcript": "x"})
        );
    }

    #[test]
    fn test_terminal_frame() {
        assert_eq!(frame_payload(&OutputEvent::Terminal), "[DONE]");
    }
}
