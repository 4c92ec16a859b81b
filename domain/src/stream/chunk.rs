//! Upstream chunk classification.
//!
//! The backend streams loosely specified lines: OpenAI-style delta chunks,
//! plain JSON result objects, or raw text. [`classify_line`] maps every line
//! onto an [`UpstreamChunk`] by running an ordered list of extraction tiers
//! over the decoded JSON. The first tier that matches wins and the last
//! resort (serializing the object back to text) always succeeds, so no line
//! is ever dropped.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Discriminator value of an OpenAI-style streaming delta chunk.
pub const DELTA_CHUNK_OBJECT: &str = "chat.completion.chunk";

/// Keys searched inside an object-valued `delta.content`, in priority order.
const NESTED_TEXT_KEYS: [&str; 4] = ["result", "answer", "response", "content"];
/// Top-level answer keys of a plain result object, in priority order.
const PRIMARY_TEXT_KEYS: [&str; 3] = ["response", "answer", "result"];
/// Secondary top-level keys, accepted when they hold a string.
const SECONDARY_TEXT_KEYS: [&str; 4] = ["text", "content", "message", "data"];

/// One classified line of upstream output.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamChunk {
    /// A text fragment.
    TextDelta { text: String },
    /// An opaque upstream audio object, forwarded without re-encoding.
    AudioDelta { payload: Value },
    /// A line that isn't a JSON object; its raw text is the content.
    Unparsed { raw_line: String },
}

impl UpstreamChunk {
    /// Text carried by this chunk. Unparsed lines count as literal text.
    pub fn text(&self) -> Option<&str> {
        match self {
            UpstreamChunk::TextDelta { text } => Some(text),
            UpstreamChunk::Unparsed { raw_line } => Some(raw_line),
            UpstreamChunk::AudioDelta { .. } => None,
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, UpstreamChunk::AudioDelta { .. })
    }

    fn text_delta(text: impl Into<String>) -> Self {
        UpstreamChunk::TextDelta { text: text.into() }
    }
}

/// Classify one upstream line. Never fails.
pub fn classify_line(line: &str) -> UpstreamChunk {
    match serde_json::from_str::<Value>(line) {
        Ok(value @ Value::Object(_)) => classify_value(&value),
        _ => UpstreamChunk::Unparsed {
            raw_line: line.to_string(),
        },
    }
}

/// An extraction tier: returns `Some` when it recognizes the object.
type Tier = fn(&Value) -> Option<UpstreamChunk>;

const TIERS: [(&str, Tier); 3] = [
    ("delta_chunk", delta_chunk_tier),
    ("primary_keys", primary_keys_tier),
    ("secondary_keys", secondary_keys_tier),
];

fn classify_value(value: &Value) -> UpstreamChunk {
    TIERS
        .iter()
        .find_map(|(_, tier)| tier(value))
        .unwrap_or_else(|| UpstreamChunk::text_delta(value.to_string()))
}

#[derive(Debug, Deserialize)]
struct DeltaChunk {
    object: String,
    #[serde(default)]
    choices: Vec<DeltaChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct DeltaChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    audio: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
}

/// `{"object":"chat.completion.chunk","choices":[{"delta":{...}}]}`
///
/// A delta chunk carrying neither audio nor usable content falls through to
/// the next tiers.
fn delta_chunk_tier(value: &Value) -> Option<UpstreamChunk> {
    let chunk = DeltaChunk::deserialize(value).ok()?;
    if chunk.object != DELTA_CHUNK_OBJECT {
        return None;
    }
    let delta = chunk.choices.into_iter().next().unwrap_or_default().delta;

    if let Some(audio) = delta.audio.filter(is_present) {
        return Some(UpstreamChunk::AudioDelta { payload: audio });
    }

    match delta.content? {
        Value::String(text) => Some(UpstreamChunk::text_delta(text)),
        Value::Object(content) => Some(UpstreamChunk::text_delta(
            first_present(&content, &NESTED_TEXT_KEYS)
                .unwrap_or_else(|| Value::Object(content.clone()).to_string()),
        )),
        _ => None,
    }
}

fn primary_keys_tier(value: &Value) -> Option<UpstreamChunk> {
    first_string(value.as_object()?, &PRIMARY_TEXT_KEYS).map(UpstreamChunk::text_delta)
}

fn secondary_keys_tier(value: &Value) -> Option<UpstreamChunk> {
    first_string(value.as_object()?, &SECONDARY_TEXT_KEYS).map(UpstreamChunk::text_delta)
}

/// First key holding a non-empty string.
fn first_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// First key holding any present value, rendered as text.
fn first_present(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| is_present(v))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

/// Null, `false`, and empty strings/arrays/objects count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(line: &str) -> String {
        classify_line(line).text().map(str::to_string).unwrap()
    }

    #[test]
    fn non_json_lines_are_kept_verbatim() {
        for line in ["hello world", "{not json", "[1, 2", "data: partial"] {
            let chunk = classify_line(line);
            assert_eq!(
                chunk,
                UpstreamChunk::Unparsed {
                    raw_line: line.to_string()
                }
            );
            assert_eq!(chunk.text(), Some(line));
        }
    }

    #[test]
    fn json_scalars_are_treated_as_raw_text() {
        assert_eq!(text_of("42"), "42");
        assert_eq!(text_of(r#""quoted""#), r#""quoted""#);
        assert_eq!(text_of("[1,2]"), "[1,2]");
    }

    #[test]
    fn delta_string_content() {
        let line = json!({
            "object": "chat.completion.chunk",
            "choices": [{"delta": {"content": "Hello"}}]
        })
        .to_string();
        assert_eq!(classify_line(&line), UpstreamChunk::text_delta("Hello"));
    }

    #[test]
    fn delta_audio_is_passed_through_unchanged() {
        let audio = json!({"id": "up-1", "data": "AAAA", "transcript": "hi"});
        let line = json!({
            "id": "upstream-id",
            "object": "chat.completion.chunk",
            "choices": [{"delta": {"audio": audio.clone(), "content": "ignored"}}]
        })
        .to_string();
        let chunk = classify_line(&line);
        assert!(chunk.is_audio());
        assert_eq!(chunk, UpstreamChunk::AudioDelta { payload: audio });
    }

    #[test]
    fn delta_object_content_uses_priority_keys() {
        let line = json!({
            "object": "chat.completion.chunk",
            "choices": [{"delta": {"content": {"response": "r", "result": "first", "answer": "a"}}}]
        })
        .to_string();
        assert_eq!(text_of(&line), "first");

        let line = json!({
            "object": "chat.completion.chunk",
            "choices": [{"delta": {"content": {"content": "inner"}}}]
        })
        .to_string();
        assert_eq!(text_of(&line), "inner");
    }

    #[test]
    fn delta_object_without_known_keys_is_serialized() {
        let line = json!({
            "object": "chat.completion.chunk",
            "choices": [{"delta": {"content": {"foo": "bar"}}}]
        })
        .to_string();
        assert_eq!(text_of(&line), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn delta_without_content_falls_through_to_object_text() {
        let value = json!({
            "object": "chat.completion.chunk",
            "choices": [{"delta": {"role": "assistant"}}]
        });
        assert_eq!(text_of(&value.to_string()), value.to_string());
    }

    #[test]
    fn plain_result_object_uses_primary_keys() {
        assert_eq!(text_of(r#"{"answer":"a","response":"r"}"#), "r");
        assert_eq!(text_of(r#"{"result":"done","text":"t"}"#), "done");
    }

    #[test]
    fn secondary_keys_require_strings() {
        assert_eq!(text_of(r#"{"message":"m","data":"d"}"#), "m");
        assert_eq!(text_of(r#"{"text":5,"data":"d"}"#), "d");
    }

    #[test]
    fn unknown_object_is_serialized() {
        assert_eq!(text_of(r#"{"references":[1]}"#), r#"{"references":[1]}"#);
    }

    #[test]
    fn other_object_discriminator_is_not_a_delta() {
        let line = r#"{"object":"chat.completion","choices":[{"delta":{"content":"x"}}],"response":"r"}"#;
        assert_eq!(text_of(line), "r");
    }
}
