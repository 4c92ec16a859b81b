//! Answer extraction from backend response bodies.

use serde_json::Value;

/// Top-level keys that hold the answer text, in priority order.
pub const ANSWER_KEYS: [&str; 3] = ["response", "answer", "result"];

/// The answer text under one of [`ANSWER_KEYS`], if the body is a JSON object
/// carrying a non-empty string there.
pub fn primary_answer(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => answer_field(&value).map(str::to_string),
        Err(_) => None,
    }
}

/// Extract the answer from a complete backend response body.
///
/// Falls back to the serialized JSON when no answer key is present, and to
/// the raw body when it isn't JSON at all. Never returns less than the body
/// carried.
pub fn extract_answer(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => answer_field(&value)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        Err(_) => body.trim().to_string(),
    }
}

fn answer_field(value: &Value) -> Option<&str> {
    let map = value.as_object()?;
    ANSWER_KEYS
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_key_wins() {
        assert_eq!(
            extract_answer(r#"{"answer":"b","response":"a"}"#),
            "a".to_string()
        );
    }

    #[test]
    fn empty_strings_are_skipped() {
        assert_eq!(extract_answer(r#"{"response":"","result":"c"}"#), "c");
    }

    #[test]
    fn unknown_object_is_serialized() {
        assert_eq!(extract_answer(r#"{"foo":1}"#), r#"{"foo":1}"#);
        assert_eq!(primary_answer(r#"{"foo":1}"#), None);
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        assert_eq!(extract_answer("plain answer\n"), "plain answer");
        assert_eq!(primary_answer("plain answer"), None);
    }

    #[test]
    fn primary_answer_reads_known_keys() {
        assert_eq!(
            primary_answer(r#"{"result":"done"}"#),
            Some("done".to_string())
        );
    }
}
