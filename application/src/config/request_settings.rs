//! Request settings: how client input becomes a backend query.

use ragcast_domain::chat::query::DEFAULT_QUERY_MODE;
use ragcast_domain::{AudioFormat, HistoryTurn, UpstreamQuery};
use serde::{Deserialize, Serialize};

/// Backend query options applied to every session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSettings {
    /// Retrieval mode sent to the backend.
    pub mode: String,
    pub include_references: bool,
    /// Forward plain-text turns before the last user message.
    pub forward_history: bool,
    /// Audio format used when the client doesn't name one.
    pub default_audio_format: AudioFormat,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            mode: DEFAULT_QUERY_MODE.to_string(),
            include_references: false,
            forward_history: false,
            default_audio_format: AudioFormat::default(),
        }
    }
}

impl RequestSettings {
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_references(mut self, include: bool) -> Self {
        self.include_references = include;
        self
    }

    pub fn with_forward_history(mut self, forward: bool) -> Self {
        self.forward_history = forward;
        self
    }

    pub fn with_default_audio_format(mut self, format: AudioFormat) -> Self {
        self.default_audio_format = format;
        self
    }

    /// Build the backend query for `text`.
    pub fn build_query(&self, text: impl Into<String>, history: Vec<HistoryTurn>) -> UpstreamQuery {
        let query = UpstreamQuery::new(text)
            .with_mode(self.mode.clone())
            .with_references(self.include_references);
        if self.forward_history {
            query.with_history(history)
        } else {
            query
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> HistoryTurn {
        HistoryTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_default_query() {
        let query = RequestSettings::default().build_query("hi", vec![turn("user", "earlier")]);
        assert_eq!(query.query, "hi");
        assert_eq!(query.mode, "mix");
        assert!(!query.include_references);
        assert!(query.conversation_history.is_none());
    }

    #[test]
    fn test_forward_history() {
        let settings = RequestSettings::default()
            .with_mode("local")
            .with_forward_history(true);
        let query = settings.build_query("hi", vec![turn("assistant", "hello")]);
        assert_eq!(query.mode, "local");
        assert_eq!(
            query.conversation_history,
            Some(vec![turn("assistant", "hello")])
        );
    }
}
