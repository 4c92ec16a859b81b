//! Upstream query payload.

use super::request::HistoryTurn;
use serde::{Deserialize, Serialize};

/// Default retrieval mode understood by the backend.
pub const DEFAULT_QUERY_MODE: &str = "mix";

/// Request body for both the query and the streaming endpoint of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamQuery {
    pub query: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<HistoryTurn>>,
    pub include_references: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
}

impl UpstreamQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mode: DEFAULT_QUERY_MODE.to_string(),
            conversation_history: None,
            include_references: false,
            response_type: None,
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_references(mut self, include: bool) -> Self {
        self.include_references = include;
        self
    }

    /// Attach prior turns; an empty history is left out of the payload.
    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.conversation_history = if history.is_empty() {
            None
        } else {
            Some(history)
        };
        self
    }

    pub fn with_response_type(mut self, response_type: impl Into<String>) -> Self {
        self.response_type = Some(response_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_omits_optional_fields() {
        let value = serde_json::to_value(UpstreamQuery::new("what is rust")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"query": "what is rust", "mode": "mix", "include_references": false})
        );
    }

    #[test]
    fn builder_sets_optional_fields() {
        let query = UpstreamQuery::new("q")
            .with_mode("local")
            .with_references(true)
            .with_response_type("Single Paragraph")
            .with_history(vec![HistoryTurn {
                role: "user".to_string(),
                content: "earlier".to_string(),
            }]);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["mode"], "local");
        assert_eq!(value["include_references"], true);
        assert_eq!(value["response_type"], "Single Paragraph");
        assert_eq!(value["conversation_history"][0]["content"], "earlier");
    }

    #[test]
    fn empty_history_is_dropped() {
        let query = UpstreamQuery::new("q").with_history(vec![]);
        assert!(query.conversation_history.is_none());
    }
}
