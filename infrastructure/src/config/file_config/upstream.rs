//! Upstream backend configuration from TOML (`[upstream]` section)

use crate::upstream::HttpGatewayConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default non-streaming query endpoint of the backend.
pub const DEFAULT_QUERY_URL: &str = "http://localhost:9621/query";

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    /// Non-streaming query endpoint
    pub query_url: String,
    /// Streaming endpoint; derived from `query_url` when unset
    pub stream_url: Option<String>,
    /// API key sent as `X-API-Key`
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset
    pub api_key_env: String,
    /// Overall timeout for non-streaming queries
    pub timeout_seconds: u64,
    /// Connect timeout for both endpoints
    pub connect_timeout_seconds: u64,
    /// Retrieval mode
    pub mode: String,
    pub include_references: bool,
    /// Send earlier plain-text turns as conversation history
    pub forward_history: bool,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            query_url: DEFAULT_QUERY_URL.to_string(),
            stream_url: None,
            api_key: None,
            api_key_env: "LIGHTRAG_API_KEY".to_string(),
            timeout_seconds: 60,
            connect_timeout_seconds: 10,
            mode: "mix".to_string(),
            include_references: false,
            forward_history: false,
        }
    }
}

impl FileUpstreamConfig {
    /// Streaming endpoint: the explicit `stream_url`, or `<query_url>/stream`.
    pub fn resolved_stream_url(&self) -> String {
        match self.stream_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("{}/stream", self.query_url.trim_end_matches('/')),
        }
    }

    /// API key from config, falling back to the `api_key_env` variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Connection settings for the HTTP gateway.
    pub fn gateway_config(&self) -> HttpGatewayConfig {
        HttpGatewayConfig {
            query_url: self.query_url.trim().to_string(),
            stream_url: self.resolved_stream_url(),
            api_key: self.resolved_api_key(),
            timeout: self.timeout(),
            connect_timeout: self.connect_timeout(),
        }
    }
}
