//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application settings.

mod logging;
mod server;
mod speech;
mod streaming;
mod upstream;

pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;
pub use speech::FileSpeechConfig;
pub use streaming::FileStreamingConfig;
pub use upstream::{DEFAULT_QUERY_URL, FileUpstreamConfig};

use ragcast_application::{RequestSettings, StreamingParams};
use ragcast_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener
    pub server: FileServerConfig,
    /// Retrieval backend
    pub upstream: FileUpstreamConfig,
    /// Session segmentation and pacing
    pub streaming: FileStreamingConfig,
    pub speech: FileSpeechConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Empty endpoint URLs
    /// 2. Zero-valued sizes, capacities and timeouts
    /// 3. Enum parse failures (`streaming.text_with_audio`)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Endpoints
        if self.upstream.query_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "upstream.query_url".to_string(),
                },
                "upstream.query_url: must not be empty",
            ));
        }

        // 2. Sizes
        issues.extend(self.streaming.size_issues());
        for (field, value) in [
            ("server.channel_capacity", self.server.channel_capacity as u64),
            ("upstream.timeout_seconds", self.upstream.timeout_seconds),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroValue {
                        field: field.to_string(),
                    },
                    format!("{}: must be greater than zero", field),
                ));
            }
        }

        // 3. Enums
        issues.extend(self.streaming.parse_text_with_audio().1);

        issues
    }

    /// Streaming parameters for the orchestrator.
    pub fn streaming_params(&self) -> StreamingParams {
        self.streaming.to_params().0
    }

    /// How client requests become backend queries.
    pub fn request_settings(&self) -> RequestSettings {
        RequestSettings::default()
            .with_mode(self.upstream.mode.clone())
            .with_references(self.upstream.include_references)
            .with_forward_history(self.upstream.forward_history)
            .with_default_audio_format(self.speech.audio_format())
    }
}
