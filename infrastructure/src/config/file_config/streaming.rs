//! Streaming configuration from TOML (`[streaming]` section)

use ragcast_application::StreamingParams;
use ragcast_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use ragcast_domain::TextWithAudioPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw streaming configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStreamingConfig {
    pub flush_word_threshold: usize,
    pub fallback_words_per_chunk: usize,
    /// Delay between replayed fallback chunks, in milliseconds
    pub fallback_pacing_ms: u64,
    pub audio_chunk_bytes: usize,
    /// "suppress" or "live"
    pub text_with_audio: String,
    pub requery_for_speech: bool,
}

impl Default for FileStreamingConfig {
    fn default() -> Self {
        let params = StreamingParams::default();
        Self {
            flush_word_threshold: params.flush_word_threshold,
            fallback_words_per_chunk: params.fallback_words_per_chunk,
            fallback_pacing_ms: params.fallback_pacing.as_millis() as u64,
            audio_chunk_bytes: params.audio_chunk_bytes,
            text_with_audio: "suppress".to_string(),
            requery_for_speech: params.requery_for_speech,
        }
    }
}

impl FileStreamingConfig {
    /// Parse text_with_audio string into TextWithAudioPolicy enum
    ///
    /// Accepts: "suppress", "live"
    pub fn parse_text_with_audio(&self) -> (TextWithAudioPolicy, Vec<ConfigIssue>) {
        match self.text_with_audio.parse::<TextWithAudioPolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "streaming.text_with_audio".to_string(),
                        value: self.text_with_audio.clone(),
                        valid_values: vec!["suppress".to_string(), "live".to_string()],
                    },
                    format!(
                        "streaming.text_with_audio: unknown value '{}', falling back to 'suppress'",
                        self.text_with_audio
                    ),
                );
                (TextWithAudioPolicy::default(), vec![issue])
            }
        }
    }

    /// Zero-valued sizes are errors.
    pub fn size_issues(&self) -> Vec<ConfigIssue> {
        [
            ("streaming.flush_word_threshold", self.flush_word_threshold),
            (
                "streaming.fallback_words_per_chunk",
                self.fallback_words_per_chunk,
            ),
            ("streaming.audio_chunk_bytes", self.audio_chunk_bytes),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: field.to_string(),
                },
                format!("{}: must be greater than zero", field),
            )
        })
        .collect()
    }

    /// Convert to application parameters.
    pub fn to_params(&self) -> (StreamingParams, Vec<ConfigIssue>) {
        let (policy, issues) = self.parse_text_with_audio();
        let params = StreamingParams::default()
            .with_flush_word_threshold(self.flush_word_threshold)
            .with_fallback_words_per_chunk(self.fallback_words_per_chunk)
            .with_fallback_pacing(Duration::from_millis(self.fallback_pacing_ms))
            .with_audio_chunk_bytes(self.audio_chunk_bytes)
            .with_text_with_audio(policy)
            .with_requery_for_speech(self.requery_for_speech);
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_defaults() {
        let config = FileStreamingConfig::default();
        assert_eq!(config.flush_word_threshold, 12);
        assert_eq!(config.fallback_words_per_chunk, 6);
        assert_eq!(config.fallback_pacing_ms, 20);
        assert_eq!(config.audio_chunk_bytes, 1024);
        assert_eq!(config.text_with_audio, "suppress");
        assert!(config.size_issues().is_empty());
    }

    #[test]
    fn test_live_policy() {
        let config = FileStreamingConfig {
            text_with_audio: "Live".to_string(),
            fallback_pacing_ms: 0,
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert!(issues.is_empty());
        assert_eq!(params.text_with_audio, TextWithAudioPolicy::Live);
        assert_eq!(params.fallback_pacing, Duration::ZERO);
    }

    #[test]
    fn test_unknown_policy_warns() {
        let config = FileStreamingConfig {
            text_with_audio: "both".to_string(),
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.text_with_audio, TextWithAudioPolicy::Suppress);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "streaming.text_with_audio"
        ));
    }

    #[test]
    fn test_zero_sizes_are_errors() {
        let config = FileStreamingConfig {
            flush_word_threshold: 0,
            audio_chunk_bytes: 0,
            ..Default::default()
        };
        let issues = config.size_issues();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
