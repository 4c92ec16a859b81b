//! Structured configuration issues.
//!
//! Configuration loaders report problems as a list of [`ConfigIssue`]s rather
//! than failing on the first one, so the binary can print everything wrong at
//! once and decide whether to start.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required value is empty.
    EmptyValue { field: String },
    /// A numeric value must be greater than zero.
    ZeroValue { field: String },
    /// A string value is not one of the accepted values.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        let err = ConfigIssue::error(
            ConfigIssueCode::ZeroValue {
                field: "streaming.audio_chunk_bytes".to_string(),
            },
            "must be > 0",
        );
        assert!(err.is_error());

        let warn = ConfigIssue::warning(
            ConfigIssueCode::EmptyValue {
                field: "x".to_string(),
            },
            "empty",
        );
        assert!(!warn.is_error());
        assert_eq!(warn.message, "empty");
    }
}
