//! Port for structured exchange logging.
//!
//! Defines the [`ExchangeLogger`] trait for recording session milestones
//! (stream started, fell back, completed) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps one machine-readable
//! record per milestone (JSONL).

use serde_json::Value;

/// A structured exchange event for logging.
pub struct ExchangeEvent {
    /// Event type identifier (e.g., "stream_started", "completion").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExchangeEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging exchange events.
///
/// `log` is synchronous and non-fallible; logging failures never affect the
/// response.
pub trait ExchangeLogger: Send + Sync {
    fn log(&self, event: ExchangeEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExchangeLogger;

impl ExchangeLogger for NoExchangeLogger {
    fn log(&self, _event: ExchangeEvent) {}
}
