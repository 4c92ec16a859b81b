//! Upstream gateway port
//!
//! Defines the interface for talking to the retrieval backend.

use async_trait::async_trait;
use futures::stream::BoxStream;
use ragcast_domain::UpstreamQuery;
use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Connection or transport failure before a response arrived.
    #[error("{0}")]
    Unavailable(String),

    /// The backend answered with a non-success status.
    #[error("{status} {body}")]
    Status { status: u16, body: String },

    #[error("timed out")]
    Timeout,

    /// The response stream broke after it had started.
    #[error("stream interrupted: {0}")]
    Interrupted(String),
}

impl UpstreamError {
    /// Message for a failure to get any answer (transport level).
    ///
    /// Status errors read `Upstream error: <status> <body>`, everything
    /// else `Upstream request failed: <cause>`.
    pub fn describe(&self) -> String {
        match self {
            UpstreamError::Status { .. } => format!("Upstream error: {}", self),
            _ => format!("Upstream request failed: {}", self),
        }
    }

    /// Short form used inside a stream, where the body is not repeated.
    pub fn describe_brief(&self) -> String {
        match self {
            UpstreamError::Status { status, .. } => format!("Upstream error: {}", status),
            _ => self.describe(),
        }
    }
}

/// Lines of a streaming backend response, in arrival order.
pub type UpstreamLines = BoxStream<'static, Result<String, UpstreamError>>;

/// Gateway to the retrieval-augmented-generation backend.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    /// Issue one non-streaming query and return the raw response body.
    ///
    /// Non-success statuses are reported as [`UpstreamError::Status`].
    async fn query(&self, query: &UpstreamQuery) -> Result<String, UpstreamError>;

    /// Open the streaming endpoint.
    ///
    /// Fails before any line is produced when the connection can't be made
    /// or the backend answers with a non-success status. Dropping the
    /// returned stream releases the connection.
    async fn open_stream(&self, query: &UpstreamQuery) -> Result<UpstreamLines, UpstreamError>;
}
