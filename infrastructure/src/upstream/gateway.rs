//! HTTP gateway to the retrieval backend.
//!
//! Implements [`UpstreamGateway`] with `reqwest`. The query endpoint is
//! bounded by an overall timeout; the stream endpoint only by a connect
//! timeout, since a generation may legitimately take a long time.

use super::lines::LineSplitter;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use ragcast_application::{UpstreamError, UpstreamGateway, UpstreamLines};
use ragcast_domain::UpstreamQuery;
use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Header carrying the backend API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Connection settings for [`HttpUpstreamGateway`].
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    pub query_url: String,
    pub stream_url: String,
    pub api_key: Option<String>,
    /// Overall timeout of a non-streaming query.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

/// `reqwest` based upstream gateway.
pub struct HttpUpstreamGateway {
    client: reqwest::Client,
    config: HttpGatewayConfig,
}

impl HttpUpstreamGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }

    fn post(&self, url: &str, query: &UpstreamQuery) -> reqwest::RequestBuilder {
        let request = self.client.post(url).json(query);
        match &self.config.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, UpstreamError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl UpstreamGateway for HttpUpstreamGateway {
    async fn query(&self, query: &UpstreamQuery) -> Result<String, UpstreamError> {
        debug!("POST {}", self.config.query_url);
        let request = self
            .post(&self.config.query_url, query)
            .timeout(self.config.timeout);
        let response = self.send(request).await?;
        response.text().await.map_err(transport_error)
    }

    async fn open_stream(&self, query: &UpstreamQuery) -> Result<UpstreamLines, UpstreamError> {
        debug!("POST {} (stream)", self.config.stream_url);
        let response = self.send(self.post(&self.config.stream_url, query)).await?;
        Ok(body_lines(response.bytes_stream()))
    }
}

fn transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Unavailable(error.to_string())
    }
}

struct LineState<S> {
    bytes: Pin<Box<S>>,
    splitter: LineSplitter,
    ready: VecDeque<String>,
    done: bool,
}

/// Frame a response body into lines. A read error ends the stream after
/// being reported once.
fn body_lines<S, B>(bytes: S) -> UpstreamLines
where
    S: Stream<Item = Result<B, reqwest::Error>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = LineState {
        bytes: Box::pin(bytes),
        splitter: LineSplitter::new(),
        ready: VecDeque::new(),
        done: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(line) = state.ready.pop_front() {
                return Some((Ok(line), state));
            }
            if state.done {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(chunk)) => state.ready.extend(state.splitter.feed(chunk.as_ref())),
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(UpstreamError::Interrupted(e.to_string())), state));
                }
                None => {
                    state.done = true;
                    state.ready.extend(state.splitter.finish());
                }
            }
        }
    })
    .boxed()
}
