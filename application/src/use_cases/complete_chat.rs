//! Complete Chat use case.
//!
//! The non-streaming path: one backend query, one complete response object.
//! No classification or segmentation is involved.

use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use crate::ports::upstream_gateway::{UpstreamError, UpstreamGateway};
use ragcast_domain::util::log_preview;
use ragcast_domain::{ChatCompletion, UpstreamQuery, extract_answer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CompleteChatError {
    #[error("{}", .0.describe())]
    Upstream(#[from] UpstreamError),
}

pub struct CompleteChatUseCase {
    gateway: Arc<dyn UpstreamGateway>,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl CompleteChatUseCase {
    pub fn new(gateway: Arc<dyn UpstreamGateway>) -> Self {
        Self {
            gateway,
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        query: &UpstreamQuery,
    ) -> Result<ChatCompletion, CompleteChatError> {
        info!("Completion request: {}", log_preview(&query.query, 100));

        let body = self.gateway.query(query).await.inspect_err(|e| {
            warn!("Completion failed: {}", e.describe());
        })?;
        let answer = extract_answer(&body);

        self.exchange_logger.log(ExchangeEvent::new(
            "completion",
            serde_json::json!({
                "query": query.query,
                "bytes": answer.len(),
            }),
        ));
        Ok(ChatCompletion::from_answer(answer))
    }
}
