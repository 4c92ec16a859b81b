//! Shared router state.

use ragcast_application::{CompleteChatUseCase, ResolveInputUseCase, StreamChatUseCase};
use std::sync::Arc;

/// Use cases shared by all requests. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub resolve_input: Arc<ResolveInputUseCase>,
    pub complete_chat: Arc<CompleteChatUseCase>,
    pub stream_chat: Arc<StreamChatUseCase>,
    /// Events buffered per streaming session.
    pub channel_capacity: usize,
}

impl AppState {
    pub fn new(
        resolve_input: ResolveInputUseCase,
        complete_chat: CompleteChatUseCase,
        stream_chat: StreamChatUseCase,
    ) -> Self {
        Self {
            resolve_input: Arc::new(resolve_input),
            complete_chat: Arc::new(complete_chat),
            stream_chat: Arc::new(stream_chat),
            channel_capacity: 64,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}
