//! Application layer for ragcast
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RequestSettings, StreamingParams};
pub use ports::{
    event_sink::{ClientDisconnected, EmitStats, EventSink},
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
    speech::{SpeechError, SpeechRecognizer, SpeechSynthesizer},
    upstream_gateway::{UpstreamError, UpstreamGateway, UpstreamLines},
};
pub use use_cases::complete_chat::{CompleteChatError, CompleteChatUseCase};
pub use use_cases::resolve_input::{
    ResolveInputError, ResolveInputUseCase, ResolvedInput, UNTRANSCRIBABLE_AUDIO,
};
pub use use_cases::stream_chat::{
    StreamChatInput, StreamChatUseCase, StreamOutcome, StreamReport,
};
pub use use_cases::synthesize::{SpeechSource, SynthesisPipeline};
