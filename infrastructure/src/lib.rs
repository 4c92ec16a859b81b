//! Infrastructure layer for ragcast
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod speech;
pub mod upstream;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileServerConfig, FileSpeechConfig,
    FileStreamingConfig, FileUpstreamConfig,
};
pub use logging::JsonlExchangeLogger;
pub use speech::{PlaceholderRecognizer, PlaceholderSynthesizer};
pub use upstream::{HttpGatewayConfig, HttpUpstreamGateway};

