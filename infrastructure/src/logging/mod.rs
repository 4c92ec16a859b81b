//! Logging infrastructure: structured exchange logging.
//!
//! Provides [`JsonlExchangeLogger`], a JSONL file writer that implements
//! the [`ExchangeLogger`](ragcast_application::ExchangeLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlExchangeLogger;
