//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod event_sink;
pub mod exchange_logger;
pub mod speech;
pub mod upstream_gateway;
