//! Upstream backend client.

mod gateway;
mod lines;

pub use gateway::{API_KEY_HEADER, HttpGatewayConfig, HttpUpstreamGateway};
pub use lines::LineSplitter;
