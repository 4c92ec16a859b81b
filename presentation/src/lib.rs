//! Presentation layer for ragcast
//!
//! This crate contains the CLI definition, the HTTP routes and the SSE wire
//! format spoken to clients.

pub mod cli;
pub mod http;
pub mod sse;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, AppState, create_router};
pub use sse::{DONE_SENTINEL, frame_payload, to_sse_event};
