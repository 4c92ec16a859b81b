//! Client-facing chat request/response shapes and the upstream query payload.
//!
//! - [`request::ChatRequest`]: OpenAI-style chat request accepted from clients
//! - [`completion::ChatCompletion`]: the strict non-streaming response body
//! - [`query::UpstreamQuery`]: payload sent to the retrieval backend
//! - [`answer`]: answer extraction from backend response bodies

pub mod answer;
pub mod completion;
pub mod query;
pub mod request;
