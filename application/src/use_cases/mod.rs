//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod complete_chat;
pub mod resolve_input;
pub mod stream_chat;
pub mod synthesize;
