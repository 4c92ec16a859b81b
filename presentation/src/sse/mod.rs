//! Server-sent event output.

pub mod frames;

pub use frames::{DONE_SENTINEL, frame_payload, to_sse_event};
