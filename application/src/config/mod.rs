//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`StreamingParams`]: segmentation, pacing and synthesis of a streaming session
//! - [`RequestSettings`]: how client input is turned into a backend query

pub mod request_settings;
pub mod streaming_params;

pub use request_settings::RequestSettings;
pub use streaming_params::StreamingParams;
