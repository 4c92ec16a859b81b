//! Configuration file loading for ragcast
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `RAGCAST_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./ragcast.toml` or `./.ragcast.toml`
//! 4. Global: `$XDG_CONFIG_HOME/ragcast/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_QUERY_URL, FileConfig, FileLoggingConfig, FileServerConfig, FileSpeechConfig,
    FileStreamingConfig, FileUpstreamConfig,
};
pub use loader::ConfigLoader;
