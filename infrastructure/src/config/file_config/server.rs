//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Raw listener configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Interface to bind
    pub host: String,
    pub port: u16,
    /// Events buffered per session between the orchestrator and the client
    pub channel_capacity: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            channel_capacity: 64,
        }
    }
}

impl FileServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let config = FileServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_server_deserialize() {
        let toml_str = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.server.channel_capacity, 64);
    }
}
