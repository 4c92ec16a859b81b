//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ragcast
#[derive(Parser, Debug)]
#[command(name = "ragcast")]
#[command(author, version, about = "Streaming chat-completions front end for a RAG backend")]
#[command(long_about = r#"
ragcast serves OpenAI-style chat completions on top of a retrieval-augmented
generation backend. Streaming requests are answered as server-sent events
with text and optional audio deltas; when the backend's streaming endpoint is
unavailable the answer is fetched in one piece and replayed in chunks.

Configuration is loaded from (in priority order):
1. RAGCAST_<SECTION>__<KEY>              Environment variables
2. --config <path>                       Explicit config file
3. ./ragcast.toml                        Project-level config
4. ~/.config/ragcast/config.toml         Global config

Example:
  ragcast --port 8080 -v
  RAGCAST_UPSTREAM__QUERY_URL=http://rag:9621/query ragcast
"#)]
pub struct Cli {
    /// Interface to bind (overrides [server].host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides [server].port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ragcast"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "ragcast", "--host", "127.0.0.1", "-p", "9000", "-vv", "--config", "x.toml",
        ]);
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
