//! CLI entrypoint for ragcast
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use ragcast_application::{
    CompleteChatUseCase, ExchangeLogger, NoExchangeLogger, ResolveInputUseCase, StreamChatUseCase,
};
use ragcast_infrastructure::{
    ConfigLoader, FileConfig, HttpUpstreamGateway, JsonlExchangeLogger, PlaceholderRecognizer,
    PlaceholderSynthesizer,
};
use ragcast_presentation::{AppState, Cli, create_router};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging: RUST_LOG wins, otherwise verbosity level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    check_config(&config)?;

    // === Dependency Injection ===
    let gateway = Arc::new(
        HttpUpstreamGateway::new(config.upstream.gateway_config())
            .context("Failed to build upstream client")?,
    );
    let exchange_logger: Arc<dyn ExchangeLogger> = match &config.logging.exchange_log {
        Some(path) => match JsonlExchangeLogger::new(path) {
            Some(logger) => {
                info!("Exchange log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoExchangeLogger),
        },
        None => Arc::new(NoExchangeLogger),
    };

    let resolve_input =
        ResolveInputUseCase::new(Arc::new(PlaceholderRecognizer), config.request_settings());
    let complete_chat =
        CompleteChatUseCase::new(gateway.clone()).with_exchange_logger(exchange_logger.clone());
    let stream_chat = StreamChatUseCase::new(
        gateway.clone(),
        Arc::new(PlaceholderSynthesizer),
        config.streaming_params(),
    )
    .with_exchange_logger(exchange_logger);

    let state = AppState::new(resolve_input, complete_chat, stream_chat)
        .with_channel_capacity(config.server.channel_capacity);
    let router = create_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(
        "Listening on {} (upstream: {}, stream: {})",
        address,
        gateway.config().query_url,
        gateway.config().stream_url
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Log every configuration issue; refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
