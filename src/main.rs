//! Sous-chef relay server

use sous_chef::api::{create_router, AppState};
use sous_chef::config::RelayConfig;
use sous_chef::llm::{CompletionClient, CompletionService, LoggingService, RetryingService};
use sous_chef::relay::RelayEndpoint;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sous_chef=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration is read once; nothing re-reads the environment after this
    let config = RelayConfig::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("No provider credential configured. Set XAI_API_KEY.");
    }

    let client: Arc<dyn CompletionService> = Arc::new(CompletionClient::from_config(&config)?);
    let mut service: Arc<dyn CompletionService> = Arc::new(LoggingService::new(client));
    if config.max_retries > 0 {
        service = Arc::new(
            RetryingService::new(service, config.max_retries)
                .with_max_elapsed(config.request_timeout),
        );
    }

    let relay = Arc::new(RelayEndpoint::new(service));
    tracing::info!(
        model = %relay.model_id(),
        timeout_secs = config.request_timeout.as_secs(),
        max_retries = config.max_retries,
        "Relay initialized"
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(AppState::new(relay))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Sous-chef relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
