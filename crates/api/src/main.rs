//! Faithluna API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use faithluna_common::config::AppConfig;
use faithluna_provider::MoralisClient;

use faithluna_api::middleware::cors::cors_layer;
use faithluna_api::routes::create_router;
use faithluna_api::state::AppState;

/// Largest accepted request body (challenge and verify payloads are small).
const MAX_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("faithluna_api=debug,faithluna_provider=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting Faithluna API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    if config.session_ttl_hours.is_none() {
        tracing::warn!("SESSION_TTL_HOURS not set; session tokens never expire");
    }

    // Provider client lives for the whole process
    let provider = MoralisClient::from_config(&config)?;
    tracing::info!(auth_url = %config.moralis_auth_url, "Moralis client initialised");

    let cors = cors_layer(&config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    // Build application state
    let state = AppState::new(Arc::new(provider), config);

    // Build router
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    Ok(())
}
