//! CORS policy.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use faithluna_common::config::AppConfig;

/// Build the CORS layer for the configured origin.
///
/// Without `CORS_ORIGIN` every origin is allowed and credentials are not;
/// with it, only that origin may call the API and cookies are allowed.
pub fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let Some(origin) = &config.cors_origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin: HeaderValue = origin
        .parse()
        .map_err(|_| anyhow::anyhow!("CORS_ORIGIN is not a valid header value: {}", origin))?;

    tracing::info!(origin = ?origin, "Restricting CORS to a single credentialed origin");

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
