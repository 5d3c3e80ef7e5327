//! Shared application state for the Axum API server.

use std::sync::Arc;

use faithluna_common::config::AppConfig;
use faithluna_provider::WalletProvider;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WalletProvider>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(provider: Arc<dyn WalletProvider>, config: AppConfig) -> Self {
        Self { provider, config }
    }
}
