//! Wallet NFT lookup.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use faithluna_common::error::AppError;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/get-nft/{address}", post(get_nft))
}

/// POST /get-nft/:address: NFTs held by `address` on the configured chain.
///
/// The provider's page is returned untouched under `message`.
async fn get_nft(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>, AppError> {
    let chain = &state.config.nft_chain;

    let page = state
        .provider
        .wallet_nfts(&address, chain)
        .await
        .map_err(|e| {
            tracing::error!(address = %address, chain = %chain, error = %e, "NFT lookup failed");
            AppError::Assets(e.to_string())
        })?;

    Ok(Json(json!({ "message": page })))
}
