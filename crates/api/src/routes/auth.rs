//! Authentication routes: challenge issuance, signature verification,
//! session inspection and logout.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::Value;

use faithluna_common::error::AppError;
use faithluna_common::types::{ChainId, SessionCredential};

use crate::middleware::auth::{
    Session, SessionClaims, encode_session, removal_cookie, session_cookie,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request-message", post(request_message))
        .route("/verify", post(verify))
        .route("/authenticate", get(authenticate))
        .route("/logout", get(logout))
}

/// Request body for a challenge message.
#[derive(Debug, Deserialize)]
pub struct RequestMessageRequest {
    /// Wallet address that will sign the challenge
    pub address: String,
    /// Chain identifier, hex (`"0x1"`), decimal string or number
    pub chain: ChainId,
    /// Network family reported by the client; challenges are always EVM
    #[serde(default)]
    pub network: Option<String>,
}

/// Request body for signature verification.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// The challenge message that was signed
    pub message: String,
    /// The wallet's signature of the message
    pub signature: String,
}

/// POST /request-message: Ask the provider for a message for the wallet to sign.
async fn request_message(
    State(state): State<AppState>,
    payload: Result<Json<RequestMessageRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected challenge request body");
        AppError::Challenge(e.body_text())
    })?;

    tracing::info!(
        address = %req.address,
        chain = %req.chain,
        network = req.network.as_deref().unwrap_or("evm"),
        "Challenge requested"
    );

    let challenge = state
        .provider
        .request_message(&req.address, &req.chain, &state.config.auth_request())
        .await
        .map_err(|e| {
            tracing::error!(address = %req.address, error = %e, "Challenge request failed");
            AppError::Challenge(e.to_string())
        })?;

    Ok(Json(challenge))
}

/// POST /verify: Verify a signed challenge and issue the session cookie.
async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionCredential>), AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected verify request body");
        AppError::Verification(e.body_text())
    })?;

    let identity = state
        .provider
        .verify(&req.message, &req.signature)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Signature verification failed");
            AppError::Verification(e.to_string())
        })?;

    let credential = SessionCredential::new(identity, req.signature);
    let token = encode_session(
        credential.clone(),
        &state.config.auth_secret,
        state.config.session_ttl_hours,
    )?;

    tracing::info!(
        wallet = %credential.address,
        profile_id = %credential.profile_id,
        "Wallet authenticated"
    );

    Ok((jar.add(session_cookie(token)), Json(credential)))
}

/// GET /authenticate: Return the claims of the presented session.
async fn authenticate(Session(claims): Session) -> Json<SessionClaims> {
    Json(claims)
}

/// GET /logout: Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    tracing::debug!("Session cookie cleared");
    (jar.add(removal_cookie()), StatusCode::OK)
}
