//! Session token helpers and the cookie-backed `Session` extractor.
//!
//! A session is an HS256 JWT holding the verified wallet identity. It lives
//! only in the client's `jwt` cookie; nothing is stored server-side, so a
//! token stays valid until its `exp` (if any) passes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use faithluna_common::error::AppError;
use faithluna_common::types::SessionCredential;

use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwt";

/// JWT claims stored in the session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub credential: SessionCredential,
    /// Issued at (UNIX timestamp)
    pub iat: i64,
    /// Expiration time (UNIX timestamp), only present when a TTL is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Session established by a valid `jwt` cookie.
///
/// Use as an Axum extractor; requests without a valid session are rejected
/// with a bare 403.
#[derive(Debug, Clone)]
pub struct Session(pub SessionClaims);

/// Sign a session credential into a token.
pub fn encode_session(
    credential: SessionCredential,
    secret: &str,
    ttl_hours: Option<u64>,
) -> Result<String, AppError> {
    let now = Utc::now();

    let exp = ttl_hours
        .map(|hours| {
            i64::try_from(hours)
                .ok()
                .and_then(TimeDelta::try_hours)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .map(|exp| exp.timestamp())
                .ok_or_else(|| {
                    AppError::Internal(format!("Session TTL of {} hours is out of range", hours))
                })
        })
        .transpose()?;

    let claims = SessionClaims {
        credential,
        iat: now.timestamp(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to encode session token: {}", e)))
}

/// Decode and validate a session token.
///
/// `exp` is always checked when present; it is only mandatory when a TTL is
/// configured.
pub fn decode_session(
    token: &str,
    secret: &str,
    ttl_hours: Option<u64>,
) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    if ttl_hours.is_some() {
        validation.required_spec_claims.insert("exp".to_string());
    }

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::Unauthorized
    })?;

    Ok(token_data.claims)
}

/// HTTP-only cookie carrying a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

/// Cookie that overwrites and expires the session cookie.
///
/// Added to the jar directly so the `Set-Cookie` header is sent even when
/// the request carried no session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .build();
    cookie.make_removal();
    cookie
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            tracing::debug!("No session cookie presented");
            return Err(AppError::Unauthorized);
        };

        let claims = decode_session(
            cookie.value(),
            &state.config.auth_secret,
            state.config.session_ttl_hours,
        )?;

        Ok(Session(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    fn credential() -> SessionCredential {
        SessionCredential {
            address: "0xabc".to_string(),
            profile_id: "123".to_string(),
            signature: "0xsig".to_string(),
        }
    }

    #[test]
    fn test_encode_decode_session() {
        let token = encode_session(credential(), TEST_SECRET, None).unwrap();
        let claims = decode_session(&token, TEST_SECRET, None).unwrap();
        assert_eq!(claims.credential, credential());
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_ttl_sets_future_expiry() {
        let token = encode_session(credential(), TEST_SECRET, Some(24)).unwrap();
        let claims = decode_session(&token, TEST_SECRET, Some(24)).unwrap();
        assert!(claims.exp.unwrap() > Utc::now().timestamp());
    }

    #[test]
    fn test_out_of_range_ttl_is_an_error() {
        let result = encode_session(credential(), TEST_SECRET, Some(u64::MAX / 2));
        assert!(matches!(result, Err(AppError::Internal(_))));

        let result = encode_session(credential(), TEST_SECRET, Some(u64::MAX));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_invalid_secret_rejected() {
        let token = encode_session(credential(), TEST_SECRET, None).unwrap();
        let result = decode_session(&token, "wrong-secret", None);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = encode_session(credential(), TEST_SECRET, None).unwrap();
        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, flipped, &sig[1..]);
        assert!(decode_session(&tampered, TEST_SECRET, None).is_err());
    }

    #[test]
    fn test_expired_session_rejected() {
        let now = Utc::now();
        let claims = SessionClaims {
            credential: credential(),
            iat: (now - TimeDelta::hours(2)).timestamp(),
            exp: Some((now - TimeDelta::hours(1)).timestamp()),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        // Expired tokens fail whether or not a TTL is configured
        assert!(decode_session(&token, TEST_SECRET, None).is_err());
        assert!(decode_session(&token, TEST_SECRET, Some(1)).is_err());
    }

    #[test]
    fn test_missing_expiry_rejected_when_ttl_configured() {
        let token = encode_session(credential(), TEST_SECRET, None).unwrap();
        assert!(decode_session(&token, TEST_SECRET, Some(24)).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = decode_session("not.a.valid.jwt", TEST_SECRET, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_cookie_is_http_only() {
        let cookie = session_cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_removal_cookie_expires() {
        let cookie = removal_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(0));
        assert!(cookie.expires().is_some());
    }
}
