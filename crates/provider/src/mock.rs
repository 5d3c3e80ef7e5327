//! In-memory provider for tests.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use faithluna_common::types::{AuthRequestConfig, ChainId, VerifiedIdentity};

use crate::{ProviderError, WalletProvider};

/// Mock provider for testing.
///
/// Challenges are rendered locally from the request, verification returns a
/// fixed identity, and NFT lookups return a configurable page.
pub struct MockProvider {
    identity: Option<(String, String)>,
    nfts: Value,
    challenge_error: Option<String>,
    verify_error: Option<String>,
    nft_error: Option<String>,
    call_count: AtomicU32,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            identity: Some(("0xabc".to_string(), "123".to_string())),
            nfts: json!({
                "status": "SYNCED",
                "page": 0,
                "page_size": 100,
                "cursor": null,
                "result": [],
            }),
            challenge_error: None,
            verify_error: None,
            nft_error: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Identity returned by successful verification.
    pub fn with_identity(
        mut self,
        address: impl Into<String>,
        profile_id: impl Into<String>,
    ) -> Self {
        self.identity = Some((address.into(), profile_id.into()));
        self
    }

    /// Simulate a verify response that lacks the identity fields.
    pub fn with_incomplete_identity(mut self) -> Self {
        self.identity = None;
        self
    }

    pub fn with_nfts(mut self, nfts: Value) -> Self {
        self.nfts = nfts;
        self
    }

    pub fn with_challenge_error(mut self, message: impl Into<String>) -> Self {
        self.challenge_error = Some(message.into());
        self
    }

    pub fn with_verify_error(mut self, message: impl Into<String>) -> Self {
        self.verify_error = Some(message.into());
        self
    }

    pub fn with_nft_error(mut self, message: impl Into<String>) -> Self {
        self.nft_error = Some(message.into());
        self
    }

    /// Number of provider calls made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    fn rejected(message: &str) -> ProviderError {
        ProviderError::Rejected {
            status: 400,
            message: message.to_string(),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request_message(
        &self,
        address: &str,
        chain: &ChainId,
        config: &AuthRequestConfig,
    ) -> Result<Value, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = &self.challenge_error {
            return Err(Self::rejected(msg));
        }

        let message = format!(
            concat!(
                "{} wants you to sign in with your Ethereum account:\n{}\n\n{}\n\n",
                "URI: {}\nVersion: 1\nChain ID: {}\nNonce: mocknonce0001"
            ),
            config.domain,
            address,
            config.statement,
            config.uri,
            chain.to_decimal()
        );

        Ok(json!({
            "id": "mock-challenge",
            "message": message,
            "profileId": "mock-profile",
        }))
    }

    async fn verify(
        &self,
        _message: &str,
        _signature: &str,
    ) -> Result<VerifiedIdentity, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = &self.verify_error {
            return Err(Self::rejected(msg));
        }

        self.identity
            .as_ref()
            .and_then(|(address, profile_id)| {
                VerifiedIdentity::new(address.clone(), profile_id.clone())
            })
            .ok_or_else(|| {
                ProviderError::InvalidResponse(
                    "verification response is missing address or profileId".to_string(),
                )
            })
    }

    async fn wallet_nfts(&self, _address: &str, _chain: &str) -> Result<Value, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = &self.nft_error {
            return Err(Self::rejected(msg));
        }

        Ok(self.nfts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthRequestConfig {
        AuthRequestConfig {
            domain: "faithluna.app".to_string(),
            statement: "Please sign this message to confirm your identity.".to_string(),
            uri: "https://faithluna.app".to_string(),
            timeout: 60,
        }
    }

    #[tokio::test]
    async fn test_challenge_contains_statement_and_domain() {
        let provider = MockProvider::new();
        let challenge = provider
            .request_message("0xabc", &ChainId::Text("0x1".into()), &config())
            .await
            .unwrap();
        let message = challenge["message"].as_str().unwrap();
        assert!(message.starts_with("faithluna.app wants you to sign in"));
        assert!(message.contains("Please sign this message to confirm your identity."));
        assert!(message.contains("Chain ID: 1"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_identity_rejected() {
        let provider = MockProvider::new().with_incomplete_identity();
        let result = provider.verify("msg", "0xsig").await;
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_configured_errors_surface() {
        let provider = MockProvider::new().with_nft_error("rate limited");
        let err = provider.wallet_nfts("0xabc", "0x13881").await.unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }
}
