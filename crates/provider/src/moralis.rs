//! Moralis REST client for challenge issuance, signature verification and
//! wallet NFT lookups.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use faithluna_common::config::AppConfig;
use faithluna_common::types::{AuthRequestConfig, ChainId, VerifiedIdentity};

use crate::{ProviderError, WalletProvider};

/// Header carrying the Moralis API key on every request.
const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeBody<'a> {
    domain: &'a str,
    chain_id: String,
    address: &'a str,
    statement: &'a str,
    uri: &'a str,
    timeout: u64,
}

#[derive(Debug, Serialize)]
struct VerifyBody<'a> {
    message: &'a str,
    signature: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    address: Option<String>,
    profile_id: Option<String>,
}

/// Moralis API client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct MoralisClient {
    client: Client,
    api_key: String,
    auth_url: String,
    api_url: String,
}

impl MoralisClient {
    pub fn new(
        api_key: impl Into<String>,
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            auth_url: auth_url.into(),
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.moralis_api_key.clone(),
            config.moralis_auth_url.clone(),
            config.moralis_api_url.clone(),
            Duration::from_secs(config.provider_timeout_secs),
        )
    }

    /// Join path segments onto a base URL, percent-encoding each segment.
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(base)
            .map_err(|e| ProviderError::InvalidRequest(format!("bad base URL {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidRequest(format!("bad base URL {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, ProviderError> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ProviderError::from_status(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Moralis request rejected");
            return Err(err);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WalletProvider for MoralisClient {
    async fn request_message(
        &self,
        address: &str,
        chain: &ChainId,
        config: &AuthRequestConfig,
    ) -> Result<Value, ProviderError> {
        let url = Self::endpoint(&self.auth_url, &["challenge", "request", "evm"])?;
        let body = ChallengeBody {
            domain: &config.domain,
            chain_id: chain.to_decimal(),
            address,
            statement: &config.statement,
            uri: &config.uri,
            timeout: config.timeout,
        };

        tracing::debug!(address, chain_id = %body.chain_id, "Requesting challenge message");
        self.send_json(self.client.post(url).json(&body)).await
    }

    async fn verify(
        &self,
        message: &str,
        signature: &str,
    ) -> Result<VerifiedIdentity, ProviderError> {
        let url = Self::endpoint(&self.auth_url, &["challenge", "verify", "evm"])?;
        let raw = self
            .send_json(self.client.post(url).json(&VerifyBody { message, signature }))
            .await?;

        let parsed: VerifyResponse = serde_json::from_value(raw)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        VerifiedIdentity::new(
            parsed.address.unwrap_or_default(),
            parsed.profile_id.unwrap_or_default(),
        )
        .ok_or_else(|| {
            ProviderError::InvalidResponse(
                "verification response is missing address or profileId".to_string(),
            )
        })
    }

    async fn wallet_nfts(&self, address: &str, chain: &str) -> Result<Value, ProviderError> {
        let url = Self::endpoint(&self.api_url, &[address, "nft"])?;

        tracing::debug!(address, chain, "Fetching wallet NFTs");
        self.send_json(
            self.client
                .get(url)
                .query(&[("chain", chain), ("format", "decimal")]),
        )
        .await
    }
}
