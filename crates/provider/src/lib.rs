//! Client side of the external wallet-auth and NFT indexing provider.
//!
//! Handlers only see the [`WalletProvider`] trait; production wires in
//! [`MoralisClient`], tests substitute [`MockProvider`].

pub mod error;
pub mod mock;
pub mod moralis;

use async_trait::async_trait;
use serde_json::Value;

use faithluna_common::types::{AuthRequestConfig, ChainId, VerifiedIdentity};

pub use error::ProviderError;
pub use mock::MockProvider;
pub use moralis::MoralisClient;

/// Operations delegated to the external provider.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the provider for a challenge message the wallet owner must sign.
    ///
    /// The provider's response object is returned verbatim.
    async fn request_message(
        &self,
        address: &str,
        chain: &ChainId,
        config: &AuthRequestConfig,
    ) -> Result<Value, ProviderError>;

    /// Verify a signed challenge message and return the confirmed identity.
    async fn verify(&self, message: &str, signature: &str)
    -> Result<VerifiedIdentity, ProviderError>;

    /// List the NFTs held by `address` on `chain`, verbatim.
    async fn wallet_nfts(&self, address: &str, chain: &str) -> Result<Value, ProviderError>;
}
