use serde::Deserialize;

use crate::types::AuthRequestConfig;

/// Statement shown to the wallet owner inside every challenge message.
pub const CHALLENGE_STATEMENT: &str = "Please sign this message to confirm your identity.";

/// Longest accepted session lifetime (ten years).
pub const MAX_SESSION_TTL_HOURS: u64 = 10 * 365 * 24;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port
    pub port: u16,

    /// Domain presented in challenge messages (`APP_DOMAIN`)
    pub app_domain: String,

    /// Front-end URI presented in challenge messages (`REACT_URL`)
    pub app_uri: String,

    /// HMAC secret used to sign session tokens
    pub auth_secret: String,

    /// Moralis API key
    pub moralis_api_key: String,

    /// Base URL of the Moralis challenge (auth) API
    pub moralis_auth_url: String,

    /// Base URL of the Moralis data API
    pub moralis_api_url: String,

    /// Chain used for NFT lookups (default: Polygon Mumbai)
    pub nft_chain: String,

    /// Lifetime of a challenge message in seconds
    pub challenge_timeout_secs: u64,

    /// Timeout for outbound provider requests in seconds
    pub provider_timeout_secs: u64,

    /// Session token lifetime. `None` issues tokens without an `exp` claim.
    pub session_ttl_hours: Option<u64>,

    /// Single origin allowed to make credentialed CORS requests.
    /// `None` keeps CORS open to every origin.
    pub cors_origin: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
        };

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "4002".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
            app_domain: required("APP_DOMAIN")?,
            app_uri: required("REACT_URL")?,
            auth_secret: required("AUTH_SECRET")?,
            moralis_api_key: required("MORALIS_API_KEY")?,
            moralis_auth_url: lookup("MORALIS_AUTH_URL")
                .unwrap_or_else(|| "https://authapi.moralis.io".to_string()),
            moralis_api_url: lookup("MORALIS_API_URL")
                .unwrap_or_else(|| "https://deep-index.moralis.io/api/v2.2".to_string()),
            nft_chain: lookup("NFT_CHAIN").unwrap_or_else(|| "0x13881".to_string()),
            challenge_timeout_secs: lookup("CHALLENGE_TIMEOUT_SECS")
                .unwrap_or_else(|| "60".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("CHALLENGE_TIMEOUT_SECS must be a valid u64"))?,
            provider_timeout_secs: lookup("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PROVIDER_TIMEOUT_SECS must be a valid u64"))?,
            session_ttl_hours: lookup("SESSION_TTL_HOURS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .ok()
                .and_then(|ttl| match ttl {
                    Some(hours) if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) => None,
                    other => Some(other),
                })
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "SESSION_TTL_HOURS must be an integer between 1 and {}",
                        MAX_SESSION_TTL_HOURS
                    )
                })?,
            cors_origin: lookup("CORS_ORIGIN").filter(|v| !v.is_empty()),
        })
    }

    /// Static parameters sent with every challenge request.
    pub fn auth_request(&self) -> AuthRequestConfig {
        AuthRequestConfig {
            domain: self.app_domain.clone(),
            statement: CHALLENGE_STATEMENT.to_string(),
            uri: self.app_uri.clone(),
            timeout: self.challenge_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        vars(&[
            ("APP_DOMAIN", "faithluna.app"),
            ("REACT_URL", "https://faithluna.app"),
            ("AUTH_SECRET", "secret"),
            ("MORALIS_API_KEY", "key"),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let env = minimal();
        let config = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.port, 4002);
        assert_eq!(config.nft_chain, "0x13881");
        assert_eq!(config.challenge_timeout_secs, 60);
        assert_eq!(config.session_ttl_hours, None);
        assert_eq!(config.cors_origin, None);
        assert_eq!(config.moralis_auth_url, "https://authapi.moralis.io");
    }

    #[test]
    fn test_missing_secret_rejected() {
        let mut env = minimal();
        env.remove("AUTH_SECRET");
        let err = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("AUTH_SECRET"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut env = minimal();
        env.insert("PORT".to_string(), "http".to_string());
        assert!(AppConfig::from_lookup(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_out_of_range_session_ttl_rejected() {
        for ttl in ["0", "87601", "9223372036854775807", "-1", "soon"] {
            let mut env = minimal();
            env.insert("SESSION_TTL_HOURS".to_string(), ttl.to_string());
            let err = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
            assert!(err.to_string().contains("SESSION_TTL_HOURS"), "ttl {ttl}");
        }
    }

    #[test]
    fn test_max_session_ttl_accepted() {
        let mut env = minimal();
        env.insert(
            "SESSION_TTL_HOURS".to_string(),
            MAX_SESSION_TTL_HOURS.to_string(),
        );
        let config = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.session_ttl_hours, Some(MAX_SESSION_TTL_HOURS));
    }

    #[test]
    fn test_auth_request_uses_fixed_statement() {
        let mut env = minimal();
        env.insert("SESSION_TTL_HOURS".to_string(), "12".to_string());
        let config = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.session_ttl_hours, Some(12));

        let request = config.auth_request();
        assert_eq!(request.domain, "faithluna.app");
        assert_eq!(request.uri, "https://faithluna.app");
        assert_eq!(request.statement, CHALLENGE_STATEMENT);
        assert_eq!(request.timeout, 60);
    }
}
