use serde::{Deserialize, Serialize};

/// Static parameters sent with every challenge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequestConfig {
    pub domain: String,
    pub statement: String,
    pub uri: String,
    /// Seconds the challenge stays valid
    pub timeout: u64,
}

/// Chain identifier as sent by the client, either `"0x89"`, `"137"` or `137`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    Number(u64),
    Text(String),
}

impl ChainId {
    /// Decimal form expected by the challenge API.
    ///
    /// Unrecognised text is passed through untouched; the provider decides
    /// whether it is acceptable.
    pub fn to_decimal(&self) -> String {
        match self {
            ChainId::Number(n) => n.to_string(),
            ChainId::Text(text) => {
                let trimmed = text.trim();
                // Digits only; integer parsing alone would also accept a sign
                let all_digits = |s: &str, radix: u32| {
                    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
                };
                let parsed = match trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                {
                    Some(hex) if all_digits(hex, 16) => u64::from_str_radix(hex, 16).ok(),
                    Some(_) => None,
                    None if all_digits(trimmed, 10) => trimmed.parse::<u64>().ok(),
                    None => None,
                };
                parsed.map_or_else(|| text.clone(), |n| n.to_string())
            }
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainId::Number(n) => write!(f, "{}", n),
            ChainId::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Wallet identity confirmed by the provider.
///
/// Only constructible through [`VerifiedIdentity::new`], which rejects blank
/// fields, so a session can never be minted from a partial provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    address: String,
    profile_id: String,
}

impl VerifiedIdentity {
    pub fn new(address: impl Into<String>, profile_id: impl Into<String>) -> Option<Self> {
        let address = address.into();
        let profile_id = profile_id.into();
        if address.trim().is_empty() || profile_id.trim().is_empty() {
            return None;
        }
        Some(Self {
            address,
            profile_id,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }
}

/// Claims carried by a session token and returned from `/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub address: String,
    #[serde(rename = "profileId")]
    pub profile_id: String,
    pub signature: String,
}

impl SessionCredential {
    pub fn new(identity: VerifiedIdentity, signature: impl Into<String>) -> Self {
        Self {
            address: identity.address,
            profile_id: identity.profile_id,
            signature: signature.into(),
        }
    }
}
