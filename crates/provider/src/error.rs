use serde_json::Value;
use thiserror::Error;

/// Maximum length for provider response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Build a rejection from a failed response, preferring the provider's
    /// own `message` field over the raw body.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| extract_message(&value))
            .unwrap_or_else(|| {
                let truncated = truncate_body(body);
                if truncated.is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    format!("Status {}: {}", status, truncated)
                }
            });

        ProviderError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

/// Moralis reports `message` either as a string or, for validation
/// failures, as a list of strings.
fn extract_message(value: &Value) -> Option<String> {
    match value.get("message")? {
        Value::String(msg) => Some(msg.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
        format!("{}... (truncated, {} total bytes)", head, body.len())
    }
}
