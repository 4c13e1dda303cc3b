//! Common utilities shared across search providers.

use crate::error::{Result, SearchError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Build a standard HTTP client with common timeout settings.
///
/// # Arguments
/// * `timeout_secs` - Timeout in seconds (defaults to 30 if not specified)
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.unwrap_or(30)))
        .user_agent(concat!("ceruleanowl/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SearchError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Error envelope used by Google JSON APIs.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorEnvelope {
    /// Error payload
    pub error: GoogleErrorBody,
}

/// Error payload inside a [`GoogleErrorEnvelope`].
#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    /// HTTP status repeated by the API
    #[serde(default)]
    pub code: u16,
    /// Human readable message
    #[serde(default)]
    pub message: String,
}

/// Map a non-success HTTP response to a [`SearchError`].
///
/// The message is taken from the JSON error envelope when present, falling
/// back to the raw body text.
#[must_use]
pub fn map_error_status(provider: &str, status: u16, body: &str) -> SearchError {
    let message = serde_json::from_str::<GoogleErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => SearchError::AuthenticationFailed {
            provider: provider.to_string(),
            message,
        },
        429 => SearchError::RateLimitExceeded {
            provider: provider.to_string(),
            message,
        },
        _ => SearchError::ApiError {
            provider: provider.to_string(),
            status,
            message,
        },
    }
}
