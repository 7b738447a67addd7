//! Error types for the Glassfrog client.
//!
//! This module defines `GlassfrogError`, the single error type returned by
//! every client operation, and `RemoteError`, the normalized shape of a
//! failed HTTP response.
//!
//! # Security
//!
//! API keys must never reach logs. Use `sanitize_message()` before logging
//! any message built from transport or server output.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Glassfrog operations.
///
/// Construction and validation failures are returned before any network
/// activity. Everything else comes out of the HTTP exchange itself.
#[derive(Error, Debug)]
pub enum GlassfrogError {
    /// Invalid or missing endpoint, API key, or environment variable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An identifier argument was not a positive integer.
    #[error("validation error: {0}")]
    Validation(String),

    /// A request was attempted with a missing or unsendable API key.
    #[error("authentication failed - API key {0}")]
    Authentication(String),

    /// Network-level failure (DNS, connection, timeout), passed through
    /// from the transport unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status other than 200 or 201.
    #[error("{0}")]
    Remote(RemoteError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

/// A non-success HTTP response, normalized.
///
/// The string form is the JSON object
/// `{"ErrorCode":<status>,"Message":<reason>,"Detail":<raw body>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// The HTTP status code.
    #[serde(rename = "ErrorCode")]
    pub error_code: u16,

    /// The status reason phrase (e.g. "Not Found").
    #[serde(rename = "Message")]
    pub message: String,

    /// The raw response body.
    #[serde(rename = "Detail")]
    pub detail: String,
}

impl RemoteError {
    /// Builds a remote error from a status code and the raw response body.
    pub fn new(status: reqwest::StatusCode, detail: impl Into<String>) -> Self {
        Self {
            error_code: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl GlassfrogError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        GlassfrogError::Configuration(message.into())
    }

    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        GlassfrogError::Configuration(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        GlassfrogError::Validation(message.into())
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        GlassfrogError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is a remote error.
    #[must_use]
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            GlassfrogError::Remote(remote) => Some(remote.error_code),
            _ => None,
        }
    }

    /// Sanitizes a message by replacing every occurrence of the API key
    /// with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Display message of this error with the API key stripped.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}
