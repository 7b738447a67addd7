//! Client configuration.
//!
//! `Config` carries the API key and the transport timeout. It can be built
//! directly or loaded from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::error::GlassfrogError;

/// The public Glassfrog API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://glassfrog.holacracy.org/api/v3";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENDPOINT_VAR: &str = "GLASSFROG_ENDPOINT";
const API_KEY_VAR: &str = "GLASSFROG_API_KEY";
const TIMEOUT_VAR: &str = "GLASSFROG_TIMEOUT_SECS";

/// Configuration for a [`GlassfrogClient`](crate::client::GlassfrogClient).
///
/// The API key is never logged; the `Debug` impl redacts it.
#[derive(Clone)]
pub struct Config {
    /// API key sent as `X-Auth-Token` on every request.
    pub api_key: String,

    /// Timeout handed to the HTTP transport.
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration with the given API key and the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GLASSFROG_API_KEY` (required): the API key
    /// - `GLASSFROG_TIMEOUT_SECS` (optional): transport timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns `GlassfrogError::Configuration` if the key is missing, empty,
    /// a placeholder, or not sendable as a header, or if the timeout is not
    /// a positive integer.
    pub fn from_env() -> Result<Self, GlassfrogError> {
        let api_key = Self::get_required_env(API_KEY_VAR)?;
        let api_key = api_key.trim();
        Self::validate_api_key(api_key)?;
        api_key_header(api_key).map_err(|reason| {
            GlassfrogError::configuration(format!("{} {}", API_KEY_VAR, reason))
        })?;

        let mut config = Config::new(api_key);
        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            config.timeout = Self::parse_timeout(&raw)?;
        }

        Ok(config)
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, GlassfrogError> {
        env::var(name)
            .map_err(|_| GlassfrogError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(GlassfrogError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    fn parse_timeout(raw: &str) -> Result<Duration, GlassfrogError> {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(GlassfrogError::configuration(format!(
                "{} must be a positive integer number of seconds",
                TIMEOUT_VAR
            ))),
        }
    }

    /// Rejects keys copied verbatim from sample `.env` files.
    fn validate_api_key(key: &str) -> Result<(), GlassfrogError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(GlassfrogError::configuration(format!(
                    "{} appears to be a placeholder value",
                    API_KEY_VAR
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Checks that an API key can be sent as the `X-Auth-Token` header.
///
/// Returns the header value, marked sensitive, or the reason the key is
/// unusable. Whitespace-only keys are rejected.
pub(crate) fn api_key_header(api_key: &str) -> Result<HeaderValue, &'static str> {
    if api_key.trim().is_empty() {
        return Err("is required");
    }
    let mut value = HeaderValue::from_str(api_key)
        .map_err(|_| "contains characters not allowed in an HTTP header")?;
    value.set_sensitive(true);
    Ok(value)
}

/// Reads `GLASSFROG_ENDPOINT`, falling back to [`DEFAULT_ENDPOINT`].
pub fn endpoint_from_env() -> String {
    env::var(ENDPOINT_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Tests here avoid mutating process environment; `from_env` is covered
    // through its helpers.

    #[test]
    fn test_new_uses_default_timeout() {
        let config = Config::new("abc123");
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_timeout() {
        let config = Config::new("abc123").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("super_secret_value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super_secret_value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(Config::parse_timeout("10").unwrap(), Duration::from_secs(10));
        assert_eq!(Config::parse_timeout(" 7 ").unwrap(), Duration::from_secs(7));
        assert!(Config::parse_timeout("0").is_err());
        assert!(Config::parse_timeout("-3").is_err());
        assert!(Config::parse_timeout("soon").is_err());
    }

    #[test]
    fn test_validate_api_key_rejects_placeholder() {
        let result = Config::validate_api_key("your_api_key_here");
        assert!(matches!(result, Err(GlassfrogError::Configuration(_))));
    }

    #[test]
    fn test_api_key_header_rejects_blank_and_control_chars() {
        assert_eq!(api_key_header("").unwrap_err(), "is required");
        assert_eq!(api_key_header("   ").unwrap_err(), "is required");
        assert!(api_key_header("abc\ndef").is_err());
        assert!(api_key_header("abc\rdef").is_err());
    }

    #[test]
    fn test_api_key_header_is_sensitive() {
        let value = api_key_header("abc123def456").unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "abc123def456");
    }

    #[test]
    fn test_validate_api_key_accepts_real_key() {
        assert!(Config::validate_api_key("abc123def456").is_ok());
    }
}
