//! Client configuration.
//!
//! # Design
//! `ClientOptions` is what callers hand over: either a bare access key or a
//! partially filled options object. `ClientConfig` is the resolved, immutable
//! result shared by every call on a client handle.

use serde::Deserialize;

use crate::endpoint::DEFAULT_LIMIT;
use crate::error::RottenError;

/// Public API root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://api.rottentomatoes.com/api/public/v1.0";

/// Unresolved client options. Every field is optional until `resolve`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub key: Option<String>,
    pub limit: Option<u32>,
    pub base_url: Option<String>,
}

impl From<&str> for ClientOptions {
    fn from(key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::default()
        }
    }
}

impl From<String> for ClientOptions {
    fn from(key: String) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }
}

/// Resolved configuration. Read-only for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    key: String,
    limit: u32,
    base_url: String,
}

impl ClientConfig {
    /// Resolve options into a config, rejecting a missing or empty key.
    ///
    /// A zero or missing `limit` falls back to [`DEFAULT_LIMIT`].
    pub fn resolve(options: impl Into<ClientOptions>) -> Result<Self, RottenError> {
        let options = options.into();
        let key = options
            .key
            .filter(|k| !k.is_empty())
            .ok_or(RottenError::InvalidConfiguration)?;
        let limit = options.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT);
        let base_url = options
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            key,
            limit,
            base_url,
        })
    }

    /// Build a config from `ROTTEN_API_KEY`, `ROTTEN_LIMIT` and `ROTTEN_BASE_URL`.
    ///
    /// An unparsable limit is treated as absent.
    pub fn from_env() -> Result<Self, RottenError> {
        let options = ClientOptions {
            key: std::env::var("ROTTEN_API_KEY").ok(),
            limit: std::env::var("ROTTEN_LIMIT").ok().and_then(|v| v.parse().ok()),
            base_url: std::env::var("ROTTEN_BASE_URL").ok(),
        };
        Self::resolve(options)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_key_uses_defaults() {
        let config = ClientConfig::resolve("ABC").unwrap();
        assert_eq!(config.key(), "ABC");
        assert_eq!(config.limit(), DEFAULT_LIMIT);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn options_object_overrides_limit_and_base() {
        let options: ClientOptions = serde_json::from_str(
            r#"{"key":"ABC","limit":3,"base_url":"http://localhost:3000/"}"#,
        )
        .unwrap();
        let config = ClientConfig::resolve(options).unwrap();
        assert_eq!(config.limit(), 3);
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let config = ClientConfig::resolve(ClientOptions {
            key: Some("ABC".to_string()),
            limit: Some(0),
            base_url: None,
        })
        .unwrap();
        assert_eq!(config.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn missing_or_empty_key_is_rejected() {
        assert_eq!(
            ClientConfig::resolve(ClientOptions::default()),
            Err(RottenError::InvalidConfiguration)
        );
        assert_eq!(
            ClientConfig::resolve(""),
            Err(RottenError::InvalidConfiguration)
        );
        let options: ClientOptions = serde_json::from_str(r#"{"limit":5}"#).unwrap();
        assert_eq!(
            ClientConfig::resolve(options),
            Err(RottenError::InvalidConfiguration)
        );
    }
}
