//! Provider-level configuration shared by every request.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;
use uuid::Uuid;

use crate::error::ApiError;

/// Endpoint, bearer token and user identifier used to address and
/// authenticate every call.
///
/// Read-only once built; clone it or share a reference across threads.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub token: String,
    pub user_uuid: String,
    /// Per-request timeout, read from `timeout_secs`. Requests wait
    /// indefinitely when unset.
    #[serde(default, rename = "timeout_secs", deserialize_with = "timeout_from_secs")]
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Build and validate a configuration.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        user_uuid: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let config = Self {
            endpoint: endpoint.into(),
            token: token.into(),
            user_uuid: user_uuid.into(),
            timeout: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the per-request timeout. A zero duration would fail every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.timeout = Some(timeout);
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Check the user identifier and endpoint before any request is sent.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_uuid(&self.user_uuid)?;
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ApiError::InvalidConfig(format!("invalid endpoint {:?}: {e}", self.endpoint)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfig(format!(
                "endpoint must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if self.token.is_empty() {
            return Err(ApiError::InvalidConfig("token must not be empty".to_string()));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::InvalidConfig("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Endpoint with a single trailing slash removed.
    pub(crate) fn base_url(&self) -> &str {
        self.endpoint.strip_suffix('/').unwrap_or(&self.endpoint)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("user_uuid", &self.user_uuid)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn timeout_from_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

/// Accepts any string `uuid` can parse (hyphenated, simple, braced, urn).
pub fn validate_uuid(value: &str) -> Result<(), ApiError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ApiError::InvalidConfig("invalid UUID format".to_string()))
}
