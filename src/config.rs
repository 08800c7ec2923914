//! Client configuration
//!
//! `ClientConfig` carries the base URL, freshness window and request timeout
//! for one `ApiClient`. The default points at a local aggregation backend.

use std::time::Duration;

use crate::error::{ApiError, Result};

/// Base URL of the local aggregation backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// How long a cached response stays fresh
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an `ApiClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined with every endpoint path
    pub base_url: String,
    /// Freshness window for cached responses
    pub cache_ttl: Duration,
    /// Timeout applied to each network request
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config for the given base URL with default TTL and timeout
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Overrides the freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Rejects configurations the client cannot work with
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ApiError::Config("base URL is empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base URL must start with http:// or https://: {}",
                base
            )));
        }
        if self.cache_ttl.is_zero() {
            return Err(ApiError::Config("cache TTL must be greater than zero".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(ApiError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Joins the base URL and an endpoint path
    ///
    /// A trailing `/` on the base is dropped and a missing leading `/` on the
    /// endpoint is added, so `("http://host/api/", "x")` gives `http://host/api/x`.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}{}",
            self.base_url.trim().trim_end_matches('/'),
            normalize_endpoint(endpoint)
        )
    }
}

/// Ensures an endpoint path starts with `/`
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{}", endpoint)
    }
}
