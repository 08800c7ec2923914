//! Cached fetch client
//!
//! `ApiClient` issues GET requests against a base URL and keeps the parsed
//! JSON of each successful response in memory for a freshness window. Repeat
//! requests for the same endpoint inside the window are served from memory.
//!
//! The client is constructed explicitly and cloned into whatever needs it;
//! clones share one cache. There is no retry: a failed request is reported
//! to the caller, who decides what to do next.

use chrono::Duration as ChronoDuration;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::cache::ResponseCache;
use crate::clock::{Clock, SystemClock};
use crate::config::{normalize_endpoint, ClientConfig};
use crate::data::{HealthStatus, UploadReceipt};
use crate::error::{ApiError, Result};
use crate::transport::{HttpResponse, ReqwestTransport, Transport, TransportError};

/// Form field name the upload endpoint expects
const UPLOAD_FIELD: &str = "file";

/// Client for a JSON API with an in-memory TTL cache
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    ttl: ChronoDuration,
    cache: ResponseCache,
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .field("cached", &self.inner.cache.len())
            .finish()
    }
}

impl ApiClient {
    /// Creates a client that talks to the network through reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout)
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;
        Self::with_parts(config, transport, SystemClock)
    }

    /// Creates a client with a custom transport and clock
    pub fn with_parts(
        config: ClientConfig,
        transport: impl Transport + 'static,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let ttl = ChronoDuration::from_std(config.cache_ttl)
            .map_err(|_| ApiError::Config("cache TTL is out of range".to_string()))?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                ttl,
                cache: ResponseCache::new(),
                transport: Box::new(transport),
                clock: Box::new(clock),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Full request URL for an endpoint
    pub fn url_for(&self, endpoint: &str) -> String {
        self.inner.config.url_for(endpoint)
    }

    /// Number of entries currently held, fresh or not
    pub fn cached_len(&self) -> usize {
        self.inner.cache.len()
    }

    /// Fetches an endpoint, serving it from the cache while fresh
    ///
    /// # Returns
    /// * `Ok(Value)` - The parsed JSON payload
    /// * `Err(ApiError::Network)` - Transport failure or non-success status
    /// * `Err(ApiError::Parse)` - Body was not valid JSON
    ///
    /// Failed requests leave the cache untouched.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        let key = normalize_endpoint(endpoint);
        let inner = &self.inner;

        if let Some(value) = inner.cache.fresh(&key, inner.clock.now(), inner.ttl) {
            debug!(endpoint = %key, "Using cached data");
            return Ok(value);
        }

        debug!(endpoint = %key, "Cache miss");
        let url = self.url_for(&key);
        let value = match self.fetch_json(&url).await {
            Ok(value) => value,
            Err(e) => {
                error!(endpoint = %key, error = %e, "API fetch failed");
                return Err(e);
            }
        };

        inner.cache.write(&key, value.clone(), inner.clock.now());
        info!(endpoint = %key, "Fetched fresh data");
        Ok(value)
    }

    /// Fetches an endpoint and deserializes it into `T`
    ///
    /// The raw JSON is cached as in `get`; a payload that does not fit `T`
    /// is reported as `ApiError::Parse`.
    pub async fn get_as<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.get(endpoint).await?;
        serde_json::from_value(value).map_err(|source| ApiError::Parse {
            url: self.url_for(endpoint),
            source,
        })
    }

    /// Drops every cached response; the next `get` of any endpoint goes to the network
    pub fn clear(&self) {
        self.inner.cache.clear();
        info!("API cache cleared");
    }

    /// Asks the backend whether it is up, bypassing the cache
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let url = self.url_for("/health");
        let value = self.fetch_json(&url).await?;
        serde_json::from_value(value).map_err(|source| ApiError::Parse { url, source })
    }

    /// Uploads a local file to the backend's upload endpoint
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<UploadReceipt> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.upload_bytes(&filename, bytes).await
    }

    /// Uploads in-memory bytes as a file named `filename`
    ///
    /// # Returns
    /// * `Ok(UploadReceipt)` - The stored filename and size
    /// * `Err(ApiError::Upload)` - The endpoint answered with a non-success status
    /// * `Err(ApiError::Network)` - The request never got a response
    pub async fn upload_bytes(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReceipt> {
        let url = self.url_for("/upload");
        let response = self
            .inner
            .transport
            .upload(&url, UPLOAD_FIELD, filename, bytes)
            .await
            .map_err(|e| transport_error(&url, e))?;

        if !response.is_success() {
            error!(status = response.status, filename, "Upload failed");
            return Err(ApiError::Upload {
                status: response.status,
                reason: response.reason,
            });
        }

        let receipt: UploadReceipt = serde_json::from_str(&response.body)
            .map_err(|source| ApiError::Parse { url, source })?;
        info!(filename = %receipt.filename, size = receipt.size, "File uploaded");
        Ok(receipt)
    }

    /// One uncached GET: status check, then JSON parse
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .inner
            .transport
            .get(url)
            .await
            .map_err(|e| transport_error(url, e))?;
        parse_response(url, response)
    }
}

fn transport_error(url: &str, err: TransportError) -> ApiError {
    ApiError::Network {
        url: url.to_string(),
        status: None,
        reason: err.message,
    }
}

fn parse_response(url: &str, response: HttpResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(ApiError::from_status(url, response.status, &response.reason));
    }
    serde_json::from_str(&response.body).map_err(|source| ApiError::Parse {
        url: url.to_string(),
        source,
    })
}
