//! Route catalogue of the dashboard aggregation backend
//!
//! Every route is a plain cached GET through the shared `ApiClient`.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Result;

/// Country slug used when none is given
pub const DEFAULT_COUNTRY: &str = "uganda";

/// Trend window requested when none is given
pub const DEFAULT_TREND_YEARS: u32 = 10;

/// Typed access to the backend's per-country routes
#[derive(Debug, Clone)]
pub struct CountryEndpoints {
    client: ApiClient,
    country: String,
}

impl CountryEndpoints {
    /// Routes for the default country
    pub fn new(client: ApiClient) -> Self {
        Self::for_country(client, DEFAULT_COUNTRY)
    }

    /// Routes for a specific country slug (lowercased, e.g. "kenya")
    pub fn for_country(client: ApiClient, country: impl Into<String>) -> Self {
        Self {
            client,
            country: country.into().trim().to_lowercase(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Path of a per-country route, e.g. `/uganda/health`
    pub fn path(&self, route: &str) -> String {
        format!("/{}/{}", self.country, route.trim_start_matches('/'))
    }

    async fn fetch(&self, route: &str) -> Result<Value> {
        self.client.get(&self.path(route)).await
    }

    pub async fn dashboard(&self) -> Result<Value> {
        self.fetch("dashboard").await
    }

    pub async fn education(&self) -> Result<Value> {
        self.fetch("education").await
    }

    pub async fn demographics(&self) -> Result<Value> {
        self.fetch("demographics").await
    }

    pub async fn economy(&self) -> Result<Value> {
        self.fetch("economy").await
    }

    pub async fn health(&self) -> Result<Value> {
        self.fetch("health").await
    }

    pub async fn infrastructure(&self) -> Result<Value> {
        self.fetch("infrastructure").await
    }

    pub async fn environment(&self) -> Result<Value> {
        self.fetch("environment").await
    }

    pub async fn profile(&self) -> Result<Value> {
        self.fetch("profile").await
    }

    pub async fn summary(&self) -> Result<Value> {
        self.fetch("summary").await
    }

    /// Trend series for a category over the last `years` years
    pub async fn trends(&self, category: &str, years: u32) -> Result<Value> {
        self.fetch(&format!(
            "trends/{}?years={}",
            urlencoding::encode(category),
            years
        ))
        .await
    }

    /// List of indicators the backend knows for this country
    pub async fn indicators(&self) -> Result<Value> {
        self.fetch("indicators").await
    }

    /// Observations for a single indicator code
    pub async fn indicator(&self, code: &str) -> Result<Value> {
        self.fetch(&format!("indicators/{}", urlencoding::encode(code)))
            .await
    }

    /// Catalogue of upstream data sources (not country specific)
    pub async fn data_sources(&self) -> Result<Value> {
        self.client.get("/data-sources").await
    }
}
