//! Public indicator APIs
//!
//! Builds request paths for the WHO Global Health Observatory, the World Bank
//! indicators API and the UNESCO UIS data API, and normalizes each payload
//! into `IndicatorPoint`s. REST Countries is included for country metadata.
//!
//! Requests go through an `ApiClient` whose base URL is the source's base, so
//! third-party responses get the same caching as backend routes.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::IndicatorPoint;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

const WHO_GHO_BASE_URL: &str = "https://ghoapi.azureedge.net/api";
const WORLD_BANK_BASE_URL: &str = "https://api.worldbank.org/v2";
const UNESCO_UIS_BASE_URL: &str = "https://api.uis.unesco.org/api/public";
const REST_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

/// World Bank returns at most this many rows per page
const WORLD_BANK_PAGE_SIZE: u32 = 100;

/// Inclusive range of observation years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            from: 2018,
            to: 2023,
        }
    }
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Result<Self> {
        if from > to {
            return Err(ApiError::Config(format!(
                "year range is reversed: {} > {}",
                from, to
            )));
        }
        Ok(Self { from, to })
    }
}

/// A public data API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSource {
    /// WHO Global Health Observatory (OData)
    WhoGho,
    /// World Bank indicators API v2
    WorldBank,
    /// UNESCO Institute for Statistics
    Unesco,
    /// REST Countries (metadata only)
    RestCountries,
}

impl IndicatorSource {
    pub fn base_url(&self) -> &'static str {
        match self {
            IndicatorSource::WhoGho => WHO_GHO_BASE_URL,
            IndicatorSource::WorldBank => WORLD_BANK_BASE_URL,
            IndicatorSource::Unesco => UNESCO_UIS_BASE_URL,
            IndicatorSource::RestCountries => REST_COUNTRIES_BASE_URL,
        }
    }

    /// Client configuration pointing at this source
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::with_base_url(self.base_url())
    }

    /// Whether the source publishes time series
    pub fn has_series(&self) -> bool {
        !matches!(self, IndicatorSource::RestCountries)
    }

    /// Request path for an indicator series, `None` for metadata-only sources
    pub fn series_endpoint(&self, iso3: &str, code: &str, years: YearRange) -> Option<String> {
        let iso3 = iso3.trim().to_uppercase();
        match self {
            IndicatorSource::WhoGho => {
                let filter = format!(
                    "SpatialDim eq '{}' and TimeDim ge {} and TimeDim le {}",
                    iso3, years.from, years.to
                );
                Some(format!(
                    "/{}?$filter={}",
                    urlencoding::encode(code),
                    urlencoding::encode(&filter)
                ))
            }
            IndicatorSource::WorldBank => Some(format!(
                "/country/{}/indicator/{}?format=json&date={}:{}&per_page={}",
                urlencoding::encode(&iso3),
                urlencoding::encode(code),
                years.from,
                years.to,
                WORLD_BANK_PAGE_SIZE
            )),
            IndicatorSource::Unesco => Some(format!(
                "/data/indicators?indicator={}&geoUnit={}&start={}&end={}",
                urlencoding::encode(code),
                urlencoding::encode(&iso3),
                years.from,
                years.to
            )),
            IndicatorSource::RestCountries => None,
        }
    }

    /// Request path for country metadata
    pub fn country_endpoint(iso3: &str) -> String {
        format!("/alpha/{}", urlencoding::encode(&iso3.trim().to_uppercase()))
    }

    /// Normalizes a raw payload from this source
    pub fn parse_series(
        &self,
        payload: Value,
        iso3: &str,
        code: &str,
    ) -> serde_json::Result<Vec<IndicatorPoint>> {
        let mut points = match self {
            IndicatorSource::WhoGho => parse_who(payload, iso3, code)?,
            IndicatorSource::WorldBank => parse_world_bank(payload, iso3, code)?,
            IndicatorSource::Unesco => parse_unesco(payload, iso3, code)?,
            IndicatorSource::RestCountries => Vec::new(),
        };
        points.sort_by_key(|p| p.year);
        Ok(points)
    }
}

impl fmt::Display for IndicatorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndicatorSource::WhoGho => "who",
            IndicatorSource::WorldBank => "worldbank",
            IndicatorSource::Unesco => "unesco",
            IndicatorSource::RestCountries => "restcountries",
        };
        f.write_str(name)
    }
}

impl FromStr for IndicatorSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "who" | "gho" | "who-gho" => Ok(IndicatorSource::WhoGho),
            "worldbank" | "world-bank" | "wb" => Ok(IndicatorSource::WorldBank),
            "unesco" | "uis" => Ok(IndicatorSource::Unesco),
            "restcountries" | "countries" => Ok(IndicatorSource::RestCountries),
            other => Err(format!(
                "Invalid source: '{}'. Valid sources: who, worldbank, unesco, restcountries",
                other
            )),
        }
    }
}

/// Fetches an indicator series through `client` and normalizes it
///
/// `client` must be configured with `source.client_config()` (or an
/// equivalent base URL).
///
/// # Returns
/// * `Ok(Vec<IndicatorPoint>)` - Points sorted by year, undated points first
/// * `Err(ApiError::Parse)` - The payload did not have the source's envelope
/// * `Err(ApiError::Config)` - The source has no series
pub async fn fetch_series(
    client: &ApiClient,
    source: IndicatorSource,
    iso3: &str,
    code: &str,
    years: YearRange,
) -> Result<Vec<IndicatorPoint>> {
    let endpoint = source.series_endpoint(iso3, code, years).ok_or_else(|| {
        ApiError::Config(format!("{} does not publish indicator series", source))
    })?;
    let payload = client.get(&endpoint).await?;
    source
        .parse_series(payload, &iso3.trim().to_uppercase(), code)
        .map_err(|e| ApiError::Parse {
            url: client.url_for(&endpoint),
            source: e,
        })
}

/// Fetches REST Countries metadata for one country
pub async fn fetch_country_info(client: &ApiClient, iso3: &str) -> Result<Value> {
    client
        .get(&IndicatorSource::country_endpoint(iso3))
        .await
}

/// WHO GHO OData envelope
#[derive(Debug, Deserialize)]
struct GhoResponse {
    value: Vec<GhoRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GhoRecord {
    time_dim: Option<i32>,
    numeric_value: Option<f64>,
    display_value: Option<String>,
    indicator_code: Option<String>,
    spatial_dim: Option<String>,
}

fn parse_who(payload: Value, iso3: &str, code: &str) -> serde_json::Result<Vec<IndicatorPoint>> {
    let response: GhoResponse = serde_json::from_value(payload)?;
    Ok(response
        .value
        .into_iter()
        .map(|r| IndicatorPoint {
            indicator: r.indicator_code.unwrap_or_else(|| code.to_string()),
            country: r.spatial_dim.unwrap_or_else(|| iso3.to_string()),
            year: r.time_dim,
            value: r.numeric_value,
            display_value: r.display_value,
        })
        .collect())
}

/// World Bank rows; the envelope is `[page_info, rows]` and rows may be null
#[derive(Debug, Deserialize)]
struct WorldBankRecord {
    date: Option<String>,
    value: Option<f64>,
    indicator: Option<WorldBankRef>,
    countryiso3code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorldBankRef {
    id: String,
}

fn parse_world_bank(
    payload: Value,
    iso3: &str,
    code: &str,
) -> serde_json::Result<Vec<IndicatorPoint>> {
    let (_page, rows): (Value, Option<Vec<WorldBankRecord>>) = serde_json::from_value(payload)?;
    Ok(rows
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.value.is_some())
        .map(|r| IndicatorPoint {
            indicator: r.indicator.map(|i| i.id).unwrap_or_else(|| code.to_string()),
            country: r
                .countryiso3code
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| iso3.to_string()),
            year: r.date.as_deref().and_then(|d| d.trim().parse().ok()),
            value: r.value,
            display_value: None,
        })
        .collect())
}

/// UNESCO UIS envelope
#[derive(Debug, Deserialize)]
struct UisResponse {
    records: Vec<UisRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UisRecord {
    indicator_id: Option<String>,
    geo_unit: Option<String>,
    year: Option<i32>,
    value: Option<f64>,
}

fn parse_unesco(payload: Value, iso3: &str, code: &str) -> serde_json::Result<Vec<IndicatorPoint>> {
    let response: UisResponse = serde_json::from_value(payload)?;
    Ok(response
        .records
        .into_iter()
        .map(|r| IndicatorPoint {
            indicator: r.indicator_id.unwrap_or_else(|| code.to_string()),
            country: r.geo_unit.unwrap_or_else(|| iso3.to_string()),
            year: r.year,
            value: r.value,
            display_value: None,
        })
        .collect())
}
