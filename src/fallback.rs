//! Placeholder data for panels whose live fetch failed
//!
//! Each panel degrades on its own: a failed request turns into the panel's
//! hardcoded placeholder plus the reason, and the rest of the dashboard is
//! unaffected.

use futures::join;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::data::CountryEndpoints;
use crate::error::ApiError;

/// Where a panel's data came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    /// Fetched from the API
    Live,
    /// Hardcoded placeholder; `reason` is the error that forced it
    Placeholder { reason: String },
}

/// Data for one dashboard panel
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Panel<T> {
    pub fn is_live(&self) -> bool {
        self.origin == DataOrigin::Live
    }
}

/// Uses the live result if it succeeded, otherwise the placeholder
pub fn or_placeholder<T>(result: Result<T, ApiError>, placeholder: impl FnOnce() -> T) -> Panel<T> {
    match result {
        Ok(data) => Panel {
            data,
            origin: DataOrigin::Live,
        },
        Err(e) => {
            warn!(error = %e, "Live data unavailable, using placeholder");
            Panel {
                data: placeholder(),
                origin: DataOrigin::Placeholder {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Headline statistics for the stat cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStats {
    pub healthcare: HealthcareStats,
    pub education: EducationStats,
    pub population: PopulationStats,
    pub economy: EconomyStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthcareStats {
    pub hospitals: u32,
    pub health_centers: u32,
    pub dispensaries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationStats {
    pub primary_schools: u32,
    pub secondary_schools: u32,
    pub universities: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub total: u64,
    pub urban_percentage: f64,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyStats {
    pub gdp_growth: f64,
    pub gdp_per_capita: f64,
    pub inflation_rate: f64,
}

/// Healthcare capacity for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub region: String,
    pub hospitals: u32,
    pub beds: u32,
    pub population: u64,
}

/// Placeholder headline statistics (Uganda)
pub fn placeholder_stats() -> CountryStats {
    CountryStats {
        healthcare: HealthcareStats {
            hospitals: 127,
            health_centers: 892,
            dispensaries: 2156,
        },
        education: EducationStats {
            primary_schools: 15420,
            secondary_schools: 2960,
            universities: 45,
        },
        population: PopulationStats {
            total: 47_100_000,
            urban_percentage: 24.4,
            growth_rate: 3.0,
        },
        economy: EconomyStats {
            gdp_growth: 5.2,
            gdp_per_capita: 794.0,
            inflation_rate: 2.8,
        },
    }
}

/// Placeholder regional healthcare breakdown (Uganda)
pub fn placeholder_regions() -> Vec<RegionStats> {
    [
        ("Central", 45, 2500, 15_000_000),
        ("Western", 32, 1800, 12_000_000),
        ("Eastern", 28, 1600, 11_000_000),
        ("Northern", 22, 1200, 9_100_000),
    ]
    .into_iter()
    .map(|(region, hospitals, beds, population)| RegionStats {
        region: region.to_string(),
        hospitals,
        beds,
        population,
    })
    .collect()
}

/// Dashboard overview, one panel per data source
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// Headline stat cards, from the summary route
    pub stats: Panel<CountryStats>,
    /// Regional chart data, from the summary route
    pub regions: Panel<Vec<RegionStats>>,
    /// Health route payload; `None` when it could not be fetched
    pub health: Panel<Option<Value>>,
    /// Economy route payload, only requested when the summary is unavailable
    pub economy: Option<Panel<Option<Value>>>,
}

/// Loads the overview panel by panel
///
/// The summary's `stats` and `regional_data` sections are decoded separately,
/// so a malformed section only replaces its own panel. When the summary route
/// fails, the health and economy routes are tried concurrently. The health
/// route is always requested.
pub async fn load_overview(endpoints: &CountryEndpoints) -> Overview {
    match endpoints.summary().await {
        Ok(summary) => Overview {
            stats: or_placeholder(section(endpoints, &summary, "stats"), placeholder_stats),
            regions: or_placeholder(
                section(endpoints, &summary, "regional_data"),
                placeholder_regions,
            ),
            health: or_placeholder(endpoints.health().await.map(Some), || None),
            economy: None,
        },
        Err(e) => {
            let reason = e.to_string();
            warn!(error = %reason, "Summary unavailable, trying individual routes");
            let (health, economy) = join!(endpoints.health(), endpoints.economy());
            Overview {
                stats: placeholder_panel(placeholder_stats(), &reason),
                regions: placeholder_panel(placeholder_regions(), &reason),
                health: or_placeholder(health.map(Some), || None),
                economy: Some(or_placeholder(economy.map(Some), || None)),
            }
        }
    }
}

fn placeholder_panel<T>(data: T, reason: &str) -> Panel<T> {
    Panel {
        data,
        origin: DataOrigin::Placeholder {
            reason: reason.to_string(),
        },
    }
}

/// Decodes one named section of the summary payload
fn section<T: DeserializeOwned>(
    endpoints: &CountryEndpoints,
    summary: &Value,
    name: &'static str,
) -> Result<T, ApiError> {
    let url = endpoints.client().url_for(&endpoints.path("summary"));
    let raw = match summary.get(name) {
        Some(raw) if !raw.is_null() => raw,
        _ => {
            return Err(ApiError::Parse {
                url,
                source: <serde_json::Error as serde::de::Error>::missing_field(name),
            })
        }
    };
    T::deserialize(raw).map_err(|source| ApiError::Parse { url, source })
}
