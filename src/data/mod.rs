//! Core data models for the dashboard client
//!
//! This module contains the types shared by the backend endpoint catalogue
//! and the third-party indicator sources.

pub mod endpoints;
pub mod sources;

pub use endpoints::{CountryEndpoints, DEFAULT_COUNTRY, DEFAULT_TREND_YEARS};
pub use sources::{fetch_country_info, fetch_series, IndicatorSource, YearRange};

use serde::{Deserialize, Serialize};

/// One observation of an indicator for a country
///
/// Every source is normalized into this shape. Sources routinely omit years
/// or values, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Indicator code (e.g. "WHOSIS_000001", "SP.POP.TOTL")
    pub indicator: String,
    /// ISO 3166-1 alpha-3 country code
    pub country: String,
    /// Observation year
    pub year: Option<i32>,
    /// Numeric value
    pub value: Option<f64>,
    /// Source-provided display string, if any
    pub display_value: Option<String>,
}

/// Response from the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Name the backend stored the file under
    pub filename: String,
    /// Size in bytes
    pub size: u64,
}

/// Response from the backend's `/health` route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_receipt_deserializes() {
        let receipt: UploadReceipt =
            serde_json::from_str(r#"{"filename": "data.csv", "size": 2048}"#).unwrap();
        assert_eq!(receipt.filename, "data.csv");
        assert_eq!(receipt.size, 2048);
    }

    #[test]
    fn test_health_status_service_is_optional() {
        let status: HealthStatus = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(status.is_healthy());
        assert!(status.service.is_none());

        let down: HealthStatus = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!down.is_healthy());
    }

    #[test]
    fn test_indicator_point_allows_missing_fields() {
        let point = IndicatorPoint {
            indicator: "WHOSIS_000001".to_string(),
            country: "UGA".to_string(),
            year: None,
            value: None,
            display_value: None,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert!(json["year"].is_null());
        assert!(json["value"].is_null());
    }
}
