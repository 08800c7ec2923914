//! Display formatting and chart reshaping for indicator data
//!
//! Turns raw indicator values into the strings shown on stat cards and
//! reshapes point lists into year/value series for charts.

use std::collections::BTreeMap;

use crate::data::IndicatorPoint;

/// Known indicator codes and their display names
const INDICATOR_NAMES: &[(&str, &str)] = &[
    ("WHOSIS_000001", "Life Expectancy at Birth"),
    ("MDG_0000000001", "Under-5 Mortality Rate"),
    ("WHOSIS_000015", "Maternal Mortality Ratio"),
    ("WHS4_100", "Physicians per 1000 Population"),
    ("M_Est_smk_curr_std", "Current Tobacco Smoking"),
    ("SP.DYN.LE00.IN", "Life Expectancy at Birth"),
    ("SH.STA.MORT", "Under-5 Mortality Rate"),
    ("SH.STA.MMRT", "Maternal Mortality Ratio"),
    ("SH.MED.PHYS.ZS", "Physicians per 1,000 People"),
    ("SH.IMM.MEAS", "Measles Immunization Coverage"),
    ("SP.POP.TOTL", "Total Population"),
    ("NY.GDP.MKTP.CD", "GDP (US$)"),
    ("NY.GDP.PCAP.CD", "GDP per Capita"),
    ("SE.PRM.NENR", "Primary School Enrollment"),
    ("SE.SEC.NENR", "Secondary School Enrollment"),
    ("EG.ELC.ACCS.ZS", "Access to Electricity"),
    ("IT.NET.USER.ZS", "Internet Users"),
];

/// Human-readable name for an indicator code, or the code itself
pub fn indicator_name(code: &str) -> &str {
    INDICATOR_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Unit family of an indicator, decided from its code and display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    PerHundredThousand,
    PerThousand,
    Years,
    PhysiciansPerThousand,
    Percent,
    Count,
}

fn unit_for(code: &str) -> Unit {
    let name = indicator_name(code).to_lowercase();
    let upper = code.to_uppercase();

    // Maternal mortality is a ratio per 100,000 and must win over the generic rule
    if upper.contains("MMR") || name.contains("maternal mortality") {
        Unit::PerHundredThousand
    } else if upper.contains("MORT") || name.contains("mortality") {
        Unit::PerThousand
    } else if upper.contains(".LE00") || name.contains("life expectancy") {
        Unit::Years
    } else if upper.contains("PHYS") || name.contains("physicians") {
        Unit::PhysiciansPerThousand
    } else if code.contains('%')
        || upper.ends_with(".ZS")
        || name.contains("rate")
        || name.contains("coverage")
        || name.contains("enrollment")
    {
        Unit::Percent
    } else {
        Unit::Count
    }
}

/// Formats an indicator value for display
///
/// Missing or non-finite values render as "N/A".
pub fn format_indicator_value(value: Option<f64>, code: &str) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "N/A".to_string(),
    };

    match unit_for(code) {
        Unit::PerHundredThousand => format!("{:.1} per 100,000", value),
        Unit::PerThousand => format!("{:.1} per 1,000", value),
        Unit::Years => format!("{:.1} years", value),
        Unit::PhysiciansPerThousand => format!("{:.2} per 1,000", value),
        Unit::Percent => format!("{:.1}%", value),
        Unit::Count => format_large_number(value),
    }
}

/// Abbreviates large magnitudes with K/M/B suffixes
pub fn format_large_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.1}", value)
    }
}

/// Year/value pairs ready for a line or bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Series label (indicator display name)
    pub label: String,
    /// Points sorted by year
    pub points: Vec<(i32, f64)>,
}

impl ChartSeries {
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|(year, _)| *year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, value)| *value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds a chart series from points that have both a year and a value
///
/// Pairs stay together, so dropping a missing value never shifts later
/// values onto the wrong year.
pub fn chart_series(points: &[IndicatorPoint], code: &str) -> ChartSeries {
    let mut pairs: Vec<(i32, f64)> = points
        .iter()
        .filter_map(|p| Some((p.year?, p.value?)))
        .collect();
    pairs.sort_by_key(|(year, _)| *year);
    ChartSeries {
        label: indicator_name(code).to_string(),
        points: pairs,
    }
}

/// Most recent point that carries a value
pub fn latest_value(points: &[IndicatorPoint]) -> Option<&IndicatorPoint> {
    points
        .iter()
        .filter(|p| p.value.is_some() && p.year.is_some())
        .max_by_key(|p| p.year)
}

/// Per-indicator tally of a mixed point list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSummary {
    pub code: String,
    pub name: String,
    pub data_points: usize,
}

/// Groups points by indicator code, keeping the input order within each group
pub fn group_by_indicator(points: &[IndicatorPoint]) -> BTreeMap<String, Vec<IndicatorPoint>> {
    let mut groups: BTreeMap<String, Vec<IndicatorPoint>> = BTreeMap::new();
    for point in points {
        groups
            .entry(point.indicator.clone())
            .or_default()
            .push(point.clone());
    }
    groups
}

/// Counts observations per indicator, ordered by code
pub fn summarize_indicators(points: &[IndicatorPoint]) -> Vec<IndicatorSummary> {
    group_by_indicator(points)
        .into_iter()
        .map(|(code, group)| IndicatorSummary {
            name: indicator_name(&code).to_string(),
            data_points: group.len(),
            code,
        })
        .collect()
}
