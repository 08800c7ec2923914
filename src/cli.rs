//! Command-line interface parsing for devdash
//!
//! Global flags configure the backend client; each subcommand exercises one
//! part of the library against the backend or a public data API.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::data::{IndicatorSource, YearRange, DEFAULT_COUNTRY};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The source name is not recognized (message lists the valid ones)
    #[error("{0}")]
    InvalidSource(String),

    /// `--from` is later than `--to`
    #[error("Invalid year range: {from} is after {to}")]
    InvalidYearRange { from: i32, to: i32 },

    /// The source only serves metadata
    #[error("{0} does not publish indicator series; try `devdash country`")]
    NoSeries(IndicatorSource),
}

/// devdash - country development dashboard client
#[derive(Parser, Debug)]
#[command(name = "devdash")]
#[command(about = "Fetch and cache country development indicators")]
#[command(version)]
pub struct Cli {
    /// Dashboard backend base URL
    #[arg(long, env = "DEVDASH_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Seconds a cached response stays fresh
    #[arg(long, env = "DEVDASH_CACHE_TTL", default_value_t = 300, global = true)]
    pub ttl_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "DEVDASH_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Country slug used in backend routes
    #[arg(long, env = "DEVDASH_COUNTRY", default_value = DEFAULT_COUNTRY, global = true)]
    pub country: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// GET a backend endpoint and print the JSON
    ///
    /// Examples:
    ///   devdash get /uganda/summary
    ///   devdash get uganda/trends/health?years=5
    Get {
        /// Endpoint path, with or without the leading slash
        endpoint: String,
    },

    /// Print backend health
    Health,

    /// Probe the core routes and print one line per route
    Probe,

    /// Check whether the dashboard can reach any data
    Check,

    /// Upload a file to the backend
    Upload {
        /// File to send
        file: PathBuf,
    },

    /// Print headline stats and regional data, with placeholders on failure
    Overview,

    /// Fetch an indicator series from a public data API
    Indicator(IndicatorArgs),

    /// Print REST Countries metadata for a country
    Country {
        /// ISO 3166-1 alpha-3 code
        #[arg(default_value = "UGA")]
        iso3: String,
    },
}

/// Arguments for the `indicator` subcommand
#[derive(Args, Debug, Clone)]
pub struct IndicatorArgs {
    /// Data source: who, worldbank, unesco
    #[arg(long, default_value = "who")]
    pub source: String,

    /// ISO 3166-1 alpha-3 country code
    #[arg(long, default_value = "UGA")]
    pub iso3: String,

    /// Indicator code, e.g. WHOSIS_000001 or SP.DYN.LE00.IN
    #[arg(long)]
    pub code: String,

    /// First year (inclusive)
    #[arg(long, default_value_t = 2018)]
    pub from: i32,

    /// Last year (inclusive)
    #[arg(long, default_value_t = 2023)]
    pub to: i32,
}

/// Validated `indicator` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorQuery {
    pub source: IndicatorSource,
    pub iso3: String,
    pub code: String,
    pub years: YearRange,
}

/// Parses a source name into an `IndicatorSource`
pub fn parse_source_arg(s: &str) -> Result<IndicatorSource, CliError> {
    s.parse().map_err(CliError::InvalidSource)
}

impl IndicatorArgs {
    /// Validates the arguments
    ///
    /// # Returns
    /// * `Ok(IndicatorQuery)` with the parsed source and year range
    /// * `Err(CliError)` if the source is unknown, has no series, or the
    ///   range is reversed
    pub fn query(&self) -> Result<IndicatorQuery, CliError> {
        let source = parse_source_arg(&self.source)?;
        if !source.has_series() {
            return Err(CliError::NoSeries(source));
        }
        let years = YearRange::new(self.from, self.to).map_err(|_| CliError::InvalidYearRange {
            from: self.from,
            to: self.to,
        })?;
        Ok(IndicatorQuery {
            source,
            iso3: self.iso3.trim().to_uppercase(),
            code: self.code.trim().to_string(),
            years,
        })
    }
}

impl Cli {
    /// Backend client configuration from the global flags
    pub fn client_config(&self) -> ClientConfig {
        self.apply_limits(ClientConfig::with_base_url(self.base_url.clone()))
    }

    /// Client configuration for a public data API, keeping TTL and timeout
    pub fn source_config(&self, source: IndicatorSource) -> ClientConfig {
        self.apply_limits(source.client_config())
    }

    fn apply_limits(&self, config: ClientConfig) -> ClientConfig {
        config
            .with_ttl(Duration::from_secs(self.ttl_secs))
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(cli: Cli) -> IndicatorArgs {
        match cli.command {
            Command::Indicator(args) => args,
            other => panic!("expected indicator command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_source_arg_aliases() {
        assert_eq!(parse_source_arg("who").unwrap(), IndicatorSource::WhoGho);
        assert_eq!(parse_source_arg("WB").unwrap(), IndicatorSource::WorldBank);
        assert_eq!(parse_source_arg("uis").unwrap(), IndicatorSource::Unesco);
    }

    #[test]
    fn test_parse_source_arg_invalid() {
        let err = parse_source_arg("imf").unwrap_err();
        assert!(err.to_string().contains("Invalid source"));
        assert!(err.to_string().contains("imf"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["devdash", "health"]);
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.country, "uganda");
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Command::Health));

        let config = cli.client_config();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "devdash",
            "probe",
            "--base-url",
            "http://dash.local/api",
            "--ttl-secs",
            "60",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        let config = cli.client_config();
        assert_eq!(config.base_url, "http://dash.local/api");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_cli_get_endpoint() {
        let cli = Cli::parse_from(["devdash", "get", "/uganda/summary"]);
        match cli.command {
            Command::Get { endpoint } => assert_eq!(endpoint, "/uganda/summary"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_get_requires_endpoint() {
        assert!(Cli::try_parse_from(["devdash", "get"]).is_err());
    }

    #[test]
    fn test_indicator_query_defaults() {
        let cli = Cli::parse_from(["devdash", "indicator", "--code", "WHOSIS_000001"]);
        let query = indicator(cli).query().unwrap();
        assert_eq!(query.source, IndicatorSource::WhoGho);
        assert_eq!(query.iso3, "UGA");
        assert_eq!(query.years, YearRange::default());
    }

    #[test]
    fn test_indicator_query_normalizes_iso3() {
        let cli = Cli::parse_from([
            "devdash",
            "indicator",
            "--source",
            "worldbank",
            "--iso3",
            " ken ",
            "--code",
            "SP.POP.TOTL",
        ]);
        let query = indicator(cli).query().unwrap();
        assert_eq!(query.iso3, "KEN");
        assert_eq!(query.source, IndicatorSource::WorldBank);
    }

    #[test]
    fn test_indicator_query_reversed_years() {
        let cli = Cli::parse_from([
            "devdash", "indicator", "--code", "X", "--from", "2023", "--to", "2018",
        ]);
        let err = indicator(cli).query().unwrap_err();
        assert!(matches!(err, CliError::InvalidYearRange { from: 2023, to: 2018 }));
    }

    #[test]
    fn test_indicator_query_rejects_metadata_source() {
        let cli = Cli::parse_from([
            "devdash",
            "indicator",
            "--source",
            "restcountries",
            "--code",
            "X",
        ]);
        assert!(matches!(
            indicator(cli).query(),
            Err(CliError::NoSeries(IndicatorSource::RestCountries))
        ));
    }

    #[test]
    fn test_source_config_keeps_limits() {
        let cli = Cli::parse_from(["devdash", "--timeout-secs", "5", "country"]);
        let config = cli.source_config(IndicatorSource::RestCountries);
        assert_eq!(config.base_url, IndicatorSource::RestCountries.base_url());
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
