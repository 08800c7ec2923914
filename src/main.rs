//! devdash - country development dashboard client
//!
//! Command-line front end for the cached API client: fetch backend routes,
//! probe the backend, upload files and pull indicator series from public
//! data APIs.

use std::process;

use clap::Parser;
use serde::Serialize;
use tracing::debug;

use devdash::cli::{Cli, Command};
use devdash::data::{
    fetch_country_info, fetch_series, CountryEndpoints, IndicatorPoint, IndicatorSource,
};
use devdash::fallback::{load_overview, DataOrigin, Panel};
use devdash::format::{chart_series, format_indicator_value, latest_value};
use devdash::probe::{check_connection, probe_endpoints};
use devdash::{logging, ApiClient, ApiError};

type BoxError = Box<dyn std::error::Error>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    match &cli.command {
        Command::Get { endpoint } => print_json(&backend(&cli)?.client().get(endpoint).await?)?,
        Command::Health => {
            let health = backend(&cli)?.client().health_check().await?;
            match &health.service {
                Some(service) => println!("{}: {}", service, health.status),
                None => println!("{}", health.status),
            }
            if !health.is_healthy() {
                return Err(format!("backend reports status '{}'", health.status).into());
            }
        }
        Command::Probe => {
            let results = probe_endpoints(&backend(&cli)?).await;
            for result in &results {
                println!("{}", result);
            }
            let failed = results.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                return Err(format!("{} of {} routes failed", failed, results.len()).into());
            }
        }
        Command::Check => {
            let report = check_connection(&backend(&cli)?).await;
            println!("backend:     {}", yes_no(report.backend));
            println!("summary api: {}", yes_no(report.summary_api));
            println!("health api:  {}", yes_no(report.health_api));
            if let Some(error) = report.error {
                return Err(error.into());
            }
        }
        Command::Upload { file } => {
            print_json(&backend(&cli)?.client().upload_file(file).await?)?
        }
        Command::Overview => {
            let overview = load_overview(&backend(&cli)?).await;
            print_panel("Stats", &overview.stats)?;
            print_panel("Regions", &overview.regions)?;
            print_panel("Health", &overview.health)?;
            if let Some(economy) = &overview.economy {
                print_panel("Economy", economy)?;
            }
        }
        Command::Indicator(args) => {
            let query = args.query()?;
            let client = ApiClient::new(cli.source_config(query.source))?;
            debug!(source = %query.source, code = %query.code, "Fetching indicator series");
            let points =
                fetch_series(&client, query.source, &query.iso3, &query.code, query.years).await?;
            print_series(&query.code, &points);
        }
        Command::Country { iso3 } => {
            let client = ApiClient::new(cli.source_config(IndicatorSource::RestCountries))?;
            print_json(&fetch_country_info(&client, iso3).await?)?;
        }
    }
    Ok(())
}

/// Route helpers for the dashboard backend named by the global flags
fn backend(cli: &Cli) -> Result<CountryEndpoints, ApiError> {
    let client = ApiClient::new(cli.client_config())?;
    Ok(CountryEndpoints::for_country(client, cli.country.as_str()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_panel<T: Serialize>(title: &str, panel: &Panel<T>) -> Result<(), BoxError> {
    match &panel.origin {
        DataOrigin::Live => println!("{} (live)", title),
        DataOrigin::Placeholder { reason } => println!("{} (placeholder: {})", title, reason),
    }
    print_json(&panel.data)
}

fn print_series(code: &str, points: &[IndicatorPoint]) {
    let series = chart_series(points, code);
    println!("{} [{}]", series.label, code);
    if series.is_empty() {
        println!("  no data");
        return;
    }
    for (year, value) in &series.points {
        println!("  {}  {}", year, format_indicator_value(Some(*value), code));
    }
    if let Some(latest) = latest_value(points) {
        if let (Some(year), Some(value)) = (latest.year, latest.value) {
            println!("latest: {} ({})", format_indicator_value(Some(value), code), year);
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
